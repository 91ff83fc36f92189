use std::path::Path;

use anyhow::{Context, bail};
use geojson::{Feature, GeoJson, Geometry, Value, feature::Id};
use tripline::{Coordinate, TripPath, units::Meters};

/// Feature properties read into paths.
#[derive(Debug, Clone)]
pub struct InputProperties {
    pub offset_property: String,
    pub id_property: Option<String>,
}

impl Default for InputProperties {
    fn default() -> Self {
        InputProperties {
            offset_property: String::from("offset_distance"),
            id_property: None,
        }
    }
}

pub fn read_paths(path: &Path, properties: &InputProperties) -> Result<Vec<TripPath>, anyhow::Error> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Invalid GeoJSON in {}", path.display()))?;

    parse_paths(geojson, properties)
}

/// One path per feature. A bare geometry is a single unnamed path.
pub fn parse_paths(geojson: GeoJson, properties: &InputProperties) -> Result<Vec<TripPath>, anyhow::Error> {
    match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                feature_path(feature, properties).with_context(|| format!("Invalid feature {index}"))
            })
            .collect(),
        GeoJson::Feature(feature) => Ok(vec![feature_path(&feature, properties)?]),
        GeoJson::Geometry(geometry) => Ok(vec![TripPath::new(geometry_coordinates(&geometry)?)]),
    }
}

fn feature_path(feature: &Feature, properties: &InputProperties) -> Result<TripPath, anyhow::Error> {
    let coordinates = match &feature.geometry {
        Some(geometry) => geometry_coordinates(geometry)?,
        None => vec![],
    };

    let mut path = TripPath::new(coordinates);

    if let Some(id) = feature_id(feature, properties) {
        path = path.with_id(id);
    }

    if let Some(offset) = feature.property(&properties.offset_property) {
        let Some(offset) = offset.as_f64() else {
            bail!("Property {} is not a number: {offset}", properties.offset_property);
        };
        path = path.with_offset_distance(Meters::new(offset));
    }

    Ok(path)
}

fn feature_id(feature: &Feature, properties: &InputProperties) -> Option<String> {
    if let Some(id_property) = &properties.id_property {
        return feature.property(id_property).map(|value| match value {
            serde_json::Value::String(id) => id.clone(),
            other => other.to_string(),
        });
    }

    match &feature.id {
        Some(Id::String(id)) => Some(id.clone()),
        Some(Id::Number(id)) => Some(id.to_string()),
        None => None,
    }
}

/// Coordinates of a geometry in document order, multi-part geometries
/// concatenated. Elevation and other extra ordinates are dropped.
fn geometry_coordinates(geometry: &Geometry) -> Result<Vec<Coordinate>, anyhow::Error> {
    let mut coordinates = Vec::new();
    collect_coordinates(&geometry.value, &mut coordinates)?;
    Ok(coordinates)
}

fn collect_coordinates(value: &Value, coordinates: &mut Vec<Coordinate>) -> Result<(), anyhow::Error> {
    match value {
        Value::Point(position) => coordinates.push(position_coordinate(position)?),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            for position in positions {
                coordinates.push(position_coordinate(position)?);
            }
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            for position in lines.iter().flatten() {
                coordinates.push(position_coordinate(position)?);
            }
        }
        Value::MultiPolygon(polygons) => {
            for position in polygons.iter().flatten().flatten() {
                coordinates.push(position_coordinate(position)?);
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_coordinates(&geometry.value, coordinates)?;
            }
        }
    }

    Ok(())
}

fn position_coordinate(position: &[f64]) -> Result<Coordinate, anyhow::Error> {
    match position {
        [lon, lat, ..] => Ok(Coordinate::new(*lon, *lat)),
        _ => bail!("Position needs at least two ordinates, got {position:?}"),
    }
}

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{params::OutputShape, waypoint::WaypointSequence};

/// A path that went through the pipeline, with its timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedPath {
    pub id: Option<String>,
    pub sequence: WaypointSequence,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum TripOutput {
    Aggregate {
        sequences: Vec<WaypointSequence>,
        maximum_timestamp: i64,
    },
    GeometryCollection(#[schemars(with = "serde_json::Value")] FeatureCollection),
    Flat(Vec<WaypointSequence>),
}

impl TripOutput {
    pub fn shape(&self) -> OutputShape {
        match self {
            TripOutput::Aggregate { .. } => OutputShape::Aggregate,
            TripOutput::GeometryCollection(_) => OutputShape::GeometryCollection,
            TripOutput::Flat(_) => OutputShape::Flat,
        }
    }
}

/// Latest timestamp of all the sequences, `fallback` when there is none.
pub fn maximum_timestamp(sequences: &[WaypointSequence], fallback: i64) -> i64 {
    sequences
        .iter()
        .flat_map(|sequence| sequence.waypoints.iter())
        .map(|waypoint| waypoint.timestamp)
        .max()
        .unwrap_or(fallback)
}

pub fn shape_output(shape: OutputShape, paths: Vec<TimedPath>, start_time: i64) -> TripOutput {
    match shape {
        OutputShape::Aggregate => {
            let sequences: Vec<WaypointSequence> =
                paths.into_iter().map(|path| path.sequence).collect();
            let maximum_timestamp = maximum_timestamp(&sequences, start_time);

            TripOutput::Aggregate {
                sequences,
                maximum_timestamp,
            }
        }
        OutputShape::GeometryCollection => TripOutput::GeometryCollection(FeatureCollection {
            bbox: None,
            features: paths.iter().map(timed_feature).collect(),
            foreign_members: None,
        }),
        OutputShape::Flat => TripOutput::Flat(paths.into_iter().map(|path| path.sequence).collect()),
    }
}

/// A feature whose positions are `[lon, lat, timestamp]`.
///
/// Single vertex paths become points since a line needs two positions.
fn timed_feature(path: &TimedPath) -> Feature {
    let mut positions: Vec<Vec<f64>> = path
        .sequence
        .waypoints
        .iter()
        .map(|waypoint| {
            vec![
                waypoint.coordinates.lon,
                waypoint.coordinates.lat,
                waypoint.timestamp as f64,
            ]
        })
        .collect();

    let geometry = if positions.len() == 1 {
        Value::Point(positions.remove(0))
    } else {
        Value::LineString(positions)
    };

    let mut properties = JsonObject::new();
    if let Some(id) = &path.id {
        properties.insert(String::from("id"), serde_json::Value::from(id.as_str()));
    }
    if let (Some(start), Some(end)) = (path.sequence.first_timestamp(), path.sequence.last_timestamp()) {
        properties.insert(String::from("start_timestamp"), serde_json::Value::from(start));
        properties.insert(String::from("end_timestamp"), serde_json::Value::from(end));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: path.id.clone().map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::{Coordinate, assemble};

    fn timed(id: Option<&str>, coordinates: &[(f64, f64)], timestamps: &[i64]) -> TimedPath {
        let coordinates: Vec<Coordinate> = coordinates
            .iter()
            .map(|(lon, lat)| Coordinate::new(*lon, *lat))
            .collect();
        TimedPath {
            id: id.map(String::from),
            sequence: assemble(&coordinates, timestamps).unwrap(),
        }
    }

    #[test]
    fn aggregate_reports_maximum_timestamp() {
        let output = shape_output(
            OutputShape::Aggregate,
            vec![
                timed(None, &[(0.0, 0.0), (0.0, 1.0)], &[0, 2783]),
                timed(None, &[(1.0, 1.0), (1.0, 1.1)], &[10, 300]),
            ],
            0,
        );

        match output {
            TripOutput::Aggregate {
                sequences,
                maximum_timestamp,
            } => {
                assert_eq!(sequences.len(), 2);
                assert_eq!(maximum_timestamp, 2783);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn aggregate_of_nothing_falls_back_to_start_time() {
        let output = shape_output(OutputShape::Aggregate, vec![], 1_000);
        assert_eq!(
            output,
            TripOutput::Aggregate {
                sequences: vec![],
                maximum_timestamp: 1_000
            }
        );
    }

    #[test]
    fn aggregate_json_shape() {
        let output = shape_output(
            OutputShape::Aggregate,
            vec![timed(None, &[(0.0, 0.0), (0.0, 1.0)], &[0, 2783])],
            0,
        );

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "sequences": [{
                    "waypoints": [
                        { "coordinates": [0.0, 0.0], "timestamp": 0 },
                        { "coordinates": [0.0, 1.0], "timestamp": 2783 }
                    ]
                }],
                "maximum_timestamp": 2783
            })
        );
    }

    #[test]
    fn flat_json_shape() {
        let output = shape_output(
            OutputShape::Flat,
            vec![timed(None, &[(2.0, 3.0)], &[5])],
            0,
        );

        assert_eq!(output.shape(), OutputShape::Flat);
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!([
                { "waypoints": [{ "coordinates": [2.0, 3.0], "timestamp": 5 }] }
            ])
        );
    }

    #[test]
    fn geometry_collection_carries_timestamps_as_third_ordinate() {
        let output = shape_output(
            OutputShape::GeometryCollection,
            vec![
                timed(Some("tram-96"), &[(144.96, -37.81), (144.97, -37.82)], &[100, 130]),
                timed(None, &[(145.0, -37.9)], &[200]),
            ],
            0,
        );

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "FeatureCollection");

        let line = &json["features"][0];
        assert_eq!(line["id"], "tram-96");
        assert_eq!(line["geometry"]["type"], "LineString");
        assert_eq!(
            line["geometry"]["coordinates"],
            serde_json::json!([[144.96, -37.81, 100.0], [144.97, -37.82, 130.0]])
        );
        assert_eq!(line["properties"]["start_timestamp"], 100);
        assert_eq!(line["properties"]["end_timestamp"], 130);

        let point = &json["features"][1];
        assert_eq!(point["geometry"]["type"], "Point");
        assert_eq!(
            point["geometry"]["coordinates"],
            serde_json::json!([145.0, -37.9, 200.0])
        );
    }
}

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::error::TripError;

/// A geographic `(longitude, latitude)` pair, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Coordinate { lon, lat }
    }
}

impl JsonSchema for Coordinate {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Coordinate")
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <[f64; 2]>::json_schema(generator)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Coordinate::new(value[0], value[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.lon, value.lat]
    }
}

impl From<geo_types::Coord> for Coordinate {
    fn from(value: geo_types::Coord) -> Self {
        Coordinate::new(value.x, value.y)
    }
}

impl From<geo_types::Point> for Coordinate {
    fn from(value: geo_types::Point) -> Self {
        Coordinate::new(value.x(), value.y())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Waypoint {
    pub coordinates: Coordinate,
    /// Seconds since the configured start time epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct WaypointSequence {
    pub waypoints: Vec<Waypoint>,
}

impl WaypointSequence {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        self.waypoints.first().map(|waypoint| waypoint.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.waypoints.last().map(|waypoint| waypoint.timestamp)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.waypoints.iter().map(|waypoint| waypoint.coordinates)
    }
}

/// Pairs each coordinate with the timestamp at the same position.
pub fn assemble(coordinates: &[Coordinate], timestamps: &[i64]) -> Result<WaypointSequence, TripError> {
    if coordinates.len() != timestamps.len() {
        return Err(TripError::LengthMismatch {
            coordinates: coordinates.len(),
            timestamps: timestamps.len(),
        });
    }

    let waypoints = coordinates
        .iter()
        .zip(timestamps)
        .map(|(coordinates, timestamp)| Waypoint {
            coordinates: *coordinates,
            timestamp: *timestamp,
        })
        .collect();

    Ok(WaypointSequence { waypoints })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_zip_coordinates_and_timestamps() {
        let coordinates = vec![Coordinate::new(144.96, -37.81), Coordinate::new(144.97, -37.82)];
        let sequence = assemble(&coordinates, &[0, 35]).unwrap();

        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.first_timestamp(), Some(0));
        assert_eq!(sequence.last_timestamp(), Some(35));
        assert_eq!(sequence.coordinates().collect::<Vec<_>>(), coordinates);
    }

    #[test]
    fn should_fail_on_length_mismatch() {
        let coordinates = vec![Coordinate::new(0.0, 0.0)];
        assert_eq!(
            assemble(&coordinates, &[0, 1]),
            Err(TripError::LengthMismatch {
                coordinates: 1,
                timestamps: 2
            })
        );
    }

    #[test]
    fn should_serialize_waypoints_as_lon_lat_arrays() {
        let sequence = assemble(&[Coordinate::new(1.5, -2.25)], &[42]).unwrap();
        let json = serde_json::to_value(&sequence).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "waypoints": [{ "coordinates": [1.5, -2.25], "timestamp": 42 }]
            })
        );
    }

    #[test]
    fn should_deserialize_coordinates() {
        let coordinate: Coordinate = serde_json::from_str("[144.9631, -37.8136]").unwrap();
        assert_eq!(coordinate, Coordinate::new(144.9631, -37.8136));
    }

    #[test]
    fn should_convert_from_geo_types() {
        let coordinate: Coordinate = geo_types::coord! { x: 1.0, y: 2.0 }.into();
        assert_eq!(coordinate, Coordinate::new(1.0, 2.0));
    }
}

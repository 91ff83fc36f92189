use thiserror::Error;

use crate::crs::Crs;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReprojectionError {
    #[error("Unknown reference system: {0}")]
    UnknownCrs(String),
    #[error("No transform defined from {from} to {to}")]
    UndefinedTransform { from: Crs, to: Crs },
    #[error("Coordinate ({lon}, {lat}) is outside the domain of {crs}")]
    OutOfDomain { lon: f64, lat: f64, crs: Crs },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Missing required option: {0}")]
    Missing(&'static str),
    #[error("Speed must be a finite positive number of meters per second, got {0}")]
    InvalidSpeed(f64),
    #[error("Unknown value for {name}: {value}")]
    UnknownOption { name: &'static str, value: String },
    #[error("Invalid reference system: {0}")]
    Crs(#[from] ReprojectionError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripError {
    #[error("Path has no coordinates")]
    EmptyPath,
    #[error("Speed must be a finite positive number of meters per second, got {0}")]
    InvalidSpeed(f64),
    #[error("Cannot assemble {coordinates} coordinates with {timestamps} timestamps")]
    LengthMismatch {
        coordinates: usize,
        timestamps: usize,
    },
    #[error("Path has no offset distance, required by the explicit start clock policy")]
    MissingOffsetDistance,
    #[error("Invalid offset distance: {0}")]
    InvalidOffsetDistance(f64),
    #[error("Clock overflowed after {start} seconds")]
    ClockOverflow { start: i64 },
    #[error(transparent)]
    Reprojection(#[from] ReprojectionError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Path {} failed: {source}", path_label(.index, .id))]
    Path {
        index: usize,
        id: Option<String>,
        #[source]
        source: Box<TripError>,
    },
}

impl TripError {
    /// The error that caused a path to fail, without the path context.
    pub fn root(&self) -> &TripError {
        match self {
            TripError::Path { source, .. } => source.root(),
            other => other,
        }
    }
}

fn path_label(index: &usize, id: &Option<String>) -> String {
    match id {
        Some(id) => format!("{index} ({id})"),
        None => index.to_string(),
    }
}

pub mod clock;
pub mod crs;
pub mod ellipsoid;
pub mod error;
pub mod integrator;
pub mod json;
pub mod output;
pub mod params;
pub mod projection;
pub mod reproject;
pub mod trip;
pub mod units;
pub mod waypoint;

pub use error::{ConfigurationError, ReprojectionError, TripError};
pub use params::{ClockPolicy, ErrorMode, OutputShape, TripConfig, TripParams};
pub use trip::{TripGenerator, TripPath, Trips};
pub use waypoint::{Coordinate, Waypoint, WaypointSequence};

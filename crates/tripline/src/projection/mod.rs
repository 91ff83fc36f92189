pub mod mercator;
pub mod transverse_mercator;

use crate::crs::{Crs, CrsDefinition};

pub use mercator::{Mercator, WebMercator};
pub use transverse_mercator::TransverseMercator;

/// Forward map projection from geographic degrees to planar meters.
pub trait Projection: Send + Sync {
    /// `(lon, lat)` in degrees to `(easting, northing)` in meters.
    ///
    /// Returns `None` when the coordinate is outside the projection's domain.
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)>;
}

/// The projection onto a planar reference system, `None` for geographic ones.
pub fn for_crs(crs: &Crs) -> Option<Box<dyn Projection>> {
    match crs.definition() {
        CrsDefinition::Geographic(_) => None,
        CrsDefinition::WebMercator => Some(Box::new(WebMercator)),
        CrsDefinition::Mercator(ellipsoid) => Some(Box::new(Mercator::new(*ellipsoid))),
        CrsDefinition::TransverseMercator(params) => {
            Some(Box::new(TransverseMercator::new(*params)))
        }
    }
}

/// Wraps a longitude difference into `[-180, 180)`.
pub(crate) fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

use std::f64::consts::FRAC_PI_4;

use crate::ellipsoid::Ellipsoid;

use super::Projection;

const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// EPSG:3857, the sphere-based Mercator used by web maps.
pub struct WebMercator;

impl Projection for WebMercator {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if lat.abs() >= 90.0 {
            return None;
        }

        let x = WEB_MERCATOR_RADIUS * lon.to_radians();
        let y = WEB_MERCATOR_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        Some((x, y))
    }
}

/// Ellipsoidal Mercator (EPSG:3395).
pub struct Mercator {
    semi_major_axis: f64,
    eccentricity: f64,
}

impl Mercator {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Mercator {
            semi_major_axis: ellipsoid.semi_major_axis(),
            eccentricity: ellipsoid.eccentricity(),
        }
    }
}

impl Projection for Mercator {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if lat.abs() >= 90.0 {
            return None;
        }

        let sin_lat = lat.to_radians().sin();
        let e = self.eccentricity;
        let isometric_latitude = sin_lat.atanh() - e * (e * sin_lat).atanh();

        Some((
            self.semi_major_axis * lon.to_radians(),
            self.semi_major_axis * isometric_latitude,
        ))
    }
}

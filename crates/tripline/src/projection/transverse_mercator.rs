//! Transverse Mercator using the Krüger n-series to sixth order.
//!
//! Accurate to well under a millimeter within a few thousand kilometers of
//! the central meridian. See Karney, "Transverse Mercator with an accuracy
//! of a few nanometers" (2011).

use std::f64::consts::FRAC_PI_2;

use crate::crs::TransverseMercatorParams;

use super::{Projection, normalize_longitude};

pub struct TransverseMercator {
    params: TransverseMercatorParams,
    eccentricity: f64,
    /// `k0 * A`, the scaled rectifying radius.
    scaled_radius: f64,
    alpha: [f64; 6],
}

impl TransverseMercator {
    pub fn new(params: TransverseMercatorParams) -> Self {
        let n = params.ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let rectifying_radius = params.ellipsoid.semi_major_axis() / (1.0 + n)
            * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        TransverseMercator {
            params,
            eccentricity: params.ellipsoid.eccentricity(),
            scaled_radius: params.scale_factor * rectifying_radius,
            alpha,
        }
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let lambda = normalize_longitude(lon - self.params.central_meridian).to_radians();
        if lambda.abs() >= FRAC_PI_2 || lat.abs() > 90.0 {
            return None;
        }

        let e = self.eccentricity;
        let sin_phi = lat.to_radians().sin();
        // tangent of the conformal latitude; infinite at the poles, which the
        // atan2 below maps onto the quarter meridian
        let t = (sin_phi.atanh() - e * (e * sin_phi).atanh()).sinh();

        let xi_prime = t.atan2(lambda.cos());
        let eta_prime = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        Some((
            self.params.false_easting + self.scaled_radius * eta,
            self.params.false_northing + self.scaled_radius * xi,
        ))
    }
}

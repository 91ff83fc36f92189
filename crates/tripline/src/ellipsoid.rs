/// Reference ellipsoid described by its semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    semi_major_axis: f64,
    inverse_flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_223_563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
    };

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// Third flattening `n = f / (2 - f)`.
    pub fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    /// First eccentricity `e = sqrt(f * (2 - f))`.
    pub fn eccentricity(&self) -> f64 {
        let f = self.flattening();
        (f * (2.0 - f)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_wgs84_constants() {
        let e = Ellipsoid::WGS84.eccentricity();
        assert!((e - 0.081_819_190_842_6).abs() < 1e-12, "got {e}");

        let n = Ellipsoid::WGS84.third_flattening();
        assert!((n - 0.001_679_220_386_4).abs() < 1e-12, "got {n}");
    }

    #[test]
    fn grs80_differs_from_wgs84_only_in_flattening() {
        assert_eq!(
            Ellipsoid::GRS80.semi_major_axis(),
            Ellipsoid::WGS84.semi_major_axis()
        );
        assert_ne!(Ellipsoid::GRS80.flattening(), Ellipsoid::WGS84.flattening());
    }
}

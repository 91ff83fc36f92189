use crate::{
    crs::Crs,
    error::ReprojectionError,
    projection::{self, Projection},
    waypoint::Coordinate,
};

/// A point in a planar reference system, in meters.
///
/// Only used to measure distances; never part of the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCoordinate {
    point: geo::Point,
}

impl ProjectedCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: geo::Point::new(x, y),
        }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }
}

impl From<ProjectedCoordinate> for geo::Point {
    fn from(value: ProjectedCoordinate) -> Self {
        value.point
    }
}

/// Converts geographic coordinates into a planar reference system.
///
/// The projection constants for the source/target pair are resolved once at
/// construction and reused by every call.
pub struct Reprojector {
    source: Crs,
    target: Crs,
    projection: Box<dyn Projection>,
}

impl Reprojector {
    pub fn new(source: Crs, target: Crs) -> Result<Self, ReprojectionError> {
        let undefined = || ReprojectionError::UndefinedTransform {
            from: source,
            to: target,
        };

        if !source.is_geographic() {
            return Err(undefined());
        }

        let projection = projection::for_crs(&target).ok_or_else(undefined)?;

        Ok(Self {
            source,
            target,
            projection,
        })
    }

    pub fn source(&self) -> &Crs {
        &self.source
    }

    pub fn target(&self) -> &Crs {
        &self.target
    }

    pub fn project(&self, coordinate: &Coordinate) -> Result<ProjectedCoordinate, ReprojectionError> {
        let out_of_domain = || ReprojectionError::OutOfDomain {
            lon: coordinate.lon,
            lat: coordinate.lat,
            crs: self.target,
        };

        if !coordinate.lon.is_finite() || !coordinate.lat.is_finite() || coordinate.lat.abs() > 90.0
        {
            return Err(out_of_domain());
        }

        match self.projection.forward(coordinate.lon, coordinate.lat) {
            Some((x, y)) if x.is_finite() && y.is_finite() => Ok(ProjectedCoordinate::new(x, y)),
            _ => Err(out_of_domain()),
        }
    }

    pub fn project_all(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<Vec<ProjectedCoordinate>, ReprojectionError> {
        coordinates.iter().map(|c| self.project(c)).collect()
    }
}

/// Projects a single coordinate between two reference systems given by their
/// identifiers, e.g. `"EPSG:4326"` and `"EPSG:28355"`.
pub fn project(
    coordinate: &Coordinate,
    source_crs: &str,
    target_crs: &str,
) -> Result<ProjectedCoordinate, ReprojectionError> {
    Reprojector::new(source_crs.parse()?, target_crs.parse()?)?.project(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::{WEB_MERCATOR, WGS84};

    #[test]
    fn should_project_to_web_mercator() {
        let projected = project(&Coordinate::new(0.0, 1.0), "EPSG:4326", "EPSG:3857").unwrap();
        assert!(projected.x().abs() < 1e-9);
        assert!((projected.y() - 111_325.142_866).abs() < 1e-3);
    }

    #[test]
    fn should_keep_longitude_first_for_utm() {
        let projected = project(&Coordinate::new(3.0, 45.0), "EPSG:4326", "EPSG:32631").unwrap();
        assert!((projected.x() - 500_000.0).abs() < 1e-3);
        assert!((projected.y() - 4_982_950.400_227).abs() < 1e-3);
    }

    #[test]
    fn should_fail_on_unknown_target() {
        assert_eq!(
            project(&Coordinate::new(0.0, 0.0), "EPSG:4326", "EPSG:0"),
            Err(ReprojectionError::UnknownCrs(String::from("EPSG:0")))
        );
    }

    #[test]
    fn should_fail_on_unknown_source() {
        assert!(matches!(
            project(&Coordinate::new(0.0, 0.0), "WGS84", "EPSG:3857"),
            Err(ReprojectionError::UnknownCrs(_))
        ));
    }

    #[test]
    fn should_fail_when_target_is_geographic() {
        assert_eq!(
            Reprojector::new(WGS84, WGS84).err(),
            Some(ReprojectionError::UndefinedTransform {
                from: WGS84,
                to: WGS84
            })
        );
    }

    #[test]
    fn should_fail_when_source_is_planar() {
        assert!(matches!(
            Reprojector::new(WEB_MERCATOR, WEB_MERCATOR),
            Err(ReprojectionError::UndefinedTransform { .. })
        ));
    }

    #[test]
    fn should_fail_outside_the_domain() {
        let reprojector = Reprojector::new(WGS84, WEB_MERCATOR).unwrap();
        assert!(matches!(
            reprojector.project(&Coordinate::new(0.0, 90.0)),
            Err(ReprojectionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            reprojector.project(&Coordinate::new(f64::NAN, 0.0)),
            Err(ReprojectionError::OutOfDomain { .. })
        ));
        assert!(matches!(
            reprojector.project(&Coordinate::new(0.0, 91.0)),
            Err(ReprojectionError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn project_all_keeps_order() {
        let reprojector = Reprojector::new(WGS84, WEB_MERCATOR).unwrap();
        let projected = reprojector
            .project_all(&[Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)])
            .unwrap();
        assert_eq!(projected.len(), 2);
        assert!(projected[0].x() < projected[1].x());
    }
}

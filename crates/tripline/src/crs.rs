use std::{fmt, str::FromStr};

use crate::{ellipsoid::Ellipsoid, error::ReprojectionError};

/// A coordinate reference system resolved from its EPSG code.
///
/// Axis order is always longitude/x first, whatever order the EPSG
/// registry declares for the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crs {
    code: u32,
    definition: CrsDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrsDefinition {
    Geographic(Ellipsoid),
    /// Spherical "pseudo" Mercator used by web maps.
    WebMercator,
    Mercator(Ellipsoid),
    TransverseMercator(TransverseMercatorParams),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercatorParams {
    pub ellipsoid: Ellipsoid,
    /// Longitude of the central meridian, in degrees.
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl TransverseMercatorParams {
    pub fn utm(zone: u32, south: bool, ellipsoid: Ellipsoid) -> Self {
        TransverseMercatorParams {
            ellipsoid,
            central_meridian: zone as f64 * 6.0 - 183.0,
            scale_factor: 0.9996,
            false_easting: 500_000.0,
            false_northing: if south { 10_000_000.0 } else { 0.0 },
        }
    }
}

pub const WGS84: Crs = Crs {
    code: 4326,
    definition: CrsDefinition::Geographic(Ellipsoid::WGS84),
};

pub const WEB_MERCATOR: Crs = Crs {
    code: 3857,
    definition: CrsDefinition::WebMercator,
};

impl Crs {
    pub fn from_epsg(code: u32) -> Result<Crs, ReprojectionError> {
        let definition = match code {
            4326 => CrsDefinition::Geographic(Ellipsoid::WGS84),
            // GDA94 and GDA2020
            4283 | 7844 => CrsDefinition::Geographic(Ellipsoid::GRS80),
            3857 | 3785 | 900913 | 102100 => CrsDefinition::WebMercator,
            3395 => CrsDefinition::Mercator(Ellipsoid::WGS84),
            32601..=32660 => CrsDefinition::TransverseMercator(TransverseMercatorParams::utm(
                code - 32600,
                false,
                Ellipsoid::WGS84,
            )),
            32701..=32760 => CrsDefinition::TransverseMercator(TransverseMercatorParams::utm(
                code - 32700,
                true,
                Ellipsoid::WGS84,
            )),
            // GDA94 / MGA zones 48 to 58
            28348..=28358 => CrsDefinition::TransverseMercator(TransverseMercatorParams::utm(
                code - 28300,
                true,
                Ellipsoid::GRS80,
            )),
            // GDA2020 / MGA zones 46 to 59
            7846..=7859 => CrsDefinition::TransverseMercator(TransverseMercatorParams::utm(
                code - 7800,
                true,
                Ellipsoid::GRS80,
            )),
            _ => return Err(ReprojectionError::UnknownCrs(format!("EPSG:{code}"))),
        };

        Ok(Crs { code, definition })
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn definition(&self) -> &CrsDefinition {
        &self.definition
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self.definition, CrsDefinition::Geographic(_))
    }

    pub fn is_planar(&self) -> bool {
        !self.is_geographic()
    }
}

impl FromStr for Crs {
    type Err = ReprojectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();

        if upper == "CRS84" || upper == "OGC:CRS84" || upper == "URN:OGC:DEF:CRS:OGC:1.3:CRS84" {
            return Ok(WGS84);
        }

        let code = upper
            .strip_prefix("URN:OGC:DEF:CRS:EPSG::")
            .or_else(|| upper.strip_prefix("EPSG:"))
            .and_then(|code| code.parse::<u32>().ok())
            .ok_or_else(|| ReprojectionError::UnknownCrs(trimmed.to_owned()))?;

        Crs::from_epsg(code)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.code)
    }
}

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    crs::Crs,
    error::{ConfigurationError, ReprojectionError},
    units::MetersPerSecond,
};

/// How the clock carries over between the paths of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClockPolicy {
    /// One clock runs through every path in input order, as a single journey.
    #[default]
    Continuing,
    /// Every path starts at `start_time` plus the travel time of its own
    /// offset distance, as independent trips leaving a common origin.
    ExplicitStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// Sequences plus the maximum timestamp of the batch.
    #[default]
    Aggregate,
    /// GeoJSON feature collection with `[lon, lat, timestamp]` positions.
    GeometryCollection,
    /// Sequences only.
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// The first failing path fails the batch.
    #[default]
    Abort,
    /// Failing paths are left out and reported.
    Skip,
}

fn parse_option<T>(name: &'static str, value: &str, variants: &[(&str, T)]) -> Result<T, ConfigurationError>
where
    T: Copy,
{
    let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
    variants
        .iter()
        .find(|(variant, _)| *variant == normalized)
        .map(|(_, parsed)| *parsed)
        .ok_or_else(|| ConfigurationError::UnknownOption {
            name,
            value: value.to_owned(),
        })
}

impl FromStr for ClockPolicy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(
            "clock_policy",
            s,
            &[
                ("continuing", ClockPolicy::Continuing),
                ("explicit_start", ClockPolicy::ExplicitStart),
            ],
        )
    }
}

impl FromStr for OutputShape {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(
            "output_shape",
            s,
            &[
                ("aggregate", OutputShape::Aggregate),
                ("geometry_collection", OutputShape::GeometryCollection),
                ("flat", OutputShape::Flat),
            ],
        )
    }
}

impl FromStr for ErrorMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(
            "error_mode",
            s,
            &[("abort", ErrorMode::Abort), ("skip", ErrorMode::Skip)],
        )
    }
}

/// User facing options of a batch, as read from a config file or flags.
///
/// There is deliberately no default speed: callers must state one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TripParams {
    pub speed_m_per_s: Option<f64>,
    /// Epoch seconds of the first waypoint, 0 when unset.
    pub start_time: Option<i64>,
    pub source_crs: Option<String>,
    pub target_crs: Option<String>,
    #[serde(default)]
    pub clock_policy: ClockPolicy,
    #[serde(default)]
    pub output_shape: OutputShape,
    #[serde(default)]
    pub error_mode: ErrorMode,
}

/// Validated batch configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripConfig {
    pub speed: MetersPerSecond,
    pub start_time: i64,
    pub source_crs: Crs,
    pub target_crs: Crs,
    pub clock_policy: ClockPolicy,
    pub output_shape: OutputShape,
    pub error_mode: ErrorMode,
}

impl TripParams {
    pub fn validate(&self) -> Result<TripConfig, ConfigurationError> {
        let speed = self
            .speed_m_per_s
            .map(MetersPerSecond::new)
            .ok_or(ConfigurationError::Missing("speed_m_per_s"))?;
        if !speed.is_valid() {
            return Err(ConfigurationError::InvalidSpeed(speed.value()));
        }

        let source_crs: Crs = self
            .source_crs
            .as_deref()
            .ok_or(ConfigurationError::Missing("source_crs"))?
            .parse()?;
        let target_crs: Crs = self
            .target_crs
            .as_deref()
            .ok_or(ConfigurationError::Missing("target_crs"))?
            .parse()?;

        if !source_crs.is_geographic() || !target_crs.is_planar() {
            return Err(ReprojectionError::UndefinedTransform {
                from: source_crs,
                to: target_crs,
            }
            .into());
        }

        Ok(TripConfig {
            speed,
            start_time: self.start_time.unwrap_or(0),
            source_crs,
            target_crs,
            clock_policy: self.clock_policy,
            output_shape: self.output_shape,
            error_mode: self.error_mode,
        })
    }
}

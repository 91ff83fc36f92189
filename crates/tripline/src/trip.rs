use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    clock::{ClockState, explicit_start},
    error::{ConfigurationError, TripError},
    integrator::integrate,
    output::{TimedPath, TripOutput, shape_output},
    params::{ClockPolicy, ErrorMode, TripConfig, TripParams},
    reproject::Reprojector,
    units::Meters,
    waypoint::{Coordinate, WaypointSequence, assemble},
};

/// One trip's geometry as handed over by the caller.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TripPath {
    pub id: Option<String>,
    pub coordinates: Vec<Coordinate>,
    /// Distance of the path from the shared origin, used by the explicit
    /// start clock policy.
    pub offset_distance: Option<Meters>,
}

impl TripPath {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        TripPath {
            coordinates,
            ..TripPath::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_offset_distance(mut self, offset_distance: Meters) -> Self {
        self.offset_distance = Some(offset_distance);
        self
    }
}

impl From<geo_types::LineString> for TripPath {
    fn from(value: geo_types::LineString) -> Self {
        TripPath::new(value.0.into_iter().map(Coordinate::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPath {
    pub index: usize,
    pub id: Option<String>,
    pub error: TripError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripSummary {
    pub paths: usize,
    pub waypoints: usize,
    pub skipped: usize,
    pub earliest_timestamp: Option<i64>,
    pub latest_timestamp: Option<i64>,
}

impl TripSummary {
    fn from_paths(paths: &[TimedPath], skipped: usize) -> Self {
        let timestamps = || {
            paths
                .iter()
                .flat_map(|path| path.sequence.waypoints.iter())
                .map(|waypoint| waypoint.timestamp)
        };

        TripSummary {
            paths: paths.len(),
            waypoints: paths.iter().map(|path| path.sequence.len()).sum(),
            skipped,
            earliest_timestamp: timestamps().min(),
            latest_timestamp: timestamps().max(),
        }
    }
}

/// Result of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Trips {
    pub output: TripOutput,
    pub skipped: Vec<SkippedPath>,
    pub summary: TripSummary,
}

/// Turns paths into timed waypoint sequences.
///
/// Every call to [`TripGenerator::generate`] is an independent batch with its
/// own clock, so a generator can be reused across batches.
pub struct TripGenerator {
    config: TripConfig,
    reprojector: Reprojector,
}

impl TripGenerator {
    pub fn new(config: TripConfig) -> Result<Self, ConfigurationError> {
        if !config.speed.is_valid() {
            return Err(ConfigurationError::InvalidSpeed(config.speed.value()));
        }

        let reprojector = Reprojector::new(config.source_crs, config.target_crs)?;

        Ok(TripGenerator {
            config,
            reprojector,
        })
    }

    pub fn from_params(params: &TripParams) -> Result<Self, ConfigurationError> {
        TripGenerator::new(params.validate()?)
    }

    pub fn config(&self) -> &TripConfig {
        &self.config
    }

    /// Timestamps a single path starting at `start_clock`.
    pub fn time_path(&self, path: &TripPath, start_clock: i64) -> Result<WaypointSequence, TripError> {
        if path.coordinates.is_empty() {
            return Err(TripError::EmptyPath);
        }

        let projected = self.reprojector.project_all(&path.coordinates)?;
        let timestamps = integrate(&projected, self.config.speed, start_clock)?;

        assemble(&path.coordinates, &timestamps)
    }

    fn explicit_start_clock(&self, path: &TripPath) -> Result<i64, TripError> {
        let offset = path
            .offset_distance
            .ok_or(TripError::MissingOffsetDistance)?;
        if !offset.value().is_finite() || offset.value() < 0.0 {
            return Err(TripError::InvalidOffsetDistance(offset.value()));
        }

        explicit_start(self.config.start_time, offset, self.config.speed)
    }

    #[instrument(skip_all, fields(paths = paths.len(), policy = ?self.config.clock_policy))]
    pub fn generate(&self, paths: &[TripPath]) -> Result<Trips, TripError> {
        let mut timed = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        match self.config.clock_policy {
            ClockPolicy::Continuing => {
                let mut clock = ClockState::new(self.config.start_time);

                for (index, path) in paths.iter().enumerate() {
                    match self.time_path(path, clock.current()) {
                        Ok(sequence) => {
                            if let Some(terminal) = sequence.last_timestamp() {
                                clock = clock.advance(terminal);
                            }
                            debug!(index, waypoints = sequence.len(), clock = clock.current(), "Timed path");
                            timed.push(TimedPath {
                                id: path.id.clone(),
                                sequence,
                            });
                        }
                        Err(error) => self.handle_failure(index, path, error, &mut skipped)?,
                    }
                }
            }
            ClockPolicy::ExplicitStart => {
                let results: Vec<Result<WaypointSequence, TripError>> = paths
                    .par_iter()
                    .map(|path| {
                        let start_clock = self.explicit_start_clock(path)?;
                        self.time_path(path, start_clock)
                    })
                    .collect();

                for (index, (path, result)) in paths.iter().zip(results).enumerate() {
                    match result {
                        Ok(sequence) => {
                            debug!(index, waypoints = sequence.len(), start = ?sequence.first_timestamp(), "Timed path");
                            timed.push(TimedPath {
                                id: path.id.clone(),
                                sequence,
                            });
                        }
                        Err(error) => self.handle_failure(index, path, error, &mut skipped)?,
                    }
                }
            }
        }

        let summary = TripSummary::from_paths(&timed, skipped.len());
        info!(
            "Generated {} trips with {} waypoints, skipped {}",
            summary.paths, summary.waypoints, summary.skipped
        );

        Ok(Trips {
            output: shape_output(self.config.output_shape, timed, self.config.start_time),
            skipped,
            summary,
        })
    }

    fn handle_failure(
        &self,
        index: usize,
        path: &TripPath,
        error: TripError,
        skipped: &mut Vec<SkippedPath>,
    ) -> Result<(), TripError> {
        match self.config.error_mode {
            ErrorMode::Abort => Err(TripError::Path {
                index,
                id: path.id.clone(),
                source: Box::new(error),
            }),
            ErrorMode::Skip => {
                warn!(index, id = ?path.id, "Skipping path: {}", error);
                skipped.push(SkippedPath {
                    index,
                    id: path.id.clone(),
                    error,
                });
                Ok(())
            }
        }
    }
}

/// Validates `params` and runs a single batch.
pub fn generate_trips(paths: &[TripPath], params: &TripParams) -> Result<Trips, TripError> {
    TripGenerator::from_params(params)?.generate(paths)
}

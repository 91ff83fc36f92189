use crate::{
    error::TripError,
    units::{Meters, MetersPerSecond},
};

/// The elapsed time carried from one path to the next under the continuing
/// clock policy.
///
/// A clock is owned by a single batch: it starts unseeded at the batch epoch
/// and is seeded by every path that completes, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Unseeded { epoch: i64 },
    Seeded { current: i64 },
}

impl ClockState {
    pub fn new(epoch: i64) -> Self {
        ClockState::Unseeded { epoch }
    }

    /// The clock value the next path starts at.
    pub fn current(&self) -> i64 {
        match self {
            ClockState::Unseeded { epoch } => *epoch,
            ClockState::Seeded { current } => *current,
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, ClockState::Seeded { .. })
    }

    /// Records the terminal timestamp of the path that just completed.
    pub fn advance(self, terminal: i64) -> ClockState {
        debug_assert!(
            terminal >= self.current(),
            "clock moved backwards from {} to {terminal}",
            self.current()
        );
        ClockState::Seeded { current: terminal }
    }
}

/// Start clock of a path departing `offset` meters away from the shared
/// origin, for the explicit start policy.
pub fn explicit_start(
    start_time: i64,
    offset: Meters,
    speed: MetersPerSecond,
) -> Result<i64, TripError> {
    start_time
        .checked_add(offset / speed)
        .ok_or(TripError::ClockOverflow { start: start_time })
}

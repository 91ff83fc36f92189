use std::ops::Div;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize, JsonSchema)]
pub struct Meters(f64);

impl Meters {
    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Meters {
    fn from(value: f64) -> Self {
        Meters::new(value)
    }
}

/// Whole seconds needed to cover the distance, truncated toward zero.
///
/// Hops shorter than one second of travel contribute nothing.
impl Div<MetersPerSecond> for Meters {
    type Output = i64;

    fn div(self, speed: MetersPerSecond) -> i64 {
        (self.0 / speed.value()).floor() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize, JsonSchema)]
pub struct MetersPerSecond(f64);

impl MetersPerSecond {
    pub fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl From<f64> for MetersPerSecond {
    fn from(value: f64) -> Self {
        MetersPerSecond::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_truncate_travel_time() {
        assert_eq!(Meters::new(111_320.0) / MetersPerSecond::new(40.0), 2783);
        assert_eq!(Meters::new(39.99) / MetersPerSecond::new(40.0), 0);
        assert_eq!(Meters::new(80.0) / MetersPerSecond::new(40.0), 2);
    }

    #[test]
    fn should_validate_speed() {
        assert!(MetersPerSecond::new(10.0).is_valid());
        assert!(!MetersPerSecond::new(0.0).is_valid());
        assert!(!MetersPerSecond::new(-3.0).is_valid());
        assert!(!MetersPerSecond::new(f64::NAN).is_valid());
        assert!(!MetersPerSecond::new(f64::INFINITY).is_valid());
    }
}

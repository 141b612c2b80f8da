//! Voltage/frequency curve domain types

use crate::domain::{QueryResult, Status};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive frequency range in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FreqRange {
    pub lower_bound: u64,
    pub upper_bound: u64,
}

impl FreqRange {
    pub fn new(lower_bound: u64, upper_bound: u64) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }
}

impl fmt::Display for FreqRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} MHz",
            self.lower_bound / 1_000_000,
            self.upper_bound / 1_000_000
        )
    }
}

/// One point of the voltage curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VddcPoint {
    /// Frequency in Hz
    pub frequency: u64,
    /// Voltage in mV
    pub voltage: u64,
}

impl VddcPoint {
    pub fn new(frequency: u64, voltage: u64) -> Self {
        Self { frequency, voltage }
    }
}

/// Overdrive voltage/frequency curve
///
/// Two groups of range scalars (system clock and memory clock) plus an
/// owned list of curve points. `num_regions` always equals `points.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoltCurve {
    pub status: Status,
    pub num_regions: u32,
    /// Current system clock range
    pub curr_sclk_range: FreqRange,
    /// Allowed system clock limits
    pub sclk_limits: FreqRange,
    /// Current memory clock range
    pub curr_mclk_range: FreqRange,
    /// Allowed memory clock limits
    pub mclk_limits: FreqRange,
    pub points: Vec<VddcPoint>,
}

impl VoltCurve {
    pub fn new(
        status: Status,
        curr_sclk_range: FreqRange,
        sclk_limits: FreqRange,
        curr_mclk_range: FreqRange,
        mclk_limits: FreqRange,
        points: Vec<VddcPoint>,
    ) -> Self {
        Self {
            status,
            num_regions: points.len() as u32,
            curr_sclk_range,
            sclk_limits,
            curr_mclk_range,
            mclk_limits,
            points,
        }
    }
}

impl QueryResult for VoltCurve {
    fn neutral(status: Status) -> Self {
        Self::new(
            status,
            FreqRange::default(),
            FreqRange::default(),
            FreqRange::default(),
            FreqRange::default(),
            Vec::new(),
        )
    }

    fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_regions_follows_points() {
        let curve = VoltCurve::new(
            Status::Success,
            FreqRange::new(500_000_000, 2_000_000_000),
            FreqRange::new(500_000_000, 2_500_000_000),
            FreqRange::new(100_000_000, 1_000_000_000),
            FreqRange::new(100_000_000, 1_200_000_000),
            vec![VddcPoint::new(800_000_000, 750), VddcPoint::new(1_800_000_000, 1100)],
        );
        assert_eq!(curve.num_regions, 2);
    }

    #[test]
    fn test_neutral_curve() {
        let curve = VoltCurve::neutral(Status::NotSupported);
        assert_eq!(curve.num_regions, 0);
        assert!(curve.points.is_empty());
        assert_eq!(curve.sclk_limits, FreqRange::default());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(
            FreqRange::new(500_000_000, 2_100_000_000).to_string(),
            "500-2100 MHz"
        );
    }
}

//! Power domain types
//!
//! All power values are in microwatts, as ROCm SMI reports them.

use crate::domain::{QueryResult, Status};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed power cap range in microwatts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerCapRange {
    pub min: u64,
    pub max: u64,
}

/// The reads behind [`PowerReading`], in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerStep {
    SensorCount,
    SensorPower,
    SensorCap,
    DefaultCap,
    CapRange,
}

impl fmt::Display for PowerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorCount => write!(f, "sensor count"),
            Self::SensorPower => write!(f, "sensor power"),
            Self::SensorCap => write!(f, "sensor cap"),
            Self::DefaultCap => write!(f, "default cap"),
            Self::CapRange => write!(f, "cap range"),
        }
    }
}

/// Power draw and caps of one device
///
/// Filled by a chain of reads that stops at the first failure. Fields read
/// before the failing step keep their values and `failed_step` names the
/// step that failed. The per-sensor sequences are either empty or exactly
/// `sensor_count` long: a sensor loop that fails partway keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerReading {
    pub status: Status,
    pub sensor_count: u16,
    /// Average power per sensor, indexed by sensor
    pub power_per_sensor: Vec<u64>,
    /// Mean of `power_per_sensor`
    pub average_power: u64,
    /// Current power cap per sensor, indexed by sensor
    pub cap_per_sensor: Vec<u64>,
    pub default_cap: u64,
    pub cap_range: PowerCapRange,
    pub failed_step: Option<PowerStep>,
}

impl PowerReading {
    /// Whether `step` ran and succeeded, so the fields it fills are valid
    pub fn completed(&self, step: PowerStep) -> bool {
        match self.failed_step {
            Some(failed) => failed > step,
            None => self.status.is_success(),
        }
    }

    /// Mean of the per-sensor readings, 0 without sensors
    pub fn mean(power_per_sensor: &[u64]) -> u64 {
        if power_per_sensor.is_empty() {
            return 0;
        }
        let total: u128 = power_per_sensor.iter().map(|&p| u128::from(p)).sum();
        (total / power_per_sensor.len() as u128) as u64
    }
}

impl QueryResult for PowerReading {
    fn neutral(status: Status) -> Self {
        Self {
            status,
            sensor_count: 0,
            power_per_sensor: Vec::new(),
            average_power: 0,
            cap_per_sensor: Vec::new(),
            default_cap: 0,
            cap_range: PowerCapRange::default(),
            failed_step: None,
        }
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// Microwatts as watts
pub fn watts(microwatts: u64) -> f64 {
    microwatts as f64 / 1_000_000.0
}

//! Utilization and performance domain types
//!
//! Fixed-size results: busy percent, activity counters, performance level
//! and overdrive levels.

use crate::domain::{QueryResult, Status};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU busy percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusyPercent {
    pub status: Status,
    pub percent: u32,
}

impl BusyPercent {
    /// Build from an adapter reply; a failed reply keeps only its status
    pub fn from_reply(status: Status, percent: u32) -> Self {
        if status.is_success() {
            Self { status, percent }
        } else {
            Self::neutral(status)
        }
    }
}

impl QueryResult for BusyPercent {
    fn neutral(status: Status) -> Self {
        Self { status, percent: 0 }
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// Coarse-grain graphics and memory activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UtilizationCounters {
    pub status: Status,
    /// Accumulated graphics activity
    pub gfx_activity: u64,
    /// Accumulated memory activity
    pub mem_activity: u64,
    /// Timestamp the counters were sampled at (ns)
    pub timestamp: u64,
}

impl UtilizationCounters {
    /// Build from an adapter reply; a failed reply keeps only its status
    pub fn from_reply(status: Status, gfx_activity: u64, mem_activity: u64, timestamp: u64) -> Self {
        if status.is_success() {
            Self {
                status,
                gfx_activity,
                mem_activity,
                timestamp,
            }
        } else {
            Self::neutral(status)
        }
    }
}

impl QueryResult for UtilizationCounters {
    fn neutral(status: Status) -> Self {
        Self {
            status,
            gfx_activity: 0,
            mem_activity: 0,
            timestamp: 0,
        }
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// Performance level (`rsmi_dev_perf_level_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerfLevel {
    /// Driver-managed clocks
    Auto,
    /// Clocks pinned to lowest level
    Low,
    /// Clocks pinned to highest level
    High,
    /// User-selected clock levels
    Manual,
    /// Stable power state with profiling clocks
    StableStd,
    /// Stable power state with peak clocks
    StablePeak,
    /// Stable power state with minimum memory clock
    StableMinMclk,
    /// Stable power state with minimum system clock
    StableMinSclk,
    /// Performance determinism
    Determinism,
    /// Library reported an unknown level
    Unknown,
    /// Value outside the known table
    Other(u32),
}

impl PerfLevel {
    /// Create from raw ROCm SMI value
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => Self::Auto,
            1 => Self::Low,
            2 => Self::High,
            3 => Self::Manual,
            4 => Self::StableStd,
            5 => Self::StablePeak,
            6 => Self::StableMinMclk,
            7 => Self::StableMinSclk,
            8 => Self::Determinism,
            0x100 => Self::Unknown,
            other => Self::Other(other),
        }
    }

    /// Get the raw value
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Auto => 0,
            Self::Low => 1,
            Self::High => 2,
            Self::Manual => 3,
            Self::StableStd => 4,
            Self::StablePeak => 5,
            Self::StableMinMclk => 6,
            Self::StableMinSclk => 7,
            Self::Determinism => 8,
            Self::Unknown => 0x100,
            Self::Other(raw) => *raw,
        }
    }
}

impl fmt::Display for PerfLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
            Self::Manual => write!(f, "manual"),
            Self::StableStd => write!(f, "stable_std"),
            Self::StablePeak => write!(f, "stable_peak"),
            Self::StableMinMclk => write!(f, "stable_min_mclk"),
            Self::StableMinSclk => write!(f, "stable_min_sclk"),
            Self::Determinism => write!(f, "determinism"),
            Self::Unknown => write!(f, "unknown"),
            Self::Other(raw) => write!(f, "level {}", raw),
        }
    }
}

/// Performance level query result
///
/// The neutral level is raw 0 decoded as-is, so a failed query reads as
/// [`PerfLevel::Auto`]; check `status` before trusting `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerfLevelReading {
    pub status: Status,
    pub level: PerfLevel,
}

impl PerfLevelReading {
    /// Build from an adapter reply; a failed reply keeps only its status
    pub fn from_reply(status: Status, raw_level: u32) -> Self {
        if status.is_success() {
            Self {
                status,
                level: PerfLevel::from_raw(raw_level),
            }
        } else {
            Self::neutral(status)
        }
    }
}

impl QueryResult for PerfLevelReading {
    fn neutral(status: Status) -> Self {
        Self {
            status,
            level: PerfLevel::from_raw(0),
        }
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// The two reads behind [`OverdriveLevels`], in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdriveStep {
    Graphics,
    Memory,
}

impl fmt::Display for OverdriveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graphics => write!(f, "graphics"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Graphics and memory overdrive levels (percent over default clocks)
///
/// Filled by two sequential reads. `failed_step` names the read that
/// failed; when it is [`OverdriveStep::Memory`], `graphics` holds the
/// successfully read value while `status` reports the memory failure.
/// A failed status with no `failed_step` means no read was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverdriveLevels {
    pub status: Status,
    pub graphics: u32,
    pub memory: u32,
    pub failed_step: Option<OverdriveStep>,
}

impl OverdriveLevels {
    /// Both reads succeeded
    pub fn read(graphics: u32, memory: u32) -> Self {
        Self {
            status: Status::Success,
            graphics,
            memory,
            failed_step: None,
        }
    }

    /// The graphics read failed with `status`
    pub fn graphics_failed(status: Status) -> Self {
        Self {
            failed_step: Some(OverdriveStep::Graphics),
            ..Self::neutral(status)
        }
    }

    /// The memory read failed with `status` after graphics read `graphics`
    pub fn memory_failed(status: Status, graphics: u32) -> Self {
        Self {
            graphics,
            failed_step: Some(OverdriveStep::Memory),
            ..Self::neutral(status)
        }
    }

    /// The graphics level, if its read succeeded
    pub fn graphics_level(&self) -> Option<u32> {
        match (self.status.is_success(), self.failed_step) {
            (true, _) | (false, Some(OverdriveStep::Memory)) => Some(self.graphics),
            _ => None,
        }
    }

    /// The memory level, if its read succeeded
    pub fn memory_level(&self) -> Option<u32> {
        self.status.is_success().then_some(self.memory)
    }
}

impl QueryResult for OverdriveLevels {
    fn neutral(status: Status) -> Self {
        Self {
            status,
            graphics: 0,
            memory: 0,
            failed_step: None,
        }
    }

    fn status(&self) -> Status {
        self.status
    }
}

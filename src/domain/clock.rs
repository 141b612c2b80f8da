//! Clock domain and supported frequency list

use crate::domain::{QueryResult, Status};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock domain selector (`rsmi_clk_type_t`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockDomain {
    /// System (graphics) clock
    Sys,
    /// Data fabric clock
    Df,
    /// Display controller engine clock
    Dcef,
    /// SoC clock
    Soc,
    /// Memory clock
    Mem,
    /// PCIe clock
    Pcie,
}

impl ClockDomain {
    pub const ALL: [ClockDomain; 6] = [
        Self::Sys,
        Self::Df,
        Self::Dcef,
        Self::Soc,
        Self::Mem,
        Self::Pcie,
    ];

    /// Get the raw `rsmi_clk_type_t` value
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Sys => 0,
            Self::Df => 1,
            Self::Dcef => 2,
            Self::Soc => 3,
            Self::Mem => 4,
            Self::Pcie => 5,
        }
    }
}

impl fmt::Display for ClockDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sys => "sys",
            Self::Df => "df",
            Self::Dcef => "dcef",
            Self::Soc => "soc",
            Self::Mem => "mem",
            Self::Pcie => "pcie",
        };
        f.write_str(name)
    }
}

/// Supported frequencies of one clock domain
///
/// `frequencies` is owned by the result and `num_supported` always equals
/// its length. `current` indexes the currently selected frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequencies {
    pub status: Status,
    pub num_supported: u32,
    pub current: u32,
    /// Supported frequencies in Hz, in the order the driver lists them
    pub frequencies: Vec<u64>,
}

impl Frequencies {
    /// Build a result around an already materialized frequency list
    pub fn new(status: Status, current: u32, frequencies: Vec<u64>) -> Self {
        Self {
            status,
            num_supported: frequencies.len() as u32,
            current,
            frequencies,
        }
    }

    /// The currently selected frequency in Hz, if `current` is in range
    pub fn current_frequency(&self) -> Option<u64> {
        self.frequencies.get(self.current as usize).copied()
    }
}

impl QueryResult for Frequencies {
    fn neutral(status: Status) -> Self {
        Self::new(status, 0, Vec::new())
    }

    fn status(&self) -> Status {
        self.status
    }
}

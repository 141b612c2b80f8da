//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::cli::args::OutputFormat;
use crate::domain::ClockDomain;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// ROCm SMI library settings
    pub library: LibraryConfig,
    /// GPU selection settings
    pub gpu: GpuConfig,
    /// Clock query settings
    pub clocks: ClocksConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Output format
    pub format: OutputFormat,
}

/// Native library configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LibraryConfig {
    /// Explicit path to librocm_smi64.so
    pub path: Option<String>,
    /// Flags passed to `rsmi_init`
    pub init_flags: u64,
}

/// GPU selection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GpuConfig {
    /// Target GPU by index
    pub index: Option<u32>,
}

impl GpuConfig {
    /// Device index to query, 0 when unset
    pub fn device_index(&self) -> u32 {
        self.index.unwrap_or(0)
    }
}

/// Clock query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClocksConfig {
    /// Domains listed when none are given on the command line
    pub domains: Vec<ClockDomain>,
}

impl Default for ClocksConfig {
    fn default() -> Self {
        Self {
            domains: vec![ClockDomain::Sys, ClockDomain::Mem],
        }
    }
}

//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::ClockDomain;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// ROCm SMI GPU telemetry tool
///
/// Query AMD GPU utilization, performance level, overdrive, clock
/// frequencies, voltage curve and power through librocm_smi64.
#[derive(Parser, Debug)]
#[command(name = "rocctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format [default: table]
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ROCCTL_CONFIG")]
    pub config: Option<String>,

    /// Target GPU by index (0-based)
    #[arg(long, global = true)]
    pub gpu: Option<u32>,

    /// Path to librocm_smi64.so
    #[arg(long, global = true, env = "ROCCTL_LIBRARY")]
    pub library: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how busy the GPU is
    Busy,

    /// Show coarse-grain activity counters
    Utilization,

    /// Show the current performance level
    PerfLevel,

    /// Show graphics and memory overdrive levels
    Overdrive,

    /// List supported clock frequencies
    Clocks(ClocksArgs),

    /// Show the overdrive voltage/frequency curve
    VoltCurve,

    /// Show power draw and power caps
    Power,

    /// Show every metric
    All,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the clocks command
#[derive(Parser, Debug)]
pub struct ClocksArgs {
    /// Clock domains to list (repeatable, defaults to the configured set)
    #[arg(short, long = "domain", value_enum)]
    pub domains: Vec<ClockDomainArg>,
}

/// Clock domain argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDomainArg {
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

impl From<ClockDomainArg> for ClockDomain {
    fn from(arg: ClockDomainArg) -> Self {
        match arg {
            ClockDomainArg::Sys => ClockDomain::Sys,
            ClockDomainArg::Df => ClockDomain::Df,
            ClockDomainArg::Dcef => ClockDomain::Dcef,
            ClockDomainArg::Soc => ClockDomain::Soc,
            ClockDomainArg::Mem => ClockDomain::Mem,
            ClockDomainArg::Pcie => ClockDomain::Pcie,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

//! Command handlers
//!
//! Each command handler runs its queries against a [`RocmSmi`] handle and
//! writes the results. A failed query is still written; only I/O errors
//! propagate.
//!
//! [`RocmSmi`]: crate::rsmi::RocmSmi

pub mod all;
pub mod clocks;
pub mod curve;
pub mod metrics;
pub mod power;

pub use all::run_all;
pub use clocks::run_clocks;
pub use curve::run_volt_curve;
pub use metrics::{run_busy, run_overdrive, run_perf_level, run_utilization};
pub use power::run_power;

use crate::domain::Status;

/// Log a query that came back with a failure status
fn warn_on_failure(metric: &str, gpu: u32, status: Status) {
    if !status.is_success() {
        log::warn!("GPU {}: {} query failed: {}", gpu, metric, status);
    }
}

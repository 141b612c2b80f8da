//! All command implementation
//!
//! Runs every query for one device. Each query is independent, so one
//! failing metric does not hide the others.

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, DeviceReport};
use crate::commands::clocks::read_clocks;
use crate::commands::warn_on_failure;
use crate::domain::ClockDomain;
use crate::error::Result;
use crate::rsmi::{RocmSmi, RsmiAdapter};

use std::io::Write;

/// Collect every metric of `gpu`
pub fn collect_report<A: RsmiAdapter>(
    smi: &RocmSmi<A>,
    gpu: u32,
    domains: &[ClockDomain],
) -> DeviceReport {
    let report = DeviceReport {
        gpu,
        busy: smi.busy_percent(gpu),
        utilization: smi.utilization_counters(gpu),
        perf_level: smi.perf_level(gpu),
        overdrive: smi.overdrive_levels(gpu),
        clocks: read_clocks(smi, gpu, domains),
        volt_curve: smi.volt_curve(gpu),
        power: smi.power(gpu),
    };

    warn_on_failure("busy percent", gpu, report.busy.status);
    warn_on_failure("utilization", gpu, report.utilization.status);
    warn_on_failure("performance level", gpu, report.perf_level.status);
    warn_on_failure("overdrive", gpu, report.overdrive.status);
    warn_on_failure("voltage curve", gpu, report.volt_curve.status);
    warn_on_failure("power", gpu, report.power.status);

    report
}

/// Execute the all command
pub fn run_all<A, W>(
    smi: &RocmSmi<A>,
    gpu: u32,
    domains: &[ClockDomain],
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let report = collect_report(smi, gpu, domains);
    write_output(out, &report, format)?;
    Ok(())
}

//! Scalar metric commands: busy, utilization, perf-level, overdrive

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuReading};
use crate::commands::warn_on_failure;
use crate::error::Result;
use crate::rsmi::{RocmSmi, RsmiAdapter};

use std::io::Write;

/// Execute the busy command
pub fn run_busy<A, W>(smi: &RocmSmi<A>, gpu: u32, format: OutputFormat, out: &mut W) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let busy = smi.busy_percent(gpu);
    warn_on_failure("busy percent", gpu, busy.status);
    write_output(out, &GpuReading::new(gpu, busy), format)?;
    Ok(())
}

/// Execute the utilization command
pub fn run_utilization<A, W>(
    smi: &RocmSmi<A>,
    gpu: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let util = smi.utilization_counters(gpu);
    warn_on_failure("utilization", gpu, util.status);
    write_output(out, &GpuReading::new(gpu, util), format)?;
    Ok(())
}

/// Execute the perf-level command
pub fn run_perf_level<A, W>(
    smi: &RocmSmi<A>,
    gpu: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let reading = smi.perf_level(gpu);
    warn_on_failure("performance level", gpu, reading.status);
    write_output(out, &GpuReading::new(gpu, reading), format)?;
    Ok(())
}

/// Execute the overdrive command
pub fn run_overdrive<A, W>(
    smi: &RocmSmi<A>,
    gpu: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let levels = smi.overdrive_levels(gpu);
    warn_on_failure("overdrive", gpu, levels.status);
    write_output(out, &GpuReading::new(gpu, levels), format)?;
    Ok(())
}

//! Power command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuReading};
use crate::commands::warn_on_failure;
use crate::error::Result;
use crate::rsmi::{RocmSmi, RsmiAdapter};

use std::io::Write;

/// Execute the power command
pub fn run_power<A, W>(smi: &RocmSmi<A>, gpu: u32, format: OutputFormat, out: &mut W) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let reading = smi.power(gpu);
    if let Some(step) = reading.failed_step {
        log::debug!("GPU {}: power read stopped at {}", gpu, step);
    }
    warn_on_failure("power", gpu, reading.status);
    write_output(out, &GpuReading::new(gpu, reading), format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::mock::MockAdapter;

    #[test]
    fn test_power_table() {
        let smi = RocmSmi::with_adapter(MockAdapter::new(), Status::Success);
        let mut out = Vec::new();
        run_power(&smi, 0, OutputFormat::Table, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("[0] Power:"));
        assert!(output.contains("Sensor 0: 45.0 W (cap 203.0 W)"));
        assert!(output.contains("Default cap: 220.0 W"));
    }

    #[test]
    fn test_power_json_names_failed_step() {
        let adapter = MockAdapter::new()
            .with_power_sensor_count(Status::Success, 2)
            .with_sensor_power(1, Status::Busy, 0);
        let smi = RocmSmi::with_adapter(adapter, Status::Success);
        let mut out = Vec::new();
        run_power(&smi, 3, OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["gpu"], 3);
        assert_eq!(json["failed_step"], "sensor_power");
        assert_eq!(json["sensor_count"], 2);
        assert_eq!(json["power_per_sensor"].as_array().map(Vec::len), Some(0));
    }
}

//! Volt-curve command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuReading};
use crate::commands::warn_on_failure;
use crate::error::Result;
use crate::rsmi::{RocmSmi, RsmiAdapter};

use std::io::Write;

/// Execute the volt-curve command
pub fn run_volt_curve<A, W>(
    smi: &RocmSmi<A>,
    gpu: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    A: RsmiAdapter,
    W: Write,
{
    let curve = smi.volt_curve(gpu);
    warn_on_failure("voltage curve", gpu, curve.status);
    write_output(out, &GpuReading::new(gpu, curve), format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::mock::MockAdapter;

    #[test]
    fn test_volt_curve_table() {
        let smi = RocmSmi::with_adapter(MockAdapter::new(), Status::Success);
        let mut out = Vec::new();
        run_volt_curve(&smi, 0, OutputFormat::Table, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("[0] Voltage curve:"));
        assert!(output.contains("Regions: 3"));
        assert!(output.contains("2: 2100 MHz @ 1100 mV"));
    }

    #[test]
    fn test_volt_curve_json_on_failure() {
        let adapter = MockAdapter::new().with_volt_curve(Status::NotSupported, Default::default());
        let smi = RocmSmi::with_adapter(adapter, Status::Success);
        let mut out = Vec::new();
        run_volt_curve(&smi, 0, OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["num_regions"], 0);
        assert_eq!(json["points"].as_array().map(Vec::len), Some(0));
    }
}

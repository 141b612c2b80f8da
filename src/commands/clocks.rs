//! Clocks command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, ClockList, ClockReading};
use crate::commands::warn_on_failure;
use crate::domain::ClockDomain;
use crate::error::Result;
use crate::rsmi::{RocmSmi, RsmiAdapter};

use std::io::Write;

/// Read the frequency list of every domain, in order
pub(crate) fn read_clocks<A: RsmiAdapter>(
    smi: &RocmSmi<A>,
    gpu: u32,
    domains: &[ClockDomain],
) -> Vec<ClockReading> {
    domains
        .iter()
        .map(|&domain| {
            let freqs = smi.frequencies(gpu, domain);
            warn_on_failure(&format!("{} clock", domain), gpu, freqs.status);
            ClockReading::new(domain, freqs)
        })
        .collect()
}

/// Execute the clocks command
pub fn run_clocks<A, W>(
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
    let list = ClockList {
        gpu,
        clocks: read_clocks(smi, gpu, domains),
    };
    write_output(out, &list, format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::mock::{AdapterCall, MockAdapter};

    #[test]
    fn test_clocks_queries_each_domain_in_order() {
        let adapter = MockAdapter::new()
            .with_frequencies(ClockDomain::Soc, Status::Success, 0, &[400_000_000])
            .with_frequencies(ClockDomain::Mem, Status::Success, 1, &[96_000_000, 1_000_000_000]);
        let smi = RocmSmi::with_adapter(adapter, Status::Success);

        let mut out = Vec::new();
        run_clocks(
            &smi,
            0,
            &[ClockDomain::Soc, ClockDomain::Mem],
            OutputFormat::Compact,
            &mut out,
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0:soc=400MHz mem=1000MHz\n");
        assert_eq!(
            smi.adapter().calls(),
            vec![
                AdapterCall::GpuClkFreq(0, ClockDomain::Soc),
                AdapterCall::GpuClkFreq(0, ClockDomain::Mem)
            ]
        );
    }

    #[test]
    fn test_unsupported_domain_does_not_stop_others() {
        let adapter = MockAdapter::new().without_frequencies(ClockDomain::Pcie);
        let smi = RocmSmi::with_adapter(adapter, Status::Success);

        let readings = read_clocks(&smi, 0, &[ClockDomain::Pcie, ClockDomain::Sys]);

        assert_eq!(readings[0].frequencies.status, Status::NotSupported);
        assert!(readings[0].frequencies.frequencies.is_empty());
        assert!(readings[1].frequencies.status.is_success());
        assert_eq!(readings[1].frequencies.num_supported, 3);
    }

    #[test]
    fn test_clocks_table_lists_frequencies() {
        let smi = RocmSmi::with_adapter(MockAdapter::new(), Status::Success);
        let mut out = Vec::new();
        run_clocks(&smi, 0, &[ClockDomain::Sys], OutputFormat::Table, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("[0] Clocks\nsys: 3 supported"));
        assert!(output.contains(" *2: 2100 MHz"));
    }
}

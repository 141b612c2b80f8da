//! ROCm SMI facade
//!
//! Pairs an [`InitGate`] with an adapter and exposes one method per metric
//! family.

use crate::domain::{
    BusyPercent, ClockDomain, Frequencies, OverdriveLevels, PerfLevelReading, PowerReading,
    Status, UtilizationCounters, VoltCurve,
};
use crate::error::RsmiError;
use crate::queries;
use crate::rsmi::gate::InitGate;
use crate::rsmi::library::RsmiLibrary;
use crate::rsmi::traits::RsmiAdapter;

/// Entry point for telemetry queries
///
/// Every query checks the gate first and never reaches the adapter when
/// initialization failed. Results are fresh reads owned by the caller.
pub struct RocmSmi<A: RsmiAdapter = RsmiLibrary> {
    gate: InitGate,
    adapter: A,
}

impl RocmSmi<RsmiLibrary> {
    /// Load librocm_smi64 and run `rsmi_init`
    ///
    /// Only a missing library or symbol is an error. A failing `rsmi_init`
    /// is recorded in the gate and reported by every query.
    pub fn init(library_path: Option<&str>, flags: u64) -> Result<Self, RsmiError> {
        let mut library = RsmiLibrary::load(library_path)?;
        let status = library.init(flags);
        Ok(Self::with_adapter(library, status))
    }
}

impl<A: RsmiAdapter> RocmSmi<A> {
    /// Build around any adapter and an already known init status
    pub fn with_adapter(adapter: A, init_status: Status) -> Self {
        Self {
            gate: InitGate::new(init_status),
            adapter,
        }
    }

    pub fn gate(&self) -> &InitGate {
        &self.gate
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn busy_percent(&self, dv_ind: u32) -> BusyPercent {
        queries::busy_percent(&self.gate, &self.adapter, dv_ind)
    }

    pub fn utilization_counters(&self, dv_ind: u32) -> UtilizationCounters {
        queries::utilization_counters(&self.gate, &self.adapter, dv_ind)
    }

    pub fn perf_level(&self, dv_ind: u32) -> PerfLevelReading {
        queries::perf_level(&self.gate, &self.adapter, dv_ind)
    }

    pub fn overdrive_levels(&self, dv_ind: u32) -> OverdriveLevels {
        queries::overdrive_levels(&self.gate, &self.adapter, dv_ind)
    }

    pub fn frequencies(&self, dv_ind: u32, domain: ClockDomain) -> Frequencies {
        queries::frequencies(&self.gate, &self.adapter, dv_ind, domain)
    }

    pub fn volt_curve(&self, dv_ind: u32) -> VoltCurve {
        queries::volt_curve(&self.gate, &self.adapter, dv_ind)
    }

    pub fn power(&self, dv_ind: u32) -> PowerReading {
        queries::power(&self.gate, &self.adapter, dv_ind)
    }
}

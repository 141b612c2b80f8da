//! The native query adapter
//!
//! One method per ROCm SMI entry point the queries use. Methods mirror the
//! C calling convention: the caller owns the output buffers, the adapter
//! fills them and returns the raw status. Nothing written to a buffer is
//! meaningful unless the returned status is [`Status::Success`].

use crate::domain::{ClockDomain, Status};
use crate::rsmi::bindings::{RsmiFrequencies, RsmiOdVoltFreqData, RsmiUtilizationCounter};

/// Trait over the ROCm SMI per-metric functions
///
/// Implemented by [`crate::rsmi::RsmiLibrary`] for real hardware and by the
/// mock adapter in tests.
pub trait RsmiAdapter: Send + Sync {
    /// `rsmi_dev_busy_percent_get`
    fn busy_percent(&self, dv_ind: u32, percent: &mut u32) -> Status;

    /// `rsmi_utilization_count_get`
    ///
    /// Each slot's `counter_type` selects what the library writes into its
    /// `value`.
    fn utilization_count(
        &self,
        dv_ind: u32,
        counters: &mut [RsmiUtilizationCounter],
        timestamp: &mut u64,
    ) -> Status;

    /// `rsmi_dev_perf_level_get`
    fn perf_level(&self, dv_ind: u32, level: &mut u32) -> Status;

    /// `rsmi_dev_overdrive_level_get` (graphics)
    fn overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status;

    /// `rsmi_dev_mem_overdrive_level_get`
    fn mem_overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status;

    /// `rsmi_dev_gpu_clk_freq_get`
    fn gpu_clk_freq(&self, dv_ind: u32, domain: ClockDomain, freqs: &mut RsmiFrequencies)
        -> Status;

    /// `rsmi_dev_od_volt_info_get`
    fn od_volt_info(&self, dv_ind: u32, data: &mut RsmiOdVoltFreqData) -> Status;

    /// Number of power sensors on the device
    fn power_sensor_count(&self, dv_ind: u32, count: &mut u16) -> Status;

    /// `rsmi_dev_power_ave_get`, in microwatts
    fn power_ave(&self, dv_ind: u32, sensor: u32, power: &mut u64) -> Status;

    /// `rsmi_dev_power_cap_get`, in microwatts
    fn power_cap(&self, dv_ind: u32, sensor: u32, cap: &mut u64) -> Status;

    /// `rsmi_dev_power_cap_default_get`, in microwatts
    fn power_cap_default(&self, dv_ind: u32, cap: &mut u64) -> Status;

    /// `rsmi_dev_power_cap_range_get`, in microwatts
    fn power_cap_range(&self, dv_ind: u32, sensor: u32, max: &mut u64, min: &mut u64) -> Status;
}

//! Mock adapter for testing
//!
//! Provides a scripted [`RsmiAdapter`] for unit testing without real hardware.
//! Every reply is a status plus the data written to the caller's buffers.
//! Data is written even when the scripted status is a failure, the way the
//! native library may leave partial output behind, so tests can check that
//! queries ignore it.

use crate::domain::{ClockDomain, Status};
use crate::rsmi::bindings::{
    RsmiFrequencies, RsmiOdVddcPoint, RsmiOdVoltFreqData, RsmiRange, RsmiUtilizationCounter,
    RSMI_COARSE_GRAIN_GFX_ACTIVITY, RSMI_COARSE_GRAIN_MEM_ACTIVITY, RSMI_MAX_NUM_FREQUENCIES,
};
use crate::rsmi::RsmiAdapter;

use std::collections::HashMap;
use std::os::raw::c_uint;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One adapter call, as recorded by [`MockAdapter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterCall {
    BusyPercent(u32),
    UtilizationCount(u32),
    PerfLevel(u32),
    OverdriveLevel(u32),
    MemOverdriveLevel(u32),
    GpuClkFreq(u32, ClockDomain),
    OdVoltInfo(u32),
    PowerSensorCount(u32),
    PowerAve(u32, u32),
    PowerCap(u32, u32),
    PowerCapDefault(u32),
    PowerCapRange(u32, u32),
}

#[derive(Debug, Clone, Copy)]
struct UtilizationReply {
    status: Status,
    gfx: u64,
    mem: u64,
    timestamp: u64,
}

#[derive(Debug, Clone, Copy)]
struct CapRangeReply {
    status: Status,
    max: u64,
    min: u64,
}

/// Scripted adapter
///
/// Unconfigured metrics answer with plausible success data. Clock domains
/// and power sensors without a scripted reply answer
/// [`Status::NotSupported`].
#[derive(Debug)]
pub struct MockAdapter {
    busy: (Status, u32),
    utilization: UtilizationReply,
    perf_level: (Status, u32),
    overdrive: (Status, u32),
    mem_overdrive: (Status, u32),
    frequencies: HashMap<ClockDomain, (Status, RsmiFrequencies)>,
    volt_curve: (Status, RsmiOdVoltFreqData),
    power_sensors: (Status, u16),
    sensor_power: Vec<(Status, u64)>,
    sensor_caps: Vec<(Status, u64)>,
    default_cap: (Status, u64),
    cap_range: CapRangeReply,
    calls: Mutex<Vec<AdapterCall>>,
    requested_counters: Mutex<Vec<c_uint>>,
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdapter {
    /// Create a mock adapter with default replies
    pub fn new() -> Self {
        let mut frequencies = HashMap::new();
        frequencies.insert(
            ClockDomain::Sys,
            (Status::Success, native_frequencies(2, &[500_000_000, 1_200_000_000, 2_100_000_000])),
        );
        frequencies.insert(
            ClockDomain::Mem,
            (Status::Success, native_frequencies(1, &[96_000_000, 1_000_000_000])),
        );

        Self {
            busy: (Status::Success, 42),
            utilization: UtilizationReply {
                status: Status::Success,
                gfx: 1_500,
                mem: 300,
                timestamp: 1_000_000,
            },
            perf_level: (Status::Success, 0),
            overdrive: (Status::Success, 0),
            mem_overdrive: (Status::Success, 0),
            frequencies,
            volt_curve: (Status::Success, default_volt_curve()),
            power_sensors: (Status::Success, 2),
            sensor_power: vec![(Status::Success, 45_000_000), (Status::Success, 31_000_000)],
            sensor_caps: vec![(Status::Success, 203_000_000), (Status::Success, 203_000_000)],
            default_cap: (Status::Success, 220_000_000),
            cap_range: CapRangeReply {
                status: Status::Success,
                max: 250_000_000,
                min: 100_000_000,
            },
            calls: Mutex::new(Vec::new()),
            requested_counters: Mutex::new(Vec::new()),
        }
    }

    /// Builder: set the busy percent reply
    pub fn with_busy_percent(mut self, status: Status, percent: u32) -> Self {
        self.busy = (status, percent);
        self
    }

    /// Builder: set the activity counter reply
    pub fn with_utilization(mut self, status: Status, gfx: u64, mem: u64, timestamp: u64) -> Self {
        self.utilization = UtilizationReply {
            status,
            gfx,
            mem,
            timestamp,
        };
        self
    }

    /// Builder: set the perf level reply (raw level value)
    pub fn with_perf_level(mut self, status: Status, level: u32) -> Self {
        self.perf_level = (status, level);
        self
    }

    /// Builder: set the graphics overdrive reply
    pub fn with_overdrive(mut self, status: Status, od: u32) -> Self {
        self.overdrive = (status, od);
        self
    }

    /// Builder: set the memory overdrive reply
    pub fn with_mem_overdrive(mut self, status: Status, od: u32) -> Self {
        self.mem_overdrive = (status, od);
        self
    }

    /// Builder: set the frequency reply for `domain`
    ///
    /// At most [`RSMI_MAX_NUM_FREQUENCIES`] values are kept.
    pub fn with_frequencies(
        mut self,
        domain: ClockDomain,
        status: Status,
        current: u32,
        values: &[u64],
    ) -> Self {
        self.frequencies
            .insert(domain, (status, native_frequencies(current, values)));
        self
    }

    /// Builder: set the raw native frequency reply for `domain`
    pub fn with_raw_frequencies(
        mut self,
        domain: ClockDomain,
        status: Status,
        native: RsmiFrequencies,
    ) -> Self {
        self.frequencies.insert(domain, (status, native));
        self
    }

    /// Builder: remove the frequency reply for `domain`
    pub fn without_frequencies(mut self, domain: ClockDomain) -> Self {
        self.frequencies.remove(&domain);
        self
    }

    /// Builder: set the voltage curve reply
    pub fn with_volt_curve(mut self, status: Status, data: RsmiOdVoltFreqData) -> Self {
        self.volt_curve = (status, data);
        self
    }

    /// Builder: set the power sensor count reply
    pub fn with_power_sensor_count(mut self, status: Status, count: u16) -> Self {
        self.power_sensors = (status, count);
        self
    }

    /// Builder: set the average power reply for `sensor`
    pub fn with_sensor_power(mut self, sensor: u32, status: Status, power: u64) -> Self {
        set_sensor(&mut self.sensor_power, sensor, (status, power));
        self
    }

    /// Builder: set the power cap reply for `sensor`
    pub fn with_sensor_cap(mut self, sensor: u32, status: Status, cap: u64) -> Self {
        set_sensor(&mut self.sensor_caps, sensor, (status, cap));
        self
    }

    /// Builder: set the default power cap reply
    pub fn with_default_power_cap(mut self, status: Status, cap: u64) -> Self {
        self.default_cap = (status, cap);
        self
    }

    /// Builder: set the power cap range reply
    pub fn with_power_cap_range(mut self, status: Status, min: u64, max: u64) -> Self {
        self.cap_range = CapRangeReply { status, max, min };
        self
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<AdapterCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Counter types requested by the utilization calls, in slot order
    pub fn requested_counters(&self) -> Vec<c_uint> {
        lock(&self.requested_counters).clone()
    }

    fn record(&self, call: AdapterCall) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_sensor(replies: &mut Vec<(Status, u64)>, sensor: u32, reply: (Status, u64)) {
    let index = sensor as usize;
    if replies.len() <= index {
        replies.resize(index + 1, (Status::NotSupported, 0));
    }
    replies[index] = reply;
}

fn sensor_reply(replies: &[(Status, u64)], sensor: u32, value: &mut u64) -> Status {
    match replies.get(sensor as usize) {
        Some(&(status, reply)) => {
            *value = reply;
            status
        }
        None => Status::NotSupported,
    }
}

fn native_frequencies(current: u32, values: &[u64]) -> RsmiFrequencies {
    let mut native = RsmiFrequencies {
        current,
        ..Default::default()
    };
    for (slot, value) in native.frequency.iter_mut().zip(values) {
        *slot = *value;
    }
    native.num_supported = values.len().min(RSMI_MAX_NUM_FREQUENCIES) as u32;
    native
}

fn default_volt_curve() -> RsmiOdVoltFreqData {
    let range = |lower_bound, upper_bound| RsmiRange {
        lower_bound,
        upper_bound,
    };
    let point = |frequency, voltage| RsmiOdVddcPoint { frequency, voltage };

    let mut data = RsmiOdVoltFreqData {
        curr_sclk_range: range(500_000_000, 2_100_000_000),
        curr_mclk_range: range(96_000_000, 1_000_000_000),
        sclk_freq_limits: range(500_000_000, 2_500_000_000),
        mclk_freq_limits: range(96_000_000, 1_200_000_000),
        num_regions: 3,
        ..Default::default()
    };
    data.curve.vc_points = [
        point(500_000_000, 750),
        point(1_300_000_000, 850),
        point(2_100_000_000, 1_100),
    ];
    data
}

impl RsmiAdapter for MockAdapter {
    fn busy_percent(&self, dv_ind: u32, percent: &mut u32) -> Status {
        self.record(AdapterCall::BusyPercent(dv_ind));
        *percent = self.busy.1;
        self.busy.0
    }

    fn utilization_count(
        &self,
        dv_ind: u32,
        counters: &mut [RsmiUtilizationCounter],
        timestamp: &mut u64,
    ) -> Status {
        self.record(AdapterCall::UtilizationCount(dv_ind));
        let reply = self.utilization;
        let mut requested = lock(&self.requested_counters);
        for counter in counters.iter_mut() {
            requested.push(counter.counter_type);
            counter.value = match counter.counter_type {
                RSMI_COARSE_GRAIN_GFX_ACTIVITY => reply.gfx,
                RSMI_COARSE_GRAIN_MEM_ACTIVITY => reply.mem,
                _ => 0,
            };
        }
        *timestamp = reply.timestamp;
        reply.status
    }

    fn perf_level(&self, dv_ind: u32, level: &mut u32) -> Status {
        self.record(AdapterCall::PerfLevel(dv_ind));
        *level = self.perf_level.1;
        self.perf_level.0
    }

    fn overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status {
        self.record(AdapterCall::OverdriveLevel(dv_ind));
        *od = self.overdrive.1;
        self.overdrive.0
    }

    fn mem_overdrive_level(&self, dv_ind: u32, od: &mut u32) -> Status {
        self.record(AdapterCall::MemOverdriveLevel(dv_ind));
        *od = self.mem_overdrive.1;
        self.mem_overdrive.0
    }

    fn gpu_clk_freq(
        &self,
        dv_ind: u32,
        domain: ClockDomain,
        freqs: &mut RsmiFrequencies,
    ) -> Status {
        self.record(AdapterCall::GpuClkFreq(dv_ind, domain));
        match self.frequencies.get(&domain) {
            Some((status, native)) => {
                *freqs = *native;
                *status
            }
            None => Status::NotSupported,
        }
    }

    fn od_volt_info(&self, dv_ind: u32, data: &mut RsmiOdVoltFreqData) -> Status {
        self.record(AdapterCall::OdVoltInfo(dv_ind));
        *data = self.volt_curve.1;
        self.volt_curve.0
    }

    fn power_sensor_count(&self, dv_ind: u32, count: &mut u16) -> Status {
        self.record(AdapterCall::PowerSensorCount(dv_ind));
        *count = self.power_sensors.1;
        self.power_sensors.0
    }

    fn power_ave(&self, dv_ind: u32, sensor: u32, power: &mut u64) -> Status {
        self.record(AdapterCall::PowerAve(dv_ind, sensor));
        sensor_reply(&self.sensor_power, sensor, power)
    }

    fn power_cap(&self, dv_ind: u32, sensor: u32, cap: &mut u64) -> Status {
        self.record(AdapterCall::PowerCap(dv_ind, sensor));
        sensor_reply(&self.sensor_caps, sensor, cap)
    }

    fn power_cap_default(&self, dv_ind: u32, cap: &mut u64) -> Status {
        self.record(AdapterCall::PowerCapDefault(dv_ind));
        *cap = self.default_cap.1;
        self.default_cap.0
    }

    fn power_cap_range(&self, dv_ind: u32, sensor: u32, max: &mut u64, min: &mut u64) -> Status {
        self.record(AdapterCall::PowerCapRange(dv_ind, sensor));
        *max = self.cap_range.max;
        *min = self.cap_range.min;
        self.cap_range.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_replies_succeed() {
        let adapter = MockAdapter::new();
        let mut percent = 0;
        assert_eq!(adapter.busy_percent(0, &mut percent), Status::Success);
        assert_eq!(percent, 42);

        let mut freqs = RsmiFrequencies::default();
        assert_eq!(
            adapter.gpu_clk_freq(0, ClockDomain::Sys, &mut freqs),
            Status::Success
        );
        assert_eq!(freqs.num_supported, 3);
        assert_eq!(freqs.current, 2);
    }

    #[test]
    fn test_unscripted_domain_not_supported() {
        let adapter = MockAdapter::new();
        let mut freqs = RsmiFrequencies::default();
        assert_eq!(
            adapter.gpu_clk_freq(0, ClockDomain::Pcie, &mut freqs),
            Status::NotSupported
        );
    }

    #[test]
    fn test_failing_reply_still_writes() {
        let adapter = MockAdapter::new().with_overdrive(Status::Busy, 17);
        let mut od = 0;
        assert_eq!(adapter.overdrive_level(0, &mut od), Status::Busy);
        assert_eq!(od, 17);
    }

    #[test]
    fn test_calls_recorded_in_order() {
        let adapter = MockAdapter::new();
        let mut value = 0;
        adapter.perf_level(1, &mut value);
        adapter.mem_overdrive_level(2, &mut value);

        assert_eq!(
            adapter.calls(),
            vec![AdapterCall::PerfLevel(1), AdapterCall::MemOverdriveLevel(2)]
        );
        assert_eq!(adapter.call_count(), 2);
    }

    #[test]
    fn test_unscripted_sensor_not_supported() {
        let adapter = MockAdapter::new().with_sensor_power(3, Status::Success, 9);
        let mut power = 0;
        assert_eq!(adapter.power_ave(0, 2, &mut power), Status::NotSupported);
        assert_eq!(adapter.power_ave(0, 3, &mut power), Status::Success);
        assert_eq!(power, 9);
        assert_eq!(adapter.power_cap(0, 5, &mut power), Status::NotSupported);
    }

    #[test]
    fn test_frequency_values_truncated_to_capacity() {
        let values = vec![1u64; RSMI_MAX_NUM_FREQUENCIES + 8];
        let adapter =
            MockAdapter::new().with_frequencies(ClockDomain::Df, Status::Success, 0, &values);
        let mut freqs = RsmiFrequencies::default();
        adapter.gpu_clk_freq(0, ClockDomain::Df, &mut freqs);
        assert_eq!(freqs.num_supported as usize, RSMI_MAX_NUM_FREQUENCIES);
    }
}

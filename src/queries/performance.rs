//! Single-call scalar queries: busy percent, activity counters, perf level

use crate::domain::{BusyPercent, PerfLevelReading, UtilizationCounters};
use crate::queries::envelope::gated;
use crate::rsmi::bindings::{
    RsmiUtilizationCounter, RSMI_COARSE_GRAIN_GFX_ACTIVITY, RSMI_COARSE_GRAIN_MEM_ACTIVITY,
};
use crate::rsmi::{InitGate, RsmiAdapter};

/// How busy the GPU is, in percent
pub fn busy_percent<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> BusyPercent
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut percent = 0;
        let status = adapter.busy_percent(dv_ind, &mut percent);
        BusyPercent::from_reply(status, percent)
    })
}

/// Coarse-grain graphics and memory activity counters
pub fn utilization_counters<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> UtilizationCounters
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut counters = [
            RsmiUtilizationCounter::request(RSMI_COARSE_GRAIN_GFX_ACTIVITY),
            RsmiUtilizationCounter::request(RSMI_COARSE_GRAIN_MEM_ACTIVITY),
        ];
        let mut timestamp = 0;
        let status = adapter.utilization_count(dv_ind, &mut counters, &mut timestamp);
        UtilizationCounters::from_reply(status, counters[0].value, counters[1].value, timestamp)
    })
}

/// Current performance level
pub fn perf_level<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> PerfLevelReading
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut level = 0;
        let status = adapter.perf_level(dv_ind, &mut level);
        PerfLevelReading::from_reply(status, level)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PerfLevel, QueryResult, Status};
    use crate::mock::{AdapterCall, MockAdapter};

    fn ready() -> InitGate {
        InitGate::new(Status::Success)
    }

    #[test]
    fn test_busy_percent_not_initialized() {
        let adapter = MockAdapter::new();
        let busy = busy_percent(&InitGate::uninitialized(), &adapter, 0);

        assert_eq!(busy.status, Status::InitError);
        assert_eq!(busy.percent, 0);
        assert!(adapter.calls().is_empty());
    }

    #[test]
    fn test_busy_percent_success() {
        let adapter = MockAdapter::new().with_busy_percent(Status::Success, 73);
        let busy = busy_percent(&ready(), &adapter, 2);

        assert_eq!(busy, BusyPercent::from_reply(Status::Success, 73));
        assert_eq!(adapter.calls(), vec![AdapterCall::BusyPercent(2)]);
    }

    #[test]
    fn test_busy_percent_failure_ignores_written_value() {
        // the mock writes 99 even though it reports failure
        let adapter = MockAdapter::new().with_busy_percent(Status::Permission, 99);
        let busy = busy_percent(&ready(), &adapter, 0);

        assert_eq!(busy.status, Status::Permission);
        assert_eq!(busy.percent, 0);
    }

    #[test]
    fn test_status_passed_through_verbatim() {
        for code in [1, 2, 3, 4, 10, 16, 19, 250, 0xFFFF_FFFF] {
            let status = Status::from_raw(code);
            let adapter = MockAdapter::new()
                .with_busy_percent(status, 1)
                .with_perf_level(status, 1)
                .with_utilization(status, 1, 1, 1);

            assert_eq!(busy_percent(&ready(), &adapter, 0).status.as_raw(), code);
            assert_eq!(perf_level(&ready(), &adapter, 0).status.as_raw(), code);
            assert_eq!(utilization_counters(&ready(), &adapter, 0).status.as_raw(), code);
        }
    }

    #[test]
    fn test_utilization_counters_success() {
        let adapter = MockAdapter::new().with_utilization(Status::Success, 1_000, 250, 123_456);
        let util = utilization_counters(&ready(), &adapter, 1);

        assert_eq!(util.gfx_activity, 1_000);
        assert_eq!(util.mem_activity, 250);
        assert_eq!(util.timestamp, 123_456);
        assert_eq!(adapter.calls(), vec![AdapterCall::UtilizationCount(1)]);
    }

    #[test]
    fn test_utilization_counters_requests_gfx_then_mem() {
        let adapter = MockAdapter::new();
        utilization_counters(&ready(), &adapter, 0);

        assert_eq!(
            adapter.requested_counters(),
            vec![RSMI_COARSE_GRAIN_GFX_ACTIVITY, RSMI_COARSE_GRAIN_MEM_ACTIVITY]
        );
    }

    #[test]
    fn test_utilization_counters_failure_is_neutral() {
        let adapter = MockAdapter::new().with_utilization(Status::NotSupported, 5, 6, 7);
        let util = utilization_counters(&ready(), &adapter, 0);

        assert_eq!(util, UtilizationCounters::neutral(Status::NotSupported));
    }

    #[test]
    fn test_perf_level_decoded() {
        let adapter = MockAdapter::new().with_perf_level(Status::Success, 5);
        let reading = perf_level(&ready(), &adapter, 0);

        assert_eq!(reading.level, PerfLevel::StablePeak);
        assert!(reading.is_success());
    }

    #[test]
    fn test_perf_level_not_initialized() {
        let adapter = MockAdapter::new();
        let reading = perf_level(&InitGate::new(Status::Permission), &adapter, 0);

        assert_eq!(reading, PerfLevelReading::neutral(Status::Permission));
        assert_eq!(adapter.call_count(), 0);
    }
}

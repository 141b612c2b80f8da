//! Telemetry queries
//!
//! Every query follows the same envelope:
//!
//! 1. If the [`InitGate`](crate::rsmi::InitGate) is not ready, return the
//!    gate's status with a neutral payload. The adapter is not called.
//! 2. Call the adapter. Its status becomes the result's status verbatim.
//! 3. Populate the payload only from calls that succeeded.
//!
//! Variable-length payloads (frequency lists, curve points) are copied out
//! of the adapter's fixed-capacity buffers into a `Vec` sized to the
//! reported count, see [`materialize`]. The overdrive and power queries
//! chain several adapter calls and stop at the first failure, see
//! [`overdrive`] and [`power`].
//!
//! Queries have no side effects besides the adapter calls: no caching and
//! no logging.

pub mod clocks;
pub mod envelope;
pub mod materialize;
pub mod overdrive;
pub mod performance;
pub mod power;
pub mod voltage;

pub use clocks::frequencies;
pub use overdrive::overdrive_levels;
pub use performance::{busy_percent, perf_level, utilization_counters};
pub use power::power;
pub use voltage::volt_curve;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BusyPercent, ClockDomain, Frequencies, OverdriveLevels, PerfLevelReading, PowerReading,
        QueryResult, Status, UtilizationCounters, VoltCurve,
    };
    use crate::mock::MockAdapter;
    use crate::rsmi::InitGate;

    #[test]
    fn test_every_query_fails_fast_when_not_initialized() {
        for status in [Status::InitError, Status::Permission, Status::Other(77)] {
            let gate = InitGate::new(status);
            let adapter = MockAdapter::new();

            assert_eq!(busy_percent(&gate, &adapter, 0), BusyPercent::neutral(status));
            assert_eq!(
                utilization_counters(&gate, &adapter, 0),
                UtilizationCounters::neutral(status)
            );
            assert_eq!(perf_level(&gate, &adapter, 0), PerfLevelReading::neutral(status));
            assert_eq!(overdrive_levels(&gate, &adapter, 0), OverdriveLevels::neutral(status));
            for domain in ClockDomain::ALL {
                assert_eq!(
                    frequencies(&gate, &adapter, 0, domain),
                    Frequencies::neutral(status)
                );
            }
            assert_eq!(volt_curve(&gate, &adapter, 0), VoltCurve::neutral(status));
            assert_eq!(power(&gate, &adapter, 0), PowerReading::neutral(status));

            assert_eq!(adapter.call_count(), 0);
        }
    }

    #[test]
    fn test_results_are_independent_of_later_queries() {
        let gate = InitGate::new(Status::Success);
        let adapter = MockAdapter::new();

        let first = frequencies(&gate, &adapter, 0, ClockDomain::Sys);
        let second = frequencies(&gate, &adapter, 0, ClockDomain::Sys);
        drop(second);

        assert_eq!(first.num_supported, 3);
        assert_eq!(first.frequencies.len(), 3);
    }
}

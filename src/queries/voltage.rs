//! Voltage/frequency curve

use crate::domain::{QueryResult, VoltCurve};
use crate::queries::envelope::gated;
use crate::queries::materialize::materialize;
use crate::rsmi::bindings::RsmiOdVoltFreqData;
use crate::rsmi::{InitGate, RsmiAdapter};

/// Overdrive voltage curve with the clock ranges it applies to
///
/// On success the four clock ranges are copied as reported and the curve
/// points are materialized from the first `num_regions` entries. On
/// failure every field is neutral.
pub fn volt_curve<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> VoltCurve
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut native = RsmiOdVoltFreqData::default();
        let status = adapter.od_volt_info(dv_ind, &mut native);
        if !status.is_success() {
            return VoltCurve::neutral(status);
        }

        let points = materialize(native.num_regions, &native.curve.vc_points);
        VoltCurve::new(
            status,
            native.curr_sclk_range.into(),
            native.sclk_freq_limits.into(),
            native.curr_mclk_range.into(),
            native.mclk_freq_limits.into(),
            points,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FreqRange, Status, VddcPoint};
    use crate::mock::{AdapterCall, MockAdapter};
    use crate::rsmi::bindings::{RsmiOdVddcPoint, RsmiRange, RSMI_NUM_VOLTAGE_CURVE_POINTS};

    fn range(lower_bound: u64, upper_bound: u64) -> RsmiRange {
        RsmiRange {
            lower_bound,
            upper_bound,
        }
    }

    fn sample(num_regions: u32) -> RsmiOdVoltFreqData {
        let mut data = RsmiOdVoltFreqData {
            curr_sclk_range: range(500, 2100),
            curr_mclk_range: range(100, 1000),
            sclk_freq_limits: range(400, 2500),
            mclk_freq_limits: range(100, 1200),
            num_regions,
            ..Default::default()
        };
        data.curve.vc_points = [
            RsmiOdVddcPoint {
                frequency: 800,
                voltage: 700,
            },
            RsmiOdVddcPoint {
                frequency: 1400,
                voltage: 850,
            },
            RsmiOdVddcPoint {
                frequency: 2100,
                voltage: 1100,
            },
        ];
        data
    }

    #[test]
    fn test_curve_and_ranges_copied() {
        let adapter = MockAdapter::new().with_volt_curve(Status::Success, sample(2));
        let curve = volt_curve(&InitGate::new(Status::Success), &adapter, 1);

        assert_eq!(curve.status, Status::Success);
        assert_eq!(curve.num_regions, 2);
        assert_eq!(
            curve.points,
            vec![VddcPoint::new(800, 700), VddcPoint::new(1400, 850)]
        );
        assert_eq!(curve.curr_sclk_range, FreqRange::new(500, 2100));
        assert_eq!(curve.sclk_limits, FreqRange::new(400, 2500));
        assert_eq!(curve.curr_mclk_range, FreqRange::new(100, 1000));
        assert_eq!(curve.mclk_limits, FreqRange::new(100, 1200));
        assert_eq!(adapter.calls(), vec![AdapterCall::OdVoltInfo(1)]);
    }

    #[test]
    fn test_zero_regions_keeps_ranges() {
        let adapter = MockAdapter::new().with_volt_curve(Status::Success, sample(0));
        let curve = volt_curve(&InitGate::new(Status::Success), &adapter, 0);

        assert_eq!(curve.status, Status::Success);
        assert_eq!(curve.num_regions, 0);
        assert!(curve.points.is_empty());
        assert_eq!(curve.curr_sclk_range, FreqRange::new(500, 2100));
        assert_eq!(curve.mclk_limits, FreqRange::new(100, 1200));
    }

    #[test]
    fn test_failure_is_fully_neutral() {
        let adapter = MockAdapter::new().with_volt_curve(Status::NotSupported, sample(3));
        let curve = volt_curve(&InitGate::new(Status::Success), &adapter, 0);

        assert_eq!(curve, VoltCurve::neutral(Status::NotSupported));
        assert_eq!(curve.points.capacity(), 0);
    }

    #[test]
    fn test_regions_capped_at_native_capacity() {
        let adapter = MockAdapter::new().with_volt_curve(Status::Success, sample(9));
        let curve = volt_curve(&InitGate::new(Status::Success), &adapter, 0);

        assert_eq!(curve.num_regions as usize, RSMI_NUM_VOLTAGE_CURVE_POINTS);
        assert_eq!(curve.points.len(), RSMI_NUM_VOLTAGE_CURVE_POINTS);
    }

    #[test]
    fn test_not_initialized() {
        let adapter = MockAdapter::new();
        let curve = volt_curve(&InitGate::new(Status::InitError), &adapter, 0);

        assert_eq!(curve, VoltCurve::neutral(Status::InitError));
        assert_eq!(adapter.call_count(), 0);
    }
}

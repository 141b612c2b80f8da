//! Multi-step power query
//!
//! Reads run in order: sensor count, power per sensor, power cap per
//! sensor, default cap, cap range. The chain stops at the first failed
//! read. The average is computed from the per-sensor readings, so it is
//! set exactly when they are.

use crate::domain::{PowerCapRange, PowerReading, PowerStep, QueryResult, Status};
use crate::queries::envelope::gated;
use crate::rsmi::{InitGate, RsmiAdapter};

use std::ops::ControlFlow;

/// Sensor whose cap range is reported
const CAP_RANGE_SENSOR: u32 = 0;

type Failure = (Status, PowerStep);

fn checked(step: PowerStep, status: Status) -> ControlFlow<Failure> {
    if status.is_success() {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break((status, step))
    }
}

/// Read one value per sensor; nothing is kept unless every read succeeds
fn per_sensor<F>(count: u16, step: PowerStep, mut read: F) -> ControlFlow<Failure, Vec<u64>>
where
    F: FnMut(u32, &mut u64) -> Status,
{
    let mut values = Vec::with_capacity(usize::from(count));
    for sensor in 0..u32::from(count) {
        let mut value = 0;
        checked(step, read(sensor, &mut value))?;
        values.push(value);
    }
    ControlFlow::Continue(values)
}

fn read_steps<A>(adapter: &A, dv_ind: u32, reading: &mut PowerReading) -> ControlFlow<Failure>
where
    A: RsmiAdapter + ?Sized,
{
    let mut count = 0;
    checked(PowerStep::SensorCount, adapter.power_sensor_count(dv_ind, &mut count))?;
    reading.sensor_count = count;

    let power = per_sensor(count, PowerStep::SensorPower, |sensor, value| {
        adapter.power_ave(dv_ind, sensor, value)
    })?;
    reading.average_power = PowerReading::mean(&power);
    reading.power_per_sensor = power;

    reading.cap_per_sensor = per_sensor(count, PowerStep::SensorCap, |sensor, value| {
        adapter.power_cap(dv_ind, sensor, value)
    })?;

    let mut default_cap = 0;
    checked(PowerStep::DefaultCap, adapter.power_cap_default(dv_ind, &mut default_cap))?;
    reading.default_cap = default_cap;

    let (mut max, mut min) = (0, 0);
    checked(
        PowerStep::CapRange,
        adapter.power_cap_range(dv_ind, CAP_RANGE_SENSOR, &mut max, &mut min),
    )?;
    reading.cap_range = PowerCapRange { min, max };

    ControlFlow::Continue(())
}

/// Power draw and caps of one device
///
/// The status is that of the last read attempted, so it is success only
/// when every read succeeded.
pub fn power<A>(gate: &InitGate, adapter: &A, dv_ind: u32) -> PowerReading
where
    A: RsmiAdapter + ?Sized,
{
    gated(gate, || {
        let mut reading = PowerReading::neutral(Status::Success);
        if let ControlFlow::Break((status, step)) = read_steps(adapter, dv_ind, &mut reading) {
            reading.status = status;
            reading.failed_step = Some(step);
        }
        reading
    })
}

//! Domain models for rocctl
//!
//! The status taxonomy and one result type per metric family. Every result
//! carries a [`Status`] and a payload that is neutral whenever the status
//! reports failure.

pub mod clock;
pub mod performance;
pub mod power;
pub mod result;
pub mod status;
pub mod voltage;

pub use clock::{ClockDomain, Frequencies};
pub use performance::{
    BusyPercent, OverdriveLevels, OverdriveStep, PerfLevel, PerfLevelReading, UtilizationCounters,
};
pub use power::{PowerCapRange, PowerReading, PowerStep};
pub use result::QueryResult;
pub use status::{Status, StatusKind};
pub use voltage::{FreqRange, VddcPoint, VoltCurve};

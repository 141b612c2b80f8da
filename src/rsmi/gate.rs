//! Initialization gate
//!
//! Holds the status of the last `rsmi_init`. It is set once, when the
//! [`crate::rsmi::RocmSmi`] facade is built, and only read afterwards.

use crate::domain::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitGate {
    status: Status,
}

impl InitGate {
    pub fn new(status: Status) -> Self {
        Self { status }
    }

    /// A gate for a library that was never initialized
    pub fn uninitialized() -> Self {
        Self::new(Status::InitError)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether queries may reach the adapter
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.status.is_success()
    }
}

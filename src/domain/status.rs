//! Query status codes
//!
//! `Status` mirrors `rsmi_status_t` one-to-one. Codes the table does not
//! know are kept in [`Status::Other`] so a status read from the library is
//! always reported back unchanged.

use crate::error::RsmiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a ROCm SMI call, identical across every metric family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Success,
    InvalidArgs,
    NotSupported,
    FileError,
    Permission,
    OutOfResources,
    InternalException,
    InputOutOfBounds,
    InitError,
    NotYetImplemented,
    NotFound,
    InsufficientSize,
    Interrupt,
    UnexpectedSize,
    NoData,
    UnexpectedData,
    Busy,
    RefcountOverflow,
    SettingUnavailable,
    AmdgpuRestart,
    UnknownError,
    /// A code outside the known table, preserved as-is
    Other(u32),
}

/// Coarse grouping of statuses into failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Success,
    NotInitialized,
    InvalidArgument,
    NotSupported,
    PermissionDenied,
    HardwareUnavailable,
    Other,
}

impl Status {
    /// Decode a raw `rsmi_status_t`
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::InvalidArgs,
            2 => Self::NotSupported,
            3 => Self::FileError,
            4 => Self::Permission,
            5 => Self::OutOfResources,
            6 => Self::InternalException,
            7 => Self::InputOutOfBounds,
            8 => Self::InitError,
            9 => Self::NotYetImplemented,
            10 => Self::NotFound,
            11 => Self::InsufficientSize,
            12 => Self::Interrupt,
            13 => Self::UnexpectedSize,
            14 => Self::NoData,
            15 => Self::UnexpectedData,
            16 => Self::Busy,
            17 => Self::RefcountOverflow,
            18 => Self::SettingUnavailable,
            19 => Self::AmdgpuRestart,
            0xFFFF_FFFF => Self::UnknownError,
            other => Self::Other(other),
        }
    }

    /// Get the raw `rsmi_status_t` value
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Success => 0,
            Self::InvalidArgs => 1,
            Self::NotSupported => 2,
            Self::FileError => 3,
            Self::Permission => 4,
            Self::OutOfResources => 5,
            Self::InternalException => 6,
            Self::InputOutOfBounds => 7,
            Self::InitError => 8,
            Self::NotYetImplemented => 9,
            Self::NotFound => 10,
            Self::InsufficientSize => 11,
            Self::Interrupt => 12,
            Self::UnexpectedSize => 13,
            Self::NoData => 14,
            Self::UnexpectedData => 15,
            Self::Busy => 16,
            Self::RefcountOverflow => 17,
            Self::SettingUnavailable => 18,
            Self::AmdgpuRestart => 19,
            Self::UnknownError => 0xFFFF_FFFF,
            Self::Other(code) => *code,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Group this status into a failure kind
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Success => StatusKind::Success,
            Self::InitError => StatusKind::NotInitialized,
            Self::InvalidArgs | Self::InputOutOfBounds => StatusKind::InvalidArgument,
            Self::NotSupported | Self::NotYetImplemented | Self::SettingUnavailable => {
                StatusKind::NotSupported
            }
            Self::Permission => StatusKind::PermissionDenied,
            Self::FileError | Self::NotFound | Self::Busy | Self::AmdgpuRestart => {
                StatusKind::HardwareUnavailable
            }
            _ => StatusKind::Other,
        }
    }

    /// Convert into a `Result`, `Ok` only for [`Status::Success`]
    pub fn into_result(self) -> Result<(), RsmiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(RsmiError::Status(self))
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidArgs => "invalid arguments",
            Self::NotSupported => "not supported on this device",
            Self::FileError => "sysfs file access failed",
            Self::Permission => "permission denied",
            Self::OutOfResources => "out of resources",
            Self::InternalException => "internal exception",
            Self::InputOutOfBounds => "input out of bounds",
            Self::InitError => "ROCm SMI not initialized",
            Self::NotYetImplemented => "not yet implemented",
            Self::NotFound => "not found",
            Self::InsufficientSize => "insufficient buffer size",
            Self::Interrupt => "interrupted",
            Self::UnexpectedSize => "unexpected data size",
            Self::NoData => "no data",
            Self::UnexpectedData => "unexpected data",
            Self::Busy => "device busy",
            Self::RefcountOverflow => "reference count overflow",
            Self::SettingUnavailable => "setting unavailable",
            Self::AmdgpuRestart => "amdgpu driver restart required",
            Self::UnknownError => "unknown error",
            Self::Other(_) => "unrecognized status",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.as_raw())
    }
}

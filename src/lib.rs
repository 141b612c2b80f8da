//! rocctl - ROCm SMI GPU telemetry library
//!
//! This library wraps the ROCm SMI per-metric query functions behind result
//! types that carry their own status. Queries never fail out-of-band: each
//! returns a status plus a payload that is neutral whenever the status
//! reports failure.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Status taxonomy and result types
//! - [`error`]: Error types
//! - [`queries`]: The query operations
//! - [`rsmi`]: Native library binding and adapter trait

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod queries;
pub mod rsmi;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};

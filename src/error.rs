//! Unified error types for rocctl
//!
//! Query operations never fail with these: their outcome travels in-band
//! through [`Status`]. These types cover everything around the queries
//! (loading the library, configuration, I/O) and the optional conversion
//! of a failed status into a `Result`.

use crate::domain::Status;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the ROCm SMI layer
    #[error("ROCm SMI error: {0}")]
    Rsmi(#[from] RsmiError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (output, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the ROCm SMI layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsmiError {
    /// librocm_smi64 could not be loaded
    #[error("ROCm SMI library not found ({0}). Is ROCm installed?")]
    LibraryNotFound(String),

    /// The library was loaded but lacks a required entry point
    #[error("ROCm SMI symbol not available: {0}")]
    SymbolNotFound(String),

    /// The library's ABI is not one this build can call safely
    #[error("Unsupported ROCm SMI library: {0}")]
    UnsupportedVersion(String),

    /// A query or lifecycle call reported a non-success status
    #[error("{0}")]
    Status(Status),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Config file exists but could not be read
    #[error("Failed to read configuration {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_not_found_display() {
        let err = RsmiError::LibraryNotFound("librocm_smi64.so".to_string());
        assert!(err.to_string().contains("Is ROCm installed?"));
    }

    #[test]
    fn test_status_error_display_carries_code() {
        let err = RsmiError::Status(Status::Permission);
        assert!(err.to_string().contains("code 4"));
    }

    #[test]
    fn test_error_conversion() {
        let app_err: AppError = RsmiError::Status(Status::InitError).into();
        assert!(matches!(app_err, AppError::Rsmi(RsmiError::Status(Status::InitError))));
    }
}

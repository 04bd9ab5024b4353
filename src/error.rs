//! Error types for gpu-doctor operations.
//!
//! This module defines [`DoctorError`], the error type used outside the
//! probe boundary, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures never surface as `DoctorError` to callers of the
//!   aggregator; they are folded into `Absent`/`Unknown` results
//! - Use `DoctorError` for configuration and I/O problems the CLI reports
//! - Use `anyhow::Error` (via `DoctorError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gpu-doctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// External program could not be started.
    #[error("Command failed to start: {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// External program exceeded its time budget and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut { command: String, seconds: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gpu-doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;

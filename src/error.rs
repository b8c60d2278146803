//! Error types for parexec operations.
//!
//! This module defines [`ParexecError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors are fatal: they surface before any worker starts
//! - Command errors are per-action values, reported and never escalated
//! - Use `anyhow::Error` (via `ParexecError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for parexec operations.
#[derive(Debug, Error)]
pub enum ParexecError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to decode the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Decoded configuration has invalid values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Program exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Program could not be started at all.
    #[error("Failed to start {command}: {message}")]
    SpawnFailed { command: String, message: String },

    /// The distribution channel no longer accepts jobs.
    #[error("Worker pool is closed")]
    PoolClosed,

    /// A worker thread terminated abnormally.
    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for parexec operations.
pub type Result<T> = std::result::Result<T, ParexecError>;

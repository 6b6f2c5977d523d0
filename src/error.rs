//! Error types for toolstrap operations.
//!
//! This module defines [`ToolstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Run-level errors (unsupported platform, bad config) abort the run
//! - Per-tool errors are recorded in the run summary and the run continues
//! - Use `anyhow::Error` (via `ToolstrapError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolstrap operations.
#[derive(Debug, Error)]
pub enum ToolstrapError {
    /// The operating system is not one of Linux, macOS or Windows.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// The Linux distribution has no known package manager for this tool.
    #[error("Unsupported distro for installing {tool}: {signature}")]
    UnsupportedDistro { tool: String, signature: String },

    /// A version probe could not be run for a reason other than the
    /// binary being absent.
    #[error("Could not probe '{tool}': {message}")]
    ProbeExecution { tool: String, message: String },

    /// An install or bootstrap command exited non-zero.
    #[error("Installing {tool} failed at step '{step}' (exit code {code:?})")]
    InstallStepFailed {
        tool: String,
        step: String,
        code: Option<i32>,
    },

    /// A package manager was bootstrapped but still cannot be found.
    #[error("{manager} is required to install {tool} but is not available")]
    PrerequisiteUnavailable { manager: String, tool: String },

    /// A command ran longer than its configured timeout.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut { command: String, seconds: u64 },

    /// A command could not be started.
    #[error("Failed to start '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolstrap operations.
pub type Result<T> = std::result::Result<T, ToolstrapError>;

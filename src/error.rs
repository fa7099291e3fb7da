//! Error types for conductor operations.
//!
//! This module defines [`ConductorError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ConductorError` for failures that need distinct handling
//! - Use `anyhow::Error` (via `ConductorError::Other`) inside task
//!   implementations for unexpected errors
//! - Task outcomes are *not* errors: a failing analysis step reports an
//!   [`ExecutionResult`](crate::tasks::ExecutionResult) value instead

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for conductor operations.
#[derive(Debug, Error)]
pub enum ConductorError {
    /// Pipeline file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse pipeline file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid pipeline structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Two tasks registered under the same name.
    #[error("Task '{name}' is already registered")]
    DuplicateTask { name: String },

    /// A dependency edge would close a cycle.
    #[error("Circular dependency detected: {from} -> {to}")]
    CircularDependency { from: String, to: String },

    /// A task lists itself as a dependency.
    #[error("Task '{name}' depends on itself")]
    SelfDependency { name: String },

    /// Shell command could not be started.
    #[error("Failed to start '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Every worker hung up while completions were still outstanding.
    #[error("Worker pool disconnected with {outstanding} task(s) in flight")]
    WorkerDisconnected { outstanding: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for conductor operations.
pub type Result<T> = std::result::Result<T, ConductorError>;

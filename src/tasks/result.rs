//! Task outcome classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::runner::ExecutionMode;

/// Outcome severity, ordered from harmless to fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to report.
    #[default]
    Ok,
    /// Informational; never blocks scheduling.
    Warning,
    /// Blocks scheduling under [`ExecutionMode::FailOnAnyError`].
    Error,
    /// Always blocks scheduling.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a single task execution.
///
/// Flags only ever get set: once a result carries a warning or an error it
/// keeps it for the rest of the task run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    warning: bool,
    error: bool,
    critical_error: bool,
    message: String,
}

impl ExecutionResult {
    /// Create an OK result with an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an OK result.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Create a result carrying a warning.
    pub fn warning(message: impl Into<String>) -> Self {
        let mut result = Self::with_message(message);
        result.set_warning();
        result
    }

    /// Create a result carrying a (non-critical) error.
    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::with_message(message);
        result.set_error();
        result
    }

    /// Create a result carrying a critical error.
    pub fn critical(message: impl Into<String>) -> Self {
        let mut result = Self::with_message(message);
        result.set_critical_error();
        result
    }

    fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Mark the result with a warning.
    pub fn set_warning(&mut self) {
        self.warning = true;
    }

    /// Mark the result with an error. A previous warning is kept.
    pub fn set_error(&mut self) {
        self.error = true;
    }

    /// Mark the result with a critical error (which is also an error).
    pub fn set_critical_error(&mut self) {
        self.error = true;
        self.critical_error = true;
    }

    /// Raise the flag matching `severity` and append `message`.
    pub fn raise(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Ok => {}
            Severity::Warning => self.set_warning(),
            Severity::Error => self.set_error(),
            Severity::Critical => self.set_critical_error(),
        }
        self.append_message(message);
    }

    /// Append a line to the message.
    pub fn append_message(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if !self.message.is_empty() && !self.message.ends_with('\n') {
            self.message.push('\n');
        }
        self.message.push_str(line);
    }

    /// Set a warning with `message` unless `ok` holds. Returns `ok`.
    pub fn warning_if_fail(&mut self, ok: bool, message: &str) -> bool {
        if !ok {
            self.raise(Severity::Warning, message);
        }
        ok
    }

    /// Set an error with `message` unless `ok` holds. Returns `ok`.
    pub fn error_if_fail(&mut self, ok: bool, message: &str) -> bool {
        if !ok {
            self.raise(Severity::Error, message);
        }
        ok
    }

    /// Set a critical error with `message` unless `ok` holds. Returns `ok`.
    pub fn critical_if_fail(&mut self, ok: bool, message: &str) -> bool {
        if !ok {
            self.raise(Severity::Critical, message);
        }
        ok
    }

    pub fn has_warning(&self) -> bool {
        self.warning
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn has_critical_error(&self) -> bool {
        self.critical_error
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Highest severity carried by this result.
    pub fn severity(&self) -> Severity {
        if self.critical_error {
            Severity::Critical
        } else if self.error {
            Severity::Error
        } else if self.warning {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    /// Whether this outcome halts scheduling under `mode`.
    pub fn is_fatal(&self, mode: ExecutionMode) -> bool {
        self.critical_error || (self.error && mode == ExecutionMode::FailOnAnyError)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.warning {
            parts.push("warning");
        }
        if self.critical_error {
            parts.push("critical");
        }
        if self.error {
            parts.push("error");
        }

        if parts.is_empty() {
            write!(f, "OK")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

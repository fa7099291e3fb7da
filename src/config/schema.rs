//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to
//! the `conductor.yml` file format.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::runner::ExecutionMode;
use crate::tasks::Severity;

/// Root configuration structure for conductor.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Global settings
    pub settings: Settings,

    /// Task definitions, keyed by name
    pub tasks: BTreeMap<String, TaskConfig>,
}

impl PipelineConfig {
    /// Names of tasks with `enabled: false`, sorted.
    pub fn inactive_tasks(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|(_, t)| !t.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Enabled tasks, sorted by name.
    pub fn active_tasks(&self) -> impl Iterator<Item = (&String, &TaskConfig)> {
        self.tasks.iter().filter(|(_, t)| t.enabled)
    }
}

/// Settings that apply to the whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which outcomes stop new submissions
    pub mode: ExecutionMode,

    /// Maximum concurrent tasks (defaults to available parallelism)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Run and task log directory (relative to project root)
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Dump the process environment next to the run log
    #[serde(default, skip_serializing_if = "is_false")]
    pub log_environment: bool,

    /// Environment variables passed to every task
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            workers: None,
            log_dir: default_log_dir(),
            log_environment: false,
            env: HashMap::new(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".conductor/logs")
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_true(b: &bool) -> bool {
    *b
}

fn default_true() -> bool {
    true
}

fn default_on_failure() -> Severity {
    Severity::Critical
}

/// A single task definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Shell command to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tasks that must finish first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Working directory (relative to project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,

    /// Task-specific environment, layered over `settings.env`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    /// Severity raised when the command fails
    #[serde(default = "default_on_failure")]
    pub on_failure: Severity,

    /// Raise a warning when the command writes to stderr
    #[serde(default, skip_serializing_if = "is_false")]
    pub warn_on_stderr: bool,

    /// Disabled tasks are not registered
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            command: None,
            description: None,
            depends_on: Vec::new(),
            workdir: None,
            env: HashMap::new(),
            on_failure: default_on_failure(),
            warn_on_stderr: false,
            enabled: true,
        }
    }
}

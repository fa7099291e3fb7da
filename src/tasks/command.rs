//! Command-backed analysis step.
//!
//! Every step of an analysis toolchain ends up shelling out to some tool
//! (a compiler wrapper, a rule checker, a metrics dumper). [`CommandTask`]
//! runs one command line, records everything it printed in the task log,
//! and classifies a nonzero exit with a configurable severity.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{Settings, TaskConfig};
use crate::error::{ConductorError, Result};
use crate::shell::{self, CommandOptions};

use super::result::{ExecutionResult, Severity};
use super::task::{Task, TaskLog};

/// A task that runs a single shell command line.
#[derive(Debug, Clone)]
pub struct CommandTask {
    name: String,
    depends_on: Vec<String>,
    command: String,
    cwd: Option<PathBuf>,
    env: HashMap<String, String>,
    on_failure: Severity,
    warn_on_stderr: bool,
}

impl CommandTask {
    /// Create a task running `command` with no dependencies.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            command: command.into(),
            cwd: None,
            env: HashMap::new(),
            on_failure: Severity::Critical,
            warn_on_stderr: false,
        }
    }

    /// Build a task from its pipeline entry.
    ///
    /// The working directory is resolved against `project_root`, and the
    /// task environment is layered over the global one from `settings`.
    pub fn from_config(
        name: &str,
        config: &TaskConfig,
        settings: &Settings,
        project_root: &Path,
    ) -> Result<Self> {
        let command = config
            .command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ConductorError::ConfigValidationError {
                message: format!("Task '{}' has no command", name),
            })?;

        let cwd = match &config.workdir {
            Some(dir) => project_root.join(dir),
            None => project_root.to_path_buf(),
        };

        let mut env = settings.env.clone();
        env.extend(config.env.clone());

        Ok(Self {
            name: name.to_string(),
            depends_on: config.depends_on.clone(),
            command,
            cwd: Some(cwd),
            env,
            on_failure: config.on_failure,
            warn_on_stderr: config.warn_on_stderr,
        })
    }

    pub fn depends(mut self, names: &[&str]) -> Self {
        self.depends_on = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Severity raised when the command cannot start or exits nonzero.
    pub fn on_failure(mut self, severity: Severity) -> Self {
        self.on_failure = severity;
        self
    }

    pub fn warn_on_stderr(mut self, enabled: bool) -> Self {
        self.warn_on_stderr = enabled;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }
}

impl Task for CommandTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    fn execute(&self, log: &mut TaskLog) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new();

        log.line(&format!("Command: {}", self.command))?;
        if let Some(cwd) = &self.cwd {
            log.line(&format!("Working directory: {}", cwd.display()))?;
        }

        let options = CommandOptions {
            cwd: self.cwd.clone(),
            env: self.env.clone(),
            capture_stdout: true,
            capture_stderr: true,
        };

        let output = match shell::execute(&self.command, &options) {
            Ok(output) => output,
            Err(e) => {
                log.line(&e.to_string())?;
                result.raise(self.on_failure, &e.to_string());
                return Ok(result);
            }
        };

        if !output.stdout.is_empty() {
            log.line("--- stdout ---")?;
            log.line(output.stdout.trim_end())?;
        }
        if !output.stderr.is_empty() {
            log.line("--- stderr ---")?;
            log.line(output.stderr.trim_end())?;
        }

        let code = output
            .exit_code
            .map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string());
        log.line(&format!("Exit code: {}", code))?;

        if !output.success {
            result.raise(
                self.on_failure,
                &format!("'{}' exited with code {}", self.command, code),
            );
        } else if self.warn_on_stderr && !output.stderr.trim().is_empty() {
            result.raise(
                Severity::Warning,
                &format!("'{}' wrote to stderr", self.command),
            );
        }

        Ok(result)
    }
}

//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Tasks must have a non-empty command
//! - A task may not depend on itself
//! - `workers` must be at least 1
//!
//! Dependencies on unknown or disabled tasks are not errors; the engine
//! ignores them. [`dependency_warnings`] reports them separately.
//! Cycles are detected when the graph is built.

use crate::config::schema::PipelineConfig;
use crate::error::{ConductorError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Task name if error is task-specific
    pub task: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_settings(config));
    errors.extend(validate_tasks(config));

    errors
}

fn validate_settings(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.settings.workers == Some(0) {
        errors.push(ValidationError {
            rule: "zero-workers".to_string(),
            message: "settings.workers must be at least 1".to_string(),
            task: None,
        });
    }

    errors
}

fn validate_tasks(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, task) in &config.tasks {
        match &task.command {
            None => errors.push(ValidationError {
                rule: "missing-command".to_string(),
                message: format!("Task '{}' must have a 'command'", name),
                task: Some(name.clone()),
            }),
            Some(cmd) if cmd.trim().is_empty() => errors.push(ValidationError {
                rule: "empty-command".to_string(),
                message: format!("Task '{}' has an empty command", name),
                task: Some(name.clone()),
            }),
            Some(_) => {}
        }

        if task.depends_on.iter().any(|dep| dep == name) {
            errors.push(ValidationError {
                rule: "self-dependency".to_string(),
                message: format!("Task '{}' depends on itself", name),
                task: Some(name.clone()),
            });
        }
    }

    errors
}

/// Dependencies the engine will skip: unknown names and disabled tasks.
pub fn dependency_warnings(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    for (name, task) in config.active_tasks() {
        for dep in &task.depends_on {
            match config.tasks.get(dep) {
                None => warnings.push(ValidationError {
                    rule: "unknown-dependency".to_string(),
                    message: format!(
                        "Task '{}' depends on '{}' which does not exist; ignored",
                        name, dep
                    ),
                    task: Some(name.clone()),
                }),
                Some(t) if !t.enabled => warnings.push(ValidationError {
                    rule: "inactive-dependency".to_string(),
                    message: format!(
                        "Task '{}' depends on '{}' which is disabled; ignored",
                        name, dep
                    ),
                    task: Some(name.clone()),
                }),
                Some(_) => {}
            }
        }
    }

    warnings
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PipelineConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ConductorError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TaskConfig;

    fn task(command: &str, deps: &[&str]) -> TaskConfig {
        TaskConfig {
            command: Some(command.to_string()),
            depends_on: deps.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn validates_task_has_command() {
        let mut config = PipelineConfig::default();
        config
            .tasks
            .insert("empty".to_string(), TaskConfig::default());

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "missing-command"));
    }

    #[test]
    fn validates_command_not_blank() {
        let mut config = PipelineConfig::default();
        config.tasks.insert("blank".to_string(), task("   ", &[]));

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "empty-command"));
    }

    #[test]
    fn detects_self_dependency() {
        let mut config = PipelineConfig::default();
        config.tasks.insert("loop".to_string(), task("x", &["loop"]));

        let errors = validate_config(&config);
        let err = errors.iter().find(|e| e.rule == "self-dependency").unwrap();
        assert_eq!(err.task.as_deref(), Some("loop"));
    }

    #[test]
    fn rejects_zero_workers() {
        let mut config = PipelineConfig::default();
        config.settings.workers = Some(0);

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "zero-workers"));
    }

    #[test]
    fn unknown_dependency_is_only_a_warning() {
        let mut config = PipelineConfig::default();
        config.tasks.insert("a".to_string(), task("a", &["ghost"]));

        assert!(validate_config(&config).is_empty());
        let warnings = dependency_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, "unknown-dependency");
    }

    #[test]
    fn disabled_dependency_is_only_a_warning() {
        let mut config = PipelineConfig::default();
        let mut off = task("b", &[]);
        off.enabled = false;
        config.tasks.insert("b".to_string(), off);
        config.tasks.insert("a".to_string(), task("a", &["b"]));

        assert!(validate_config(&config).is_empty());
        let warnings = dependency_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, "inactive-dependency");
    }

    #[test]
    fn valid_config_returns_no_errors() {
        let mut config = PipelineConfig::default();
        config.tasks.insert("a".to_string(), task("a", &[]));
        config.tasks.insert("b".to_string(), task("b", &["a"]));

        assert!(validate_config(&config).is_empty());
        assert!(dependency_warnings(&config).is_empty());
    }

    #[test]
    fn validate_returns_result() {
        let config = PipelineConfig::default();
        assert!(validate(&config).is_ok());

        let mut bad_config = PipelineConfig::default();
        bad_config
            .tasks
            .insert("empty".to_string(), TaskConfig::default());
        assert!(validate(&bad_config).is_err());
    }
}

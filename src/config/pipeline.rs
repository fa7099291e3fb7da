//! Turning a loaded pipeline file into a runnable [`Orchestrator`].

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::PipelineConfig;
use crate::error::Result;
use crate::runner::{default_worker_count, Orchestrator, RunContext};
use crate::tasks::CommandTask;

/// Register every enabled task of `config` with a new orchestrator.
///
/// Disabled tasks are skipped; dependencies on them are ignored when the
/// graph is built.
pub fn build_orchestrator(
    config: &PipelineConfig,
    project_root: &Path,
    context: RunContext,
) -> Result<Orchestrator> {
    let workers = config
        .settings
        .workers
        .unwrap_or_else(default_worker_count);
    let mut orchestrator = Orchestrator::new(context, workers);

    for (name, task) in config.active_tasks() {
        let task = CommandTask::from_config(name, task, &config.settings, project_root)?;
        orchestrator.add_task(task)?;
    }

    for name in config.inactive_tasks() {
        debug!("Skipping inactive task {}", name);
    }

    Ok(orchestrator)
}

/// Log directory for a run: the override if given, else `settings.log_dir`,
/// relative paths resolved against `project_root`.
pub fn resolve_log_dir(
    config: &PipelineConfig,
    project_root: &Path,
    override_dir: Option<&Path>,
) -> PathBuf {
    let dir = override_dir.unwrap_or(&config.settings.log_dir);
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        project_root.join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::error::ConductorError;

    fn parse(yaml: &str) -> PipelineConfig {
        parse_config(yaml, Path::new("conductor.yml")).unwrap()
    }

    #[test]
    fn registers_only_enabled_tasks() {
        let config = parse(
            r#"
tasks:
  build:
    command: make
  docs:
    command: make docs
    enabled: false
"#,
        );

        let orchestrator =
            build_orchestrator(&config, Path::new("."), RunContext::in_memory()).unwrap();
        assert_eq!(orchestrator.task_names(), vec!["build"]);
    }

    #[test]
    fn workers_come_from_settings() {
        let config = parse("settings:\n  workers: 3\n");
        let orchestrator =
            build_orchestrator(&config, Path::new("."), RunContext::in_memory()).unwrap();
        assert_eq!(orchestrator.workers(), 3);
    }

    #[test]
    fn workers_default_to_available_parallelism() {
        let config = parse("tasks: {}\n");
        let orchestrator =
            build_orchestrator(&config, Path::new("."), RunContext::in_memory()).unwrap();
        assert_eq!(orchestrator.workers(), default_worker_count());
    }

    #[test]
    fn task_without_command_is_rejected() {
        let config = parse("tasks:\n  broken:\n    description: nothing to run\n");
        let err = build_orchestrator(&config, Path::new("."), RunContext::in_memory())
            .err()
            .unwrap();
        assert!(matches!(err, ConductorError::ConfigValidationError { .. }));
    }

    #[test]
    fn dependency_on_disabled_task_is_ignored_by_graph() {
        let config = parse(
            r#"
tasks:
  a:
    command: "true"
    enabled: false
  b:
    command: "true"
    depends_on: [a]
"#,
        );

        let mut orchestrator =
            build_orchestrator(&config, Path::new("."), RunContext::in_memory()).unwrap();
        orchestrator.build_graph().unwrap();
        assert!(orchestrator.is_ready("b"));
    }

    #[test]
    fn log_dir_resolution() {
        let config = PipelineConfig::default();
        let root = Path::new("/project");

        assert_eq!(
            resolve_log_dir(&config, root, None),
            PathBuf::from("/project/.conductor/logs")
        );
        assert_eq!(
            resolve_log_dir(&config, root, Some(Path::new("out"))),
            PathBuf::from("/project/out")
        );
        assert_eq!(
            resolve_log_dir(&config, root, Some(Path::new("/var/log/ci"))),
            PathBuf::from("/var/log/ci")
        );
    }
}

//! Run command implementation.
//!
//! The `conductor run` command loads the pipeline, executes every enabled
//! task in dependency order, and exits with the run's status.

use tracing::debug;

use crate::cli::args::RunArgs;
use crate::config::{build_orchestrator, dependency_warnings, resolve_log_dir, validate_config};
use crate::error::{ConductorError, Result};
use crate::runner::{RunContext, RunReport};
use crate::tasks::Severity;
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult, PipelineLocation, CONFIG_ERROR_EXIT_CODE};

/// The run command implementation.
pub struct RunCommand {
    location: PipelineLocation,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(location: PipelineLocation, args: RunArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn show_summary(&self, report: &RunReport, inactive: &[&str], ui: &mut dyn UserInterface) {
        for outcome in &report.outcomes {
            let line = format!(
                "{} ({})",
                outcome.name,
                format_duration(outcome.duration)
            );
            match outcome.result.severity() {
                Severity::Ok => ui.success(&line),
                Severity::Warning => {
                    ui.warning(&format!("{}: {}", line, outcome.result.message().trim()))
                }
                Severity::Error | Severity::Critical => ui.error(&format!(
                    "{} [{}]: {}",
                    line,
                    outcome.result,
                    outcome.result.message().trim()
                )),
            }
        }

        if !report.not_started.is_empty() {
            ui.message(&format!("Not started: {}", report.not_started.join(", ")));
        }
        if !inactive.is_empty() {
            ui.message(&format!("Inactive: {}", inactive.join(", ")));
        }

        ui.message("");
        if report.success {
            ui.success(&format!(
                "{} task(s) finished in {}",
                report.outcomes.len(),
                format_duration(report.duration)
            ));
        } else {
            ui.error(&format!(
                "Run failed after {}: {} error(s), {} critical",
                format_duration(report.duration),
                report.count(Severity::Error),
                report.count(Severity::Critical)
            ));
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(mut config) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        };

        let errors = validate_config(&config);
        if !errors.is_empty() {
            for error in &errors {
                ui.error(&error.message);
            }
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        }
        for warning in dependency_warnings(&config) {
            ui.warning(&warning.message);
        }

        if let Some(workers) = self.args.workers {
            config.settings.workers = Some(usize::from(workers));
        }
        let mode = self.args.mode.unwrap_or(config.settings.mode);
        let root = &self.location.project_root;
        let log_dir = resolve_log_dir(&config, root, self.args.log_dir.as_deref());
        let echo = !self.args.no_echo && ui.output_mode().shows_status();

        debug!("Logging run to {}", log_dir.display());
        let context = RunContext::new(Some(log_dir), echo)?;
        if config.settings.log_environment {
            context.log_environment()?;
        }

        let mut orchestrator = build_orchestrator(&config, root, context)?;
        ui.show_header(&format!(
            "Running {} task(s) with {} worker(s) ({})",
            orchestrator.len(),
            orchestrator.workers(),
            mode
        ));

        let report = match orchestrator.execute_tasks(mode) {
            Ok(report) => report,
            Err(
                e @ (ConductorError::CircularDependency { .. }
                | ConductorError::SelfDependency { .. }),
            ) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
            }
            Err(e) => return Err(e),
        };

        self.show_summary(&report, &config.inactive_tasks(), ui);

        if report.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}

//! Check command implementation.
//!
//! The `conductor check` command validates the pipeline file and builds its
//! dependency graph without running anything.

use crate::cli::args::CheckArgs;
use crate::config::{build_orchestrator, dependency_warnings, validate_config};
use crate::error::Result;
use crate::runner::RunContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, PipelineLocation};

/// The check command implementation.
pub struct CheckCommand {
    location: PipelineLocation,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(location: PipelineLocation, args: CheckArgs) -> Self {
        Self { location, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(1));
        };

        let errors = validate_config(&config);
        let warnings = dependency_warnings(&config);

        for error in &errors {
            ui.error(&error.message);
        }
        for warning in &warnings {
            ui.warning(&warning.message);
        }

        if !errors.is_empty() {
            return Ok(CommandResult::failure(1));
        }

        let mut orchestrator =
            build_orchestrator(&config, &self.location.project_root, RunContext::in_memory())?;
        if let Err(e) = orchestrator.build_graph() {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(1));
        }

        if self.args.strict && !warnings.is_empty() {
            ui.error(&format!("{} warning(s) in strict mode", warnings.len()));
            return Ok(CommandResult::failure(1));
        }

        ui.success(&format!(
            "Pipeline is valid ({} task(s), {} inactive)",
            orchestrator.len(),
            config.inactive_tasks().len()
        ));
        Ok(CommandResult::success())
    }
}

//! Plan command implementation.
//!
//! The `conductor plan` command prints the waves of tasks that would start
//! together if every task succeeded.

use crate::config::{build_orchestrator, validate_config};
use crate::error::Result;
use crate::runner::RunContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, PipelineLocation, CONFIG_ERROR_EXIT_CODE};

/// The plan command implementation.
pub struct PlanCommand {
    location: PipelineLocation,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(location: PipelineLocation) -> Self {
        Self { location }
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        };

        let errors = validate_config(&config);
        if !errors.is_empty() {
            for error in &errors {
                ui.error(&error.message);
            }
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        }

        let mut orchestrator =
            build_orchestrator(&config, &self.location.project_root, RunContext::in_memory())?;
        if let Err(e) = orchestrator.build_graph() {
            ui.error(&e.to_string());
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        }

        ui.show_header(&format!(
            "Plan for {} task(s) ({} mode)",
            orchestrator.len(),
            config.settings.mode
        ));
        for (i, wave) in orchestrator.graph().waves().iter().enumerate() {
            ui.message(&format!("  {}. {}", i + 1, wave.join(", ")));
        }

        let inactive = config.inactive_tasks();
        if !inactive.is_empty() {
            ui.message("");
            ui.message(&format!("  Inactive: {}", inactive.join(", ")));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn plan(config: &str) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("conductor.yml"), config).unwrap();
        let mut ui = MockUI::new();
        let result = PlanCommand::new(PipelineLocation::new(temp.path(), None))
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn prints_waves_in_order() {
        let (result, ui) = plan(
            r#"
tasks:
  clean:
    command: x
  analyze:
    command: x
    depends_on: [clean]
  docs:
    command: x
    depends_on: [clean]
  report:
    command: x
    depends_on: [analyze, docs]
"#,
        );

        assert!(result.success);
        assert_eq!(
            ui.messages(),
            ["  1. clean", "  2. analyze, docs", "  3. report"]
        );
    }

    #[test]
    fn lists_inactive_tasks() {
        let (result, ui) = plan(
            "tasks:\n  a:\n    command: x\n  b:\n    command: x\n    enabled: false\n",
        );
        assert!(result.success);
        assert!(ui.has_message("Inactive: b"));
    }

    #[test]
    fn cycle_is_a_config_error() {
        let (result, ui) = plan(
            "tasks:\n  a:\n    command: x\n    depends_on: [b]\n  b:\n    command: x\n    depends_on: [a]\n",
        );
        assert_eq!(result.exit_code, CONFIG_ERROR_EXIT_CODE);
        assert!(ui.has_error("Circular dependency"));
    }
}

//! List command implementation.
//!
//! The `conductor list` command lists tasks and their dependencies.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::theme::ConductorTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, PipelineLocation, CONFIG_ERROR_EXIT_CODE};

/// The list command implementation.
pub struct ListCommand {
    location: PipelineLocation,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(location: PipelineLocation, args: ListArgs) -> Self {
        Self { location, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.location.load(ui)? else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
        };

        let theme = ConductorTheme::new();

        ui.message(&format!("  {}", theme.highlight.apply_to("Tasks:")));
        for (name, task) in &config.tasks {
            if !task.enabled && !self.args.all {
                continue;
            }

            let command = task.command.as_deref().unwrap_or("");
            let disabled = if task.enabled {
                String::new()
            } else {
                format!(" {}", theme.warning.apply_to("(disabled)"))
            };
            ui.message(&format!(
                "    {}{} {} {}",
                theme.highlight.apply_to(name),
                disabled,
                theme.dim.apply_to("-"),
                command
            ));

            if let Some(ref desc) = task.description {
                ui.message(&format!("      {}", theme.dim.apply_to(desc)));
            }

            if !task.depends_on.is_empty() {
                ui.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("└── depends on:"),
                    theme.dim.apply_to(task.depends_on.join(", "))
                ));
            }
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

    const PIPELINE: &str = r#"
tasks:
  clean:
    command: rm -rf build
    description: Remove build output
  analyze:
    command: ./analyze.sh
    depends_on: [clean]
  docs:
    command: make docs
    enabled: false
"#;

    fn list(args: ListArgs) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("conductor.yml"), PIPELINE).unwrap();
        let mut ui = MockUI::new();
        let result = ListCommand::new(PipelineLocation::new(temp.path(), None), args)
            .execute(&mut ui)
            .unwrap();
        (result, ui)
    }

    #[test]
    fn lists_enabled_tasks_with_details() {
        let (result, ui) = list(ListArgs::default());

        assert!(result.success);
        assert!(ui.has_message("rm -rf build"));
        assert!(ui.has_message("Remove build output"));
        assert!(ui.has_message("depends on:"));
        assert!(!ui.has_message("make docs"));
    }

    #[test]
    fn all_includes_disabled_tasks() {
        let (result, ui) = list(ListArgs { all: true });

        assert!(result.success);
        assert!(ui.has_message("make docs"));
        assert!(ui.has_message("(disabled)"));
    }

    #[test]
    fn missing_pipeline_is_config_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = ListCommand::new(
            PipelineLocation::new(temp.path(), None),
            ListArgs::default(),
        )
        .execute(&mut ui)
        .unwrap();
        assert_eq!(result.exit_code, CONFIG_ERROR_EXIT_CODE);
    }
}

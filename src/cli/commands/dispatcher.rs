//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, PipelineConfig};
use crate::error::{ConductorError, Result};
use crate::ui::UserInterface;

/// Exit code for a pipeline file that can't be loaded or is invalid.
pub const CONFIG_ERROR_EXIT_CODE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds its pipeline.
#[derive(Debug, Clone)]
pub struct PipelineLocation {
    pub project_root: PathBuf,
    pub config: Option<PathBuf>,
}

impl PipelineLocation {
    pub fn new(project_root: &Path, config: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.map(Path::to_path_buf),
        }
    }

    /// Load the pipeline, reporting a missing or malformed file on `ui`.
    ///
    /// Returns `Ok(None)` when the problem was reported.
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<Option<PipelineConfig>> {
        match load_config(&self.project_root, self.config.as_deref()) {
            Ok(config) => Ok(Some(config)),
            Err(ConductorError::ConfigNotFound { path }) => {
                ui.error(&format!("No pipeline file found at {}", path.display()));
                Ok(None)
            }
            Err(e @ ConductorError::ConfigParseError { .. }) => {
                ui.error(&e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    location: PipelineLocation,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            location: PipelineLocation {
                project_root,
                config,
            },
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.location.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let location = self.location.clone();
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(location, args.clone()).execute(ui)
            }
            Some(Commands::Plan) => super::plan::PlanCommand::new(location).execute(ui),
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(location, args.clone()).execute(ui)
            }
            None => super::run::RunCommand::new(location, RunArgs::default()).execute(ui),
        }
    }
}

//! Conductor - run a pipeline of dependent tasks on a pool of workers.
//!
//! Tasks declare the names of the tasks they depend on. The orchestrator
//! builds a dependency graph, starts every task whose prerequisites have
//! finished, and stops starting new ones once a failure it considers fatal
//! has been observed.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Pipeline file loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Dependency graph, worker pool, and orchestration
//! - [`shell`] - Shell command execution
//! - [`tasks`] - Task contract, outcomes, and command tasks
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use conductor::runner::{ExecutionMode, Orchestrator, RunContext};
//! use conductor::tasks::{ExecutionResult, Task, TaskLog};
//!
//! struct Step {
//!     name: String,
//!     deps: Vec<String>,
//! }
//!
//! impl Task for Step {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     fn depends_on(&self) -> &[String] {
//!         &self.deps
//!     }
//!
//!     fn execute(&self, _log: &mut TaskLog) -> conductor::Result<ExecutionResult> {
//!         Ok(ExecutionResult::ok())
//!     }
//! }
//!
//! let mut orchestrator = Orchestrator::new(RunContext::in_memory(), 2);
//! orchestrator.add_task(Step { name: "Clean".into(), deps: vec![] }).unwrap();
//! orchestrator
//!     .add_task(Step { name: "Analyze".into(), deps: vec!["Clean".into()] })
//!     .unwrap();
//!
//! let report = orchestrator.execute_tasks(ExecutionMode::FailOnAnyError).unwrap();
//! assert!(report.success);
//! assert_eq!(report.executed(), vec!["Clean", "Analyze"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod tasks;
pub mod ui;

pub use error::{ConductorError, Result};

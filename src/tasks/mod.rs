//! Task contract, outcomes, and the command-backed task.
//!
//! - [`Task`] - A named unit of work with prerequisites
//! - [`ExecutionResult`] - The outcome of one task run
//! - [`TaskLog`] - Write-only log sink handed to each task run
//! - [`CommandTask`] - A task that shells out to an external tool
//!
//! # Example
//!
//! ```
//! use conductor::tasks::{ExecutionResult, Severity, Task, TaskLog};
//!
//! struct CheckProfile {
//!     deps: Vec<String>,
//! }
//!
//! impl Task for CheckProfile {
//!     fn name(&self) -> &str {
//!         "CheckProfile"
//!     }
//!
//!     fn depends_on(&self) -> &[String] {
//!         &self.deps
//!     }
//!
//!     fn execute(&self, log: &mut TaskLog) -> conductor::Result<ExecutionResult> {
//!         let mut result = ExecutionResult::new();
//!         log.line("profile looks fine")?;
//!         result.warning_if_fail(false, "profile uses deprecated keys");
//!         Ok(result)
//!     }
//! }
//!
//! let task = CheckProfile { deps: vec![] };
//! let result = task.execute(&mut TaskLog::discard()).unwrap();
//! assert_eq!(result.severity(), Severity::Warning);
//! ```

pub mod command;
pub mod result;
pub mod task;

pub use command::CommandTask;
pub use result::{ExecutionResult, Severity};
pub use task::{Task, TaskLog};

//! Task execution orchestration.

pub mod context;
pub mod dependency;
pub mod orchestrator;
pub mod pool;
pub mod worker;

pub use context::{task_log_file_name, RunContext, RUN_LOG_FILE, TASK_LOG_DIR};
pub use dependency::{DependencyGraph, EdgeInsertion};
pub use orchestrator::{ExecutionMode, Orchestrator, RunReport, TaskOutcome};
pub use pool::{default_worker_count, WorkerPool};
pub use worker::{Completion, Worker};

//! Execution of a single task on a pool thread.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;

use crate::error::Result;
use crate::tasks::{ExecutionResult, Task};
use crate::ui::format_duration;

use super::context::RunContext;

/// A finished task run, reported back to the coordinator.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Task name.
    pub name: String,
    /// Outcome of the run.
    pub result: ExecutionResult,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Wraps one task run: timing, start/end log lines, and error capture.
pub struct Worker {
    name: String,
    task: Arc<dyn Task>,
    context: Arc<RunContext>,
    completions: Sender<Completion>,
}

impl Worker {
    /// `name` is the key the coordinator tracks the task under; the
    /// completion is always reported with it.
    pub fn new(
        name: impl Into<String>,
        task: Arc<dyn Task>,
        context: Arc<RunContext>,
        completions: Sender<Completion>,
    ) -> Self {
        Self {
            name: name.into(),
            task,
            context,
            completions,
        }
    }

    /// Run the task and deliver exactly one [`Completion`].
    ///
    /// Errors returned by the task and panics raised anywhere in the run,
    /// including the run log writes around it, are turned into critical
    /// results; nothing escapes to the caller.
    pub fn run(self) {
        let start = Instant::now();

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.logged_run(start)))
            .unwrap_or_else(|payload| {
                let message = format!("worker panicked: {}", panic_message(payload.as_ref()));
                tracing::warn!("Task '{}' {}", self.name, message);
                ExecutionResult::critical(message)
            });

        let completion = Completion {
            name: self.name,
            result,
            duration: start.elapsed(),
        };
        if let Err(e) = self.completions.send(completion) {
            tracing::warn!("Coordinator gone, dropping completion of '{}'", e.0.name);
        }
    }

    fn logged_run(&self, start: Instant) -> ExecutionResult {
        let label = self.task.name();
        self.context.write_line(&format!("{} started", label));

        let result = self.invoke();

        self.context.write_line(&format!(
            "{} ended in {} ({})",
            label,
            format_duration(start.elapsed()),
            result
        ));
        result
    }

    fn invoke(&self) -> ExecutionResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<ExecutionResult> {
            let mut log = self.context.task_log(&self.name)?;
            self.task.execute(&mut log)
        }));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::warn!("Task '{}' errored: {}", self.name, e);
                ExecutionResult::critical(e.to_string())
            }
            Err(payload) => {
                let message = format!("task panicked: {}", panic_message(payload.as_ref()));
                tracing::warn!("Task '{}' {}", self.name, message);
                ExecutionResult::critical(message)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

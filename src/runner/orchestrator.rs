//! Dependency-ordered concurrent task execution.
//!
//! The [`Orchestrator`] owns every task of a run. It builds a
//! [`DependencyGraph`] from the declared dependencies, submits ready tasks
//! to a [`WorkerPool`], and applies completions one at a time on the calling
//! thread. Workers never touch the graph; they only report a
//! [`Completion`] over a channel shared by the whole run.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConductorError, Result};
use crate::tasks::{ExecutionResult, Severity, Task};
use crate::ui::format_duration;

use super::context::RunContext;
use super::dependency::{DependencyGraph, EdgeInsertion};
use super::pool::WorkerPool;
use super::worker::{Completion, Worker};

/// Run-wide policy deciding which outcomes stop new submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Any error, critical or not, stops new submissions.
    #[default]
    FailOnAnyError,
    /// Only critical errors stop new submissions.
    FailOnCriticalErrorOnly,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionMode::FailOnAnyError => "fail-on-any-error",
            ExecutionMode::FailOnCriticalErrorOnly => "fail-on-critical-error-only",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one executed task.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub name: String,
    pub result: ExecutionResult,
    pub duration: Duration,
}

/// Result of [`Orchestrator::execute_tasks`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Executed tasks, in completion order.
    pub outcomes: Vec<TaskOutcome>,
    /// Tasks never submitted because the run failed first, sorted.
    pub not_started: Vec<String>,
    /// Total duration of the run.
    pub duration: Duration,
    /// Whether no fatal outcome was observed.
    pub success: bool,
}

impl RunReport {
    /// Process exit status for this run.
    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }

    /// Outcome of the named task, if it ran.
    pub fn outcome(&self, name: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Executed task names, in completion order.
    pub fn executed(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.name.as_str()).collect()
    }

    /// Number of executed tasks whose highest severity is `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.severity() == severity)
            .count()
    }

    /// Executed tasks that raised at least a warning.
    pub fn warnings(&self) -> Vec<&TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.result.has_warning())
            .collect()
    }
}

/// Owns the tasks of a run and schedules them.
pub struct Orchestrator {
    tasks: HashMap<String, Arc<dyn Task>>,
    graph: DependencyGraph,
    context: Arc<RunContext>,
    workers: usize,
}

impl Orchestrator {
    /// Create an orchestrator running at most `workers` tasks at once.
    pub fn new(context: RunContext, workers: usize) -> Self {
        Self::with_shared_context(Arc::new(context), workers)
    }

    /// Create an orchestrator logging to an already shared context.
    pub fn with_shared_context(context: Arc<RunContext>, workers: usize) -> Self {
        Self {
            tasks: HashMap::new(),
            graph: DependencyGraph::new(),
            context,
            workers: workers.max(1),
        }
    }

    /// Register a task. Names must be unique.
    pub fn add_task<T: Task + 'static>(&mut self, task: T) -> Result<()> {
        self.insert(Arc::new(task))
    }

    /// Register an already boxed task.
    pub fn add_boxed_task(&mut self, task: Box<dyn Task>) -> Result<()> {
        self.insert(Arc::from(task))
    }

    fn insert(&mut self, task: Arc<dyn Task>) -> Result<()> {
        let name = task.name().to_string();
        if self.tasks.contains_key(&name) {
            return Err(ConductorError::DuplicateTask { name });
        }
        self.tasks.insert(name, task);
        Ok(())
    }

    /// Registered task names, sorted.
    pub fn task_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tasks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn context(&self) -> &Arc<RunContext> {
        &self.context
    }

    /// Current dependency graph (empty until [`Orchestrator::build_graph`]).
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Rebuild the dependency graph from the registered tasks.
    ///
    /// Dependencies on unregistered names are ignored. A dependency that
    /// would close a cycle, or a task depending on itself, is an error.
    pub fn build_graph(&mut self) -> Result<()> {
        let mut graph = DependencyGraph::new();
        let names = self.task_names();

        for name in &names {
            graph.add_node(name);
        }

        for name in &names {
            let task = &self.tasks[name];
            for dependency in task.depends_on() {
                if !self.tasks.contains_key(dependency) {
                    debug!(
                        "Ignoring dependency of '{}' on unregistered task '{}'",
                        name, dependency
                    );
                    continue;
                }

                match graph.add_edge(dependency, name) {
                    EdgeInsertion::Added | EdgeInsertion::AlreadyExists => {}
                    EdgeInsertion::IntroducesCycle => {
                        return Err(ConductorError::CircularDependency {
                            from: dependency.clone(),
                            to: name.clone(),
                        });
                    }
                    EdgeInsertion::SelfEdgeRejected => {
                        return Err(ConductorError::SelfDependency { name: name.clone() });
                    }
                }
            }
        }

        self.graph = graph;
        Ok(())
    }

    /// Whether `name` is in the graph with no unfinished prerequisites.
    pub fn is_ready(&self, name: &str) -> bool {
        self.graph.in_edges(name).is_some_and(|edges| edges.is_empty())
    }

    /// Run every task in dependency order.
    ///
    /// Graph construction errors are returned before any task starts. Once
    /// a fatal outcome is observed under `mode`, no new task is submitted;
    /// tasks already running are allowed to finish.
    pub fn execute_tasks(&mut self, mode: ExecutionMode) -> Result<RunReport> {
        let start = Instant::now();
        self.context.write_line(&format!(
            "Run started: {} task(s), {} worker(s), {}",
            self.tasks.len(),
            self.workers,
            mode
        ));

        if let Err(e) = self.build_graph() {
            self.context.write_line(&format!("Run failed: {}", e));
            return Err(e);
        }

        let pool = WorkerPool::new(self.workers)?;
        let (tx, rx) = unbounded::<Completion>();

        let mut outstanding = 0usize;
        for name in self.graph.roots() {
            if self.submit(&pool, &name, &tx) {
                outstanding += 1;
            }
        }

        let mut failed = false;
        let mut outcomes = Vec::with_capacity(self.tasks.len());

        while outstanding > 0 {
            let completion = rx
                .recv()
                .map_err(|_| ConductorError::WorkerDisconnected { outstanding })?;
            outstanding -= 1;

            let dependents = self
                .graph
                .out_edges(&completion.name)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            self.graph.remove_node(&completion.name);

            if completion.result.is_fatal(mode) && !failed {
                warn!(
                    "Task '{}' failed ({}); no further tasks will be started",
                    completion.name, completion.result
                );
                failed = true;
            }

            if !failed {
                for dependent in dependents {
                    if self.is_ready(&dependent) && self.submit(&pool, &dependent, &tx) {
                        outstanding += 1;
                    }
                }
            }

            outcomes.push(TaskOutcome {
                name: completion.name,
                result: completion.result,
                duration: completion.duration,
            });
        }

        drop(pool);

        let not_started = self.graph.nodes();
        let duration = start.elapsed();
        let success = !failed;

        if success {
            self.context.write_line(&format!(
                "Run finished successfully in {}",
                format_duration(duration)
            ));
        } else {
            self.context.write_line(&format!(
                "Run failed after {} ({} task(s) not started)",
                format_duration(duration),
                not_started.len()
            ));
        }

        Ok(RunReport {
            outcomes,
            not_started,
            duration,
            success,
        })
    }

    fn submit(&self, pool: &WorkerPool, name: &str, completions: &Sender<Completion>) -> bool {
        let Some(task) = self.tasks.get(name) else {
            return false;
        };

        debug!("Submitting task '{}'", name);
        let worker = Worker::new(
            name,
            Arc::clone(task),
            Arc::clone(&self.context),
            completions.clone(),
        );
        pool.submit(move || worker.run());
        true
    }
}

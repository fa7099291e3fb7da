//! Run-wide logging context.
//!
//! A [`RunContext`] owns the run log and the directory holding per-task
//! logs. It is shared by the coordinator and every worker of a run.
//!
//! Layout of a log directory:
//!
//! ```text
//! <log_dir>/run.log            appended across runs
//! <log_dir>/environment.txt
//! <log_dir>/tasks/<name>.log   one per task, name encoded by task_log_file_name
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Local;

use crate::error::Result;
use crate::tasks::TaskLog;

/// File name of the run log inside the log directory.
pub const RUN_LOG_FILE: &str = "run.log";

/// File name of the environment dump inside the log directory.
pub const ENVIRONMENT_FILE: &str = "environment.txt";

/// Subdirectory of the log directory holding per-task logs.
pub const TASK_LOG_DIR: &str = "tasks";

/// File name of the log for task `name`.
///
/// ASCII letters, digits, `_` and `-` are kept, as is `.` anywhere but the
/// first position. Every other byte becomes `%XX`, so distinct names never
/// share a file and no name can leave the task log directory.
pub fn task_log_file_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len() + 4);
    for (i, byte) in name.bytes().enumerate() {
        let keep = byte.is_ascii_alphanumeric()
            || byte == b'_'
            || byte == b'-'
            || (byte == b'.' && i > 0);
        if keep {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded.push_str(".log");
    encoded
}

#[derive(Debug, Default)]
struct RunLog {
    file: Option<File>,
    lines: Vec<String>,
}

/// Shared logging state for one run.
#[derive(Debug)]
pub struct RunContext {
    log_dir: Option<PathBuf>,
    echo: bool,
    keep_lines: bool,
    log: Mutex<RunLog>,
}

impl RunContext {
    /// Create a context, optionally backed by `log_dir`.
    ///
    /// The directory and its `tasks/` subdirectory are created if needed and
    /// `run.log` is opened for appending. With `echo`, every run log line is also printed to
    /// standard output.
    pub fn new(log_dir: Option<PathBuf>, echo: bool) -> Result<Self> {
        let file = match &log_dir {
            Some(dir) => {
                fs::create_dir_all(dir.join(TASK_LOG_DIR))?;
                Some(
                    OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(dir.join(RUN_LOG_FILE))?,
                )
            }
            None => None,
        };

        Ok(Self {
            log_dir,
            echo,
            keep_lines: false,
            log: Mutex::new(RunLog {
                file,
                lines: Vec::new(),
            }),
        })
    }

    /// A context without files or echo that keeps lines in memory.
    pub fn in_memory() -> Self {
        Self {
            log_dir: None,
            echo: false,
            keep_lines: true,
            log: Mutex::new(RunLog::default()),
        }
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Append one timestamped line to the run log.
    ///
    /// The lock is held for exactly one line so that concurrent workers
    /// never interleave mid-line.
    pub fn write_line(&self, text: &str) {
        let line = format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"), text);

        let mut log = self.lock();
        if let Some(file) = log.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                tracing::warn!("Failed to write run log: {}", e);
            }
        }
        if self.echo {
            if let Err(e) = writeln!(io::stdout().lock(), "{}", line) {
                tracing::warn!("Failed to echo run log line: {}", e);
            }
        }
        if self.keep_lines {
            log.lines.push(line);
        }
    }

    /// Lines written so far (only kept by [`RunContext::in_memory`]).
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    /// Path of the log file for `task`, if the run has a log directory.
    pub fn task_log_path(&self, task: &str) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(|dir| dir.join(TASK_LOG_DIR).join(task_log_file_name(task)))
    }

    /// Open the log sink for one task run.
    pub fn task_log(&self, task: &str) -> Result<TaskLog> {
        match self.task_log_path(task) {
            Some(path) => Ok(TaskLog::create(&path)?),
            None => Ok(TaskLog::discard()),
        }
    }

    /// Dump the process environment, sorted, into `environment.txt`.
    ///
    /// Returns the written path, or `None` when the run has no log directory.
    pub fn log_environment(&self) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.log_dir else {
            return Ok(None);
        };

        let vars: BTreeMap<String, String> = std::env::vars_os()
            .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
            .collect();
        let path = dir.join(ENVIRONMENT_FILE);
        let mut file = File::create(&path)?;
        for (key, value) in vars {
            writeln!(file, "{}={}", key, value)?;
        }
        Ok(Some(path))
    }

    fn lock(&self) -> MutexGuard<'_, RunLog> {
        // A worker panicking while holding the lock leaves the log usable.
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

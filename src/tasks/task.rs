//! The task contract and the per-task log sink.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::result::ExecutionResult;

/// A named unit of work scheduled by the orchestrator.
///
/// Implementations are shared with pool threads, so they must be
/// `Send + Sync`. Returning `Err` from [`Task::execute`] (or panicking)
/// is reported as a critical error for that task.
pub trait Task: Send + Sync {
    /// Unique name of the task within a run.
    fn name(&self) -> &str;

    /// Names of the tasks that must finish before this one starts.
    ///
    /// Names that are not registered with the orchestrator are ignored.
    fn depends_on(&self) -> &[String];

    /// Run the task synchronously, writing details to `log`.
    fn execute(&self, log: &mut TaskLog) -> Result<ExecutionResult>;
}

enum Sink {
    File(BufWriter<File>),
    Discard,
}

/// Write-only log owned by a single task execution.
///
/// The underlying file is flushed and closed when the log is dropped,
/// which also happens when the task fails or panics.
pub struct TaskLog {
    path: Option<PathBuf>,
    sink: Sink,
}

impl TaskLog {
    /// Create (truncating) a log file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            sink: Sink::File(BufWriter::new(file)),
        })
    }

    /// A log that drops everything written to it.
    pub fn discard() -> Self {
        Self {
            path: None,
            sink: Sink::Discard,
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write `text` followed by a newline.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self, "{}", text)
    }
}

impl Write for TaskLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::File(writer) => writer.write(buf),
            Sink::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::File(writer) => writer.flush(),
            Sink::Discard => Ok(()),
        }
    }
}

impl Drop for TaskLog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush task log {:?}: {}", self.path, e);
        }
    }
}

impl std::fmt::Debug for TaskLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskLog").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_log_is_flushed_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("JAN.log");

        {
            let mut log = TaskLog::create(&path).unwrap();
            log.line("Removing directory: build").unwrap();
            write!(log, "partial").unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Removing directory: build\npartial");
    }

    #[test]
    fn file_log_is_flushed_when_unwinding() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("panicky.log");
        let path_clone = path.clone();

        let outcome = std::panic::catch_unwind(move || {
            let mut log = TaskLog::create(&path_clone).unwrap();
            log.line("before the crash").unwrap();
            panic!("boom");
        });

        assert!(outcome.is_err());
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("before the crash"));
    }

    #[test]
    fn discard_log_accepts_writes() {
        let mut log = TaskLog::discard();
        log.line("ignored").unwrap();
        assert!(log.path().is_none());
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("x.log");
        assert!(TaskLog::create(&path).is_err());
    }
}

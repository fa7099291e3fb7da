//! Shell command execution.

use crate::error::{ConductorError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a command line through the platform shell.
///
/// A command that runs and exits nonzero is an `Ok` result with
/// `success == false`; only failing to start the shell is an error.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let (shell, flag) = detect_shell();

    let mut cmd = Command::new(shell);
    cmd.arg(flag);
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", command, e);
        ConductorError::CommandSpawn {
            command: command.to_string(),
            source: e,
        }
    })?;

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Shell executable and the flag that passes it a command line.
pub fn detect_shell() -> (String, &'static str) {
    if cfg!(target_os = "windows") {
        (
            std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string()),
            "/C",
        )
    } else {
        ("/bin/sh".to_string(), "-c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured() -> CommandOptions {
        CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    #[test]
    fn execute_successful_command() {
        let result = execute("echo hello", &captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("exit 3", &captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_with_env() {
        let mut options = captured();
        options
            .env
            .insert("ANALYZER_LEVEL".to_string(), "strict".to_string());

        let cmd = if cfg!(target_os = "windows") {
            "echo %ANALYZER_LEVEL%"
        } else {
            "echo $ANALYZER_LEVEL"
        };

        let result = execute(cmd, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("strict"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..captured()
        };

        let cmd = if cfg!(target_os = "windows") {
            "dir /b"
        } else {
            "ls"
        };

        let result = execute(cmd, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn execute_captures_stderr() {
        let cmd = if cfg!(target_os = "windows") {
            "echo oops 1>&2"
        } else {
            "echo oops >&2"
        };

        let result = execute(cmd, &captured()).unwrap();

        assert!(result.stderr.contains("oops"));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn execute_in_missing_directory_is_an_error() {
        let options = CommandOptions {
            cwd: Some(PathBuf::from("/definitely/not/a/dir")),
            ..captured()
        };

        let err = execute("echo hi", &options).unwrap_err();
        assert!(matches!(err, ConductorError::CommandSpawn { .. }));

        let msg = err.to_string();
        let prefix = "Failed to start 'echo hi': ";
        assert!(msg.starts_with(prefix));
        assert!(msg.len() > prefix.len(), "io error text missing: {msg}");
    }
}

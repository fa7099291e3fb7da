//! External command execution.

pub mod command;

pub use command::{detect_shell, execute, CommandOptions, CommandResult};

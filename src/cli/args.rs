//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::runner::ExecutionMode;

/// Conductor - run dependent tasks concurrently.
#[derive(Debug, Parser)]
#[command(name = "conductor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to pipeline file (overrides default conductor.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the pipeline (default if no command specified)
    Run(RunArgs),

    /// Validate the pipeline file and its dependency graph
    Check(CheckArgs),

    /// Show the order tasks would start in
    Plan,

    /// List tasks and their dependencies
    List(ListArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Which failures stop new tasks from starting
    #[arg(short, long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Maximum number of tasks running at once
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,

    /// Directory for the run log and per-task logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Don't echo the run log to stdout
    #[arg(long)]
    pub no_echo: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Treat dependency warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Include disabled tasks
    #[arg(short, long)]
    pub all: bool,
}

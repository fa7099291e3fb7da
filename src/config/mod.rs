//! Pipeline file loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Validation in [`validator`]
//! - Orchestrator construction in [`pipeline`]
//!
//! # Example
//!
//! ```
//! use conductor::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("conductor.yml"), "tasks:\n  build:\n    command: make\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert!(config.tasks.contains_key("build"));
//! ```

pub mod loader;
pub mod pipeline;
pub mod schema;
pub mod validator;

pub use loader::{config_path, load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE};
pub use pipeline::{build_orchestrator, resolve_log_dir};
pub use schema::{PipelineConfig, Settings, TaskConfig};
pub use validator::{dependency_warnings, validate, validate_config, ValidationError};

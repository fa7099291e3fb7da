//! Configuration file discovery and loading.

use crate::config::schema::PipelineConfig;
use crate::error::{ConductorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline file looked up in the project root.
pub const DEFAULT_CONFIG_FILE: &str = "conductor.yml";

/// Resolve the pipeline file path.
///
/// A relative `override_path` is taken relative to `project_root`.
pub fn config_path(project_root: &Path, override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => project_root.join(p),
        None => project_root.join(DEFAULT_CONFIG_FILE),
    }
}

/// Load the pipeline file for a project.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(project_root: &Path, override_path: Option<&Path>) -> Result<PipelineConfig> {
    load_config_file(&config_path(project_root, override_path))
}

/// Load a single config file and parse it into PipelineConfig.
pub fn load_config_file(path: &Path) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConductorError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConductorError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into PipelineConfig.
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PipelineConfig> {
    // An empty file deserializes as YAML null
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ConductorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

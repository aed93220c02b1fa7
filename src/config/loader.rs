//! Configuration file discovery and loading.
//!
//! A project carries a single `recce.yml` at its root. Discovery walks
//! up from the working directory so the tool can run from anywhere
//! inside the project tree.

use crate::config::schema::RecceConfig;
use crate::error::{RecceError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE: &str = "recce.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `recce.yml` (primary indicator)
/// 2. `.git` directory (fallback)
///
/// # Returns
///
/// The path to the project root, or None if not found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find the config file for the given project root.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into RecceConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RecceConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RecceError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RecceError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into RecceConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<RecceConfig> {
    serde_yaml::from_str(content).map_err(|e| RecceError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file. Otherwise
/// loads `recce.yml` from the project root.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<RecceConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_config(project_root) {
        Some(path) => load_config_file(&path),
        None => Err(RecceError::ConfigNotFound {
            path: project_root.join(CONFIG_FILE),
        }),
    }
}

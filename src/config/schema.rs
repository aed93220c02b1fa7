//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `recce.yml` configuration file format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::DatabaseConfig;
use crate::error::{RecceError, Result};

/// Root configuration structure for recce.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecceConfig {
    /// Report title (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Credentials for the database the installer will use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    /// Paths the installer must be able to write, resolved against the
    /// project root unless absolute
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writable_paths: Vec<PathBuf>,
}

impl RecceConfig {
    /// Title shown at the top of reports.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Installation pre-flight")
    }

    /// Writable paths with relative entries resolved against `project_root`.
    pub fn resolved_writable_paths(&self, project_root: &Path) -> Vec<PathBuf> {
        self.writable_paths
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    project_root.join(path)
                }
            })
            .collect()
    }
}

/// Semantic validation beyond what serde can enforce.
///
/// # Errors
///
/// Returns `ConfigValidationError` describing the first problem found.
pub fn validate(config: &RecceConfig) -> Result<()> {
    if let Some(db) = &config.database {
        for (field, value) in [
            ("database.host", &db.host),
            ("database.database", &db.database),
            ("database.username", &db.username),
        ] {
            if value.trim().is_empty() {
                return Err(RecceError::ConfigValidationError {
                    message: format!("'{field}' must not be empty"),
                });
            }
        }
    }

    if config
        .writable_paths
        .iter()
        .any(|p| p.as_os_str().is_empty())
    {
        return Err(RecceError::ConfigValidationError {
            message: "'writable_paths' contains an empty entry".to_string(),
        });
    }

    Ok(())
}

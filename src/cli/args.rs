//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::db::DatabaseConfig;

/// Recce - Installation pre-flight checks.
#[derive(Debug, Parser)]
#[command(name = "recce")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default recce.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every pre-flight check (default if no command specified)
    Check(CheckArgs),

    /// Run host-environment checks only
    System(SystemArgs),

    /// Run database checks only
    Database(DatabaseArgs),

    /// Write a starter recce.yml for a project
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as blocking
    #[arg(long)]
    pub strict: bool,

    /// Database host, optionally with a port (host or host:port)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Database (schema) name
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Database username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Database password
    #[arg(long, env = "RECCE_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Check write access to PATH instead of the configured paths (repeatable)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `system` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SystemArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as blocking
    #[arg(long)]
    pub strict: bool,

    /// Check write access to PATH instead of the configured paths (repeatable)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `database` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DatabaseArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as blocking
    #[arg(long)]
    pub strict: bool,

    /// Database host, optionally with a port (host or host:port)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Database (schema) name
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Database username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Database password
    #[arg(long, env = "RECCE_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing configuration without asking
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Merge database override flags over an optional config-file section.
///
/// Returns `None` when the merged settings still lack any of host,
/// database name, or username.
pub fn merge_database_overrides(
    base: Option<&DatabaseConfig>,
    host: Option<&str>,
    database: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Option<DatabaseConfig> {
    let mut merged = base.cloned().unwrap_or_default();
    if let Some(host) = host {
        merged.host = host.to_string();
    }
    if let Some(database) = database {
        merged.database = database.to_string();
    }
    if let Some(username) = username {
        merged.username = username.to_string();
    }
    if let Some(password) = password {
        merged.password = password.to_string();
    }

    if merged.host.is_empty() || merged.database.is_empty() || merged.username.is_empty() {
        return None;
    }
    Some(merged)
}

impl CheckArgs {
    /// Database settings after applying this command's override flags.
    pub fn merged_database(&self, base: Option<&DatabaseConfig>) -> Option<DatabaseConfig> {
        merge_database_overrides(
            base,
            self.host.as_deref(),
            self.database.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )
    }
}

impl DatabaseArgs {
    /// Database settings after applying this command's override flags.
    pub fn merged_database(&self, base: Option<&DatabaseConfig>) -> Option<DatabaseConfig> {
        merge_database_overrides(
            base,
            self.host.as_deref(),
            self.database.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".to_string(),
            database: "app".to_string(),
            username: "installer".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn overrides_replace_base_fields() {
        let base = base_config();
        let merged =
            merge_database_overrides(Some(&base), Some("other:3307"), None, None, None).unwrap();

        assert_eq!(merged.host, "other:3307");
        assert_eq!(merged.database, "app");
        assert_eq!(merged.username, "installer");
        assert_eq!(merged.password, "secret");
    }

    #[test]
    fn flags_alone_build_a_config() {
        let merged = merge_database_overrides(
            None,
            Some("localhost"),
            Some("app"),
            Some("root"),
            Some("pw"),
        )
        .unwrap();

        assert_eq!(merged.host, "localhost");
        assert_eq!(merged.password, "pw");
    }

    #[test]
    fn incomplete_settings_yield_none() {
        assert!(merge_database_overrides(None, Some("localhost"), None, None, None).is_none());
        assert!(merge_database_overrides(None, None, None, None, None).is_none());
    }

    #[test]
    fn password_may_stay_empty() {
        let merged =
            merge_database_overrides(None, Some("localhost"), Some("app"), Some("root"), None)
                .unwrap();
        assert_eq!(merged.password, "");
    }
}

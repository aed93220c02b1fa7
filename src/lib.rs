//! Recce - Installation pre-flight checks.
//!
//! Recce vets a server before an application installer runs on it: write
//! access to the paths the installer needs, the memory limit, required
//! server variables, and a battery of MySQL capability checks (version,
//! InnoDB, temporary tables, triggers, locking). Every check reports,
//! none aborts the run, and the verdict says whether installation can
//! proceed.
//!
//! # Modules
//!
//! - [`checks`] - The check suite, its report types, and the individual checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `recce.yml` loading, parsing, and validation
//! - [`db`] - Database probe traits, the MySQL client, and a scripted fake
//! - [`error`] - Error types and result aliases
//! - [`host`] - Host environment introspection (variables, memory, paths)
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use recce::checks::RequirementsChecker;
//! use recce::db::FakeProbe;
//! use recce::host::HostContext;
//! use std::collections::HashMap;
//!
//! let context = HostContext::new(HashMap::new(), Some("512M".to_string()));
//! let probe = FakeProbe::new();
//! let checker = RequirementsChecker::new(&context, &probe);
//!
//! let results = checker.check_database(&FakeProbe::config());
//! assert!(results.iter().all(|r| r.passed()));
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod host;
pub mod ui;

pub use error::{RecceError, Result};

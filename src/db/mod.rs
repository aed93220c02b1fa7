//! Database driver access for requirement checks.
//!
//! Checks talk to the server through the [`DatabaseProbe`] and [`DbSession`]
//! traits rather than a concrete client, so the suite can run against a
//! scripted stand-in in tests. Exactly one session is opened per check and
//! dropped when the check returns; there is no pooling.
//!
//! # Modules
//!
//! - [`config`] - Connection settings supplied by the caller
//! - [`mysql`] - Real probe over the blocking MySQL client
//! - [`fake`] - Scripted probe for tests

pub mod config;
pub mod fake;
pub mod mysql;

use std::collections::HashMap;

use crate::error::Result;
pub use config::DatabaseConfig;
pub use fake::FakeProbe;
pub use mysql::MySqlProbe;

/// A row returned by a metadata query, keyed by column name.
pub type Row = HashMap<String, String>;

/// Entry point to a database driver.
pub trait DatabaseProbe {
    /// Whether the driver is usable at all in this build/environment.
    fn is_available(&self) -> bool;

    /// Short driver name for report details.
    fn driver_name(&self) -> &str;

    /// Open a session: connect to the server and select the configured
    /// database. Every check opens its own session.
    fn connect(&self, config: &DatabaseConfig) -> Result<Box<dyn DbSession>>;
}

/// A live connection used by a single check, closed on drop.
pub trait DbSession {
    /// The server's version string, as the server reports it.
    fn server_version(&mut self) -> Result<String>;

    /// Run a metadata query (`SHOW ENGINES`, `SHOW VARIABLES LIKE …`),
    /// collecting all rows.
    fn query_rows(&mut self, sql: &str) -> Result<Vec<Row>>;

    /// Execute a statement for its side effect, discarding any result.
    fn execute(&mut self, sql: &str) -> Result<()>;
}

//! Database connection settings.

use serde::{Deserialize, Serialize};

/// Port used when `host` does not embed one.
pub const DEFAULT_PORT: u16 = 3306;

/// Connection settings for the database checks.
///
/// Supplied by the caller (config file, CLI flags, environment) and
/// immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server hostname, optionally with an embedded port (`"db.internal:3307"`).
    pub host: String,

    /// Database to select after connecting.
    pub database: String,

    pub username: String,

    /// May be empty for servers that allow it. Usually injected from the
    /// environment rather than written into config files.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl DatabaseConfig {
    /// Split `host` into hostname and port.
    ///
    /// An embedded suffix that does not parse as a port is kept as part of
    /// the hostname.
    pub fn endpoint(&self) -> (&str, u16) {
        if let Some((host, port)) = self.host.split_once(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (host, port);
            }
        }
        (self.host.as_str(), DEFAULT_PORT)
    }
}

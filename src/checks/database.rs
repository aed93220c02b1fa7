//! Database capability checks.
//!
//! Each check opens its own short-lived session through the probe, so a
//! failure in one never poisons the rest, and a report line maps to one
//! connection in the server log. The round-trip checks (temporary tables,
//! triggers, locking) create real transient objects and drop them before
//! returning; probe object names are namespaced to avoid colliding with
//! application tables.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::report::CheckResult;
use crate::db::{DatabaseConfig, DatabaseProbe};

/// Oldest server version the application supports.
pub const MINIMUM_VERSION: &str = "5.1";

/// Smallest workable `thread_stack`, in bytes.
pub const THREAD_STACK_MIN_BYTES: u64 = 192 * 1024;

const TEMP_TABLE: &str = "recce_preflight_probe";
const TRIGGER_TABLE: &str = "recce_preflight_probe_trigger";
const TRIGGER_NAME: &str = "recce_preflight_trigger";
const LOCK_TABLE: &str = "recce_preflight_probe_lock";

/// Leading dotted-numeric prefix of a reported version string.
static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)").expect("VERSION_PREFIX must compile"));

/// Connect to the server and select the configured database.
pub fn check_connection(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Database connection";
    match probe.connect(config) {
        Ok(_) => CheckResult::ok(
            title,
            format!(
                "Connected to '{}' and selected database '{}'.",
                config.host, config.database
            ),
        ),
        Err(err) => CheckResult::error(
            title,
            format!(
                "Could not connect to '{}' and select database '{}': {}",
                config.host,
                config.database,
                err.driver_message()
            ),
        ),
    }
}

/// Compare the server version against [`MINIMUM_VERSION`].
///
/// An unreachable server or an unparsable version string is a warning:
/// the version cannot be verified, but nothing proves it is too old.
pub fn check_version(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Database server version";
    let cannot_determine = |reason: String| {
        CheckResult::warning(
            title,
            format!("Could not determine the server version: {reason}"),
        )
    };

    let mut session = match probe.connect(config) {
        Ok(session) => session,
        Err(err) => return cannot_determine(err.driver_message()),
    };
    let version = match session.server_version() {
        Ok(version) => version,
        Err(err) => return cannot_determine(err.driver_message()),
    };
    debug!(version, "server version");

    match version_at_least(&version, MINIMUM_VERSION) {
        None => cannot_determine(format!("unrecognized version string '{version}'")),
        Some(false) => CheckResult::error(
            title,
            format!("Server version {version} is below the required minimum {MINIMUM_VERSION}."),
        ),
        Some(true) => CheckResult::ok(
            title,
            format!("Server version {version} meets the required minimum {MINIMUM_VERSION}."),
        ),
    }
}

/// Verify the InnoDB storage engine is enabled.
///
/// When the engine list cannot be read at all, the verdict is an error:
/// the application's tables need InnoDB, so "unknown" is treated as
/// absent rather than waved through.
pub fn check_innodb(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "InnoDB storage engine";
    let assume_absent = |reason: String| {
        CheckResult::error(
            title,
            format!(
                "Could not determine the available storage engines; assuming InnoDB is absent ({reason})."
            ),
        )
    };

    let mut session = match probe.connect(config) {
        Ok(session) => session,
        Err(err) => return assume_absent(err.driver_message()),
    };
    let rows = match session.query_rows("SHOW ENGINES") {
        Ok(rows) => rows,
        Err(err) => return assume_absent(err.driver_message()),
    };

    for row in &rows {
        if row.get("Engine").map(String::as_str) != Some("InnoDB") {
            continue;
        }
        let support = row.get("Support").map(String::as_str).unwrap_or("");
        return if support.eq_ignore_ascii_case("YES") || support.eq_ignore_ascii_case("DEFAULT") {
            CheckResult::ok(title, format!("InnoDB is available (support: {support})."))
        } else {
            CheckResult::error(
                title,
                format!("InnoDB is present but disabled (support: {support})."),
            )
        };
    }
    CheckResult::error(
        title,
        "InnoDB does not appear in the server's storage engine list.",
    )
}

/// Round-trip a temporary table: create it, drop it.
pub fn check_temp_tables(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Temporary tables";
    let mut session = match probe.connect(config) {
        Ok(session) => session,
        Err(err) => {
            return CheckResult::error(
                title,
                format!(
                    "Could not connect to create a temporary table: {}",
                    err.driver_message()
                ),
            )
        }
    };

    if let Err(err) = session.execute(&format!("CREATE TEMPORARY TABLE {TEMP_TABLE} (id INT)")) {
        return CheckResult::error(
            title,
            format!("Failed to create a temporary table: {}", err.driver_message()),
        );
    }
    if let Err(err) = session.execute(&format!("DROP TABLE {TEMP_TABLE}")) {
        return CheckResult::error(
            title,
            format!(
                "Created a temporary table but failed to drop it: {}",
                err.driver_message()
            ),
        );
    }
    CheckResult::ok(title, "Created and dropped a temporary table.")
}

/// Require `auto_increment_increment` to be exactly 1.
///
/// Any other step size (typically from a multi-primary replication setup)
/// breaks the application's assumptions about assigned ids.
pub fn check_auto_increment(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Auto-increment step";
    match read_variable(probe, config, "auto_increment_increment") {
        Err(reason) => CheckResult::error(title, reason),
        Ok(value) => {
            if value.trim() == "1" {
                CheckResult::ok(title, "auto_increment_increment is 1.")
            } else {
                CheckResult::error(
                    title,
                    format!(
                        "auto_increment_increment is {value}; it must be exactly 1 for installation."
                    ),
                )
            }
        }
    }
}

/// Round-trip a trigger on a real table.
///
/// Triggers cannot attach to temporary tables, so this creates a base
/// table as scaffolding and drops it on a best-effort basis afterwards,
/// even when trigger creation failed.
pub fn check_triggers(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Triggers";
    let mut session = match probe.connect(config) {
        Ok(session) => session,
        Err(err) => {
            return CheckResult::error(
                title,
                format!(
                    "Could not connect to test trigger support: {}",
                    err.driver_message()
                ),
            )
        }
    };

    if let Err(err) = session.execute(&format!("CREATE TABLE {TRIGGER_TABLE} (id INT)")) {
        return CheckResult::error(
            title,
            format!(
                "Failed to create the trigger probe table: {}",
                err.driver_message()
            ),
        );
    }

    let outcome = match session.execute(&format!(
        "CREATE TRIGGER {TRIGGER_NAME} BEFORE INSERT ON {TRIGGER_TABLE} FOR EACH ROW BEGIN END"
    )) {
        Err(err) => CheckResult::error(
            title,
            format!("Failed to create a trigger: {}", err.driver_message()),
        ),
        Ok(()) => match session.execute(&format!("DROP TRIGGER {TRIGGER_NAME}")) {
            Err(err) => CheckResult::error(
                title,
                format!(
                    "Created a trigger but failed to drop it: {}",
                    err.driver_message()
                ),
            ),
            Ok(()) => CheckResult::ok(title, "Created and dropped a trigger."),
        },
    };

    // Scaffolding cleanup never changes the verdict.
    let _ = session.execute(&format!("DROP TABLE {TRIGGER_TABLE}"));
    outcome
}

/// Require `thread_stack` to be at least 192 KB.
pub fn check_thread_stack(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Thread stack size";
    let value = match read_variable(probe, config, "thread_stack") {
        Ok(value) => value,
        Err(reason) => return CheckResult::error(title, reason),
    };

    let Ok(bytes) = value.trim().parse::<u64>() else {
        return CheckResult::error(
            title,
            format!("Could not interpret the reported thread_stack value '{value}'."),
        );
    };
    if bytes < THREAD_STACK_MIN_BYTES {
        CheckResult::error(
            title,
            format!(
                "thread_stack is {} KB; at least {} KB is required.",
                bytes / 1024,
                THREAD_STACK_MIN_BYTES / 1024
            ),
        )
    } else {
        CheckResult::ok(
            title,
            format!(
                "thread_stack is {} KB (minimum {} KB).",
                bytes / 1024,
                THREAD_STACK_MIN_BYTES / 1024
            ),
        )
    }
}

/// Round-trip a write lock: create a table, lock it, release, drop.
pub fn check_lock_tables(probe: &dyn DatabaseProbe, config: &DatabaseConfig) -> CheckResult {
    let title = "Table locking";
    let mut session = match probe.connect(config) {
        Ok(session) => session,
        Err(err) => {
            return CheckResult::error(
                title,
                format!(
                    "Could not connect to test table locking: {}",
                    err.driver_message()
                ),
            )
        }
    };

    if let Err(err) = session.execute(&format!("CREATE TEMPORARY TABLE {LOCK_TABLE} (id INT)")) {
        return CheckResult::error(
            title,
            format!("Failed to create a table to lock: {}", err.driver_message()),
        );
    }

    if let Err(err) = session.execute(&format!("LOCK TABLES {LOCK_TABLE} WRITE")) {
        let _ = session.execute(&format!("DROP TABLE {LOCK_TABLE}"));
        return CheckResult::error(
            title,
            format!("Failed to acquire a write lock: {}", err.driver_message()),
        );
    }
    if let Err(err) = session.execute("UNLOCK TABLES") {
        let _ = session.execute(&format!("DROP TABLE {LOCK_TABLE}"));
        return CheckResult::error(
            title,
            format!(
                "Acquired a write lock but failed to release it: {}",
                err.driver_message()
            ),
        );
    }

    let _ = session.execute(&format!("DROP TABLE {LOCK_TABLE}"));
    CheckResult::ok(title, "Acquired and released a write lock.")
}

/// Fetch a single server variable, folding every failure into one message.
fn read_variable(
    probe: &dyn DatabaseProbe,
    config: &DatabaseConfig,
    name: &str,
) -> Result<String, String> {
    let mut session = probe
        .connect(config)
        .map_err(|err| format!("Could not read {name}: {}", err.driver_message()))?;
    let rows = session
        .query_rows(&format!("SHOW VARIABLES LIKE '{name}'"))
        .map_err(|err| format!("Could not read {name}: {}", err.driver_message()))?;
    rows.first()
        .and_then(|row| row.get("Value"))
        .cloned()
        .ok_or_else(|| format!("The server did not report a value for {name}."))
}

/// Compare a reported version against a dotted minimum, component-wise.
///
/// Vendor suffixes (`8.0.36-0ubuntu0.22.04.1`) are ignored; missing
/// components count as zero. `None` when the string has no leading
/// numeric prefix at all.
pub fn version_at_least(version: &str, minimum: &str) -> Option<bool> {
    let prefix = VERSION_PREFIX.captures(version)?.get(1)?.as_str();
    let actual: Vec<u64> = prefix.split('.').filter_map(|p| p.parse().ok()).collect();
    let required: Vec<u64> = minimum.split('.').filter_map(|p| p.parse().ok()).collect();

    for i in 0..actual.len().max(required.len()) {
        let a = actual.get(i).copied().unwrap_or(0);
        let r = required.get(i).copied().unwrap_or(0);
        if a != r {
            return Some(a > r);
        }
    }
    Some(true)
}

//! System environment checks.
//!
//! These run before any database work: write access to configured paths,
//! the memory limit, required server variables, and the availability of
//! the database driver and JSON codec.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::report::CheckResult;
use crate::db::DatabaseProbe;
use crate::host::{is_path_writable, HostContext};

/// Server variables the installed application relies on at runtime.
pub const REQUIRED_SERVER_VARIABLES: &[&str] = &["SCRIPT_NAME", "HTTP_HOST", "SCRIPT_FILENAME"];

/// Below this limit, installation fails outright.
pub const MEMORY_REQUIRED_BYTES: i64 = 32 * 1024 * 1024;

/// Below this limit, installation proceeds with a warning.
pub const MEMORY_RECOMMENDED_BYTES: i64 = 64 * 1024 * 1024;

/// Shared inputs for the fixed system checks.
pub struct SystemEnv<'a> {
    pub context: &'a HostContext,
    pub probe: &'a dyn DatabaseProbe,
}

/// Check write access to every configured path.
///
/// All offending paths are listed, not just the first, so an operator can
/// fix permissions in one pass.
pub fn check_writable_paths(paths: &[PathBuf]) -> CheckResult {
    let title = "Writable file paths";
    let unwritable: Vec<String> = paths
        .iter()
        .filter(|p| !is_path_writable(p))
        .map(|p| p.display().to_string())
        .collect();

    if !unwritable.is_empty() {
        return CheckResult::error(
            title,
            format!(
                "The following paths must be made writable: {}",
                unwritable.join(", ")
            ),
        );
    }
    if paths.is_empty() {
        CheckResult::ok(title, "No paths configured for write access.")
    } else {
        CheckResult::ok(
            title,
            format!("All {} configured paths are writable.", paths.len()),
        )
    }
}

/// Check the effective memory limit against the 32 MB floor and 64 MB
/// recommendation.
///
/// An undeterminable limit is a warning, not an error: unlimited memory
/// is no obstacle to installation, it just cannot be verified.
pub fn check_memory(env: &SystemEnv) -> CheckResult {
    let title = "Memory limit";
    let Some(raw) = env.context.memory_limit() else {
        return CheckResult::warning(
            title,
            "No memory limit could be determined; proceeding on the assumption that enough is available.",
        );
    };

    let bytes = parse_size_string(raw);
    debug!(raw, bytes, "memory limit");
    if bytes <= 0 {
        return CheckResult::warning(
            title,
            format!(
                "Could not interpret the configured memory limit '{raw}'; proceeding on the assumption that enough is available."
            ),
        );
    }
    if bytes < MEMORY_REQUIRED_BYTES {
        CheckResult::error(
            title,
            format!("Configured limit {raw} is below the 32 MB required for installation."),
        )
    } else if bytes < MEMORY_RECOMMENDED_BYTES {
        CheckResult::warning(
            title,
            format!(
                "Configured limit {raw} is below the recommended 64 MB; installation can proceed but may run out of memory."
            ),
        )
    } else {
        CheckResult::ok(
            title,
            format!("Configured limit {raw} meets the recommended 64 MB."),
        )
    }
}

/// Check that every required server variable is present and non-empty.
pub fn check_server_variables(env: &SystemEnv) -> CheckResult {
    let title = "Server variables";
    let missing: Vec<&str> = REQUIRED_SERVER_VARIABLES
        .iter()
        .copied()
        .filter(|name| env.context.var(name).is_none())
        .collect();

    if missing.is_empty() {
        CheckResult::ok(title, "All required server variables are set.")
    } else {
        CheckResult::error(
            title,
            format!("Missing required server variables: {}", missing.join(", ")),
        )
    }
}

/// Check that a usable database driver is present.
pub fn check_database_driver(env: &SystemEnv) -> CheckResult {
    let title = "Database driver";
    if env.probe.is_available() {
        CheckResult::ok(
            title,
            format!("Database driver '{}' is available.", env.probe.driver_name()),
        )
    } else {
        CheckResult::error(
            title,
            format!(
                "Database driver '{}' is not usable; cannot reach a MySQL server.",
                env.probe.driver_name()
            ),
        )
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct CodecProbe {
    tool: String,
    answer: i64,
    flags: Vec<bool>,
}

/// Round-trip a document through the JSON codec.
pub fn check_json_codec(_env: &SystemEnv) -> CheckResult {
    let title = "JSON support";
    let original = CodecProbe {
        tool: "recce".to_string(),
        answer: 42,
        flags: vec![true, false],
    };

    let round_trip = serde_json::to_string(&original)
        .and_then(|encoded| serde_json::from_str::<CodecProbe>(&encoded));
    match round_trip {
        Ok(decoded) if decoded == original => {
            CheckResult::ok(title, "JSON encoding and decoding are functional.")
        }
        Ok(_) => CheckResult::error(title, "JSON round-trip altered the probe document."),
        Err(err) => CheckResult::error(title, format!("JSON round-trip failed: {err}")),
    }
}

/// Interpret a size string with optional `k`/`m`/`g` suffix
/// (case-insensitive, powers of 1024). A bare numeric string is a byte
/// count; anything unparsable comes back as 0.
pub fn parse_size_string(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let Some(last) = trimmed.chars().last() else {
        return 0;
    };

    let (digits, multiplier) = match last.to_ascii_lowercase() {
        'k' => (&trimmed[..trimmed.len() - 1], 1024_i64),
        'm' => (&trimmed[..trimmed.len() - 1], 1024 * 1024),
        'g' => (&trimmed[..trimmed.len() - 1], 1024 * 1024 * 1024),
        _ => (trimmed, 1),
    };

    digits
        .trim()
        .parse::<f64>()
        .map(|value| (value * multiplier as f64).round() as i64)
        .unwrap_or(0)
}

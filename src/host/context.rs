//! Read-only view of the hosting environment.
//!
//! The memory limit is carried as the raw configured string (`"512M"`,
//! `"1G"`, a bare byte count); interpretation happens in the memory check
//! so its parsing rules stay testable in one place.

use std::collections::HashMap;

use tracing::debug;

/// Environment variable that overrides memory-limit detection.
pub const MEMORY_LIMIT_VAR: &str = "RECCE_MEMORY_LIMIT";

/// Cgroup values at or above this are treated as "no limit configured".
const CGROUP_UNLIMITED: u64 = 1 << 60;

/// A snapshot of the hosting environment visible to system checks.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    vars: HashMap<String, String>,
    memory_limit: Option<String>,
}

impl HostContext {
    /// Build a context from explicit values. Used by tests and by callers
    /// embedding the checker in a larger installer.
    pub fn new(vars: HashMap<String, String>, memory_limit: Option<String>) -> Self {
        Self { vars, memory_limit }
    }

    /// Build a context from the current process: all environment variables,
    /// plus the detected memory limit.
    pub fn from_process() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok(), std::env::vars())
    }

    /// Build a context with a custom env lookup and variable iterator.
    ///
    /// This allows testing detection order without modifying actual
    /// environment variables.
    pub fn from_env_with<F, I>(env_fn: F, vars: I) -> Self
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = (String, String)>,
    {
        let memory_limit = detect_memory_limit(&env_fn);
        Self {
            vars: vars.into_iter().collect(),
            memory_limit,
        }
    }

    /// Look up a server variable. Empty values count as absent.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The raw configured memory limit, if one could be determined.
    pub fn memory_limit(&self) -> Option<&str> {
        self.memory_limit.as_deref()
    }
}

/// Determine the effective memory limit of this process.
///
/// Checks the override variable first (explicit wins), then Linux cgroup
/// v2 and v1 limits. Returns `None` when no limit is configured or the
/// host offers no way to tell.
fn detect_memory_limit<F>(env_fn: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env_fn(MEMORY_LIMIT_VAR) {
        if !value.is_empty() {
            debug!(limit = %value, "memory limit from {}", MEMORY_LIMIT_VAR);
            return Some(value);
        }
    }

    #[cfg(target_os = "linux")]
    {
        // cgroup v2, then the v1 memory controller
        for path in [
            "/sys/fs/cgroup/memory.max",
            "/sys/fs/cgroup/memory/memory.limit_in_bytes",
        ] {
            if let Some(limit) = read_cgroup_limit(path) {
                debug!(limit = %limit, source = path, "memory limit from cgroup");
                return Some(limit);
            }
        }
    }

    None
}

/// Read a cgroup memory limit file, filtering out "unlimited" sentinels.
#[cfg(target_os = "linux")]
fn read_cgroup_limit(path: &str) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let trimmed = raw.trim();
    if trimmed == "max" {
        return None;
    }
    let bytes: u64 = trimmed.parse().ok()?;
    if bytes >= CGROUP_UNLIMITED {
        return None;
    }
    Some(bytes.to_string())
}

/// Check if running in a CI environment.
///
/// Used to pick [`NonInteractiveUI`](crate::ui::NonInteractiveUI) over the
/// interactive terminal UI. Checks common CI environment variables: `CI`,
/// `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

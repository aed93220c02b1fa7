//! Pre-flight suite orchestration.
//!
//! The individual checks live in [`crate::checks::system`] and
//! [`crate::checks::database`]; this module strings them together in a
//! fixed order. Two tables, [`SYSTEM_CHECKS`] and [`DATABASE_CHECKS`],
//! name every check the suite knows about, so callers can run the whole
//! suite or drive one check at a time (the CLI does the latter to put a
//! spinner on each).
//!
//! A check that fails never short-circuits the ones after it. The point
//! of a pre-flight run is a complete picture, not the first road block.

use std::path::PathBuf;

use tracing::debug;

use crate::checks::database;
use crate::checks::report::CheckResult;
use crate::checks::system::{self, SystemEnv};
use crate::db::{DatabaseConfig, DatabaseProbe};
use crate::host::HostContext;

/// A named host-environment check.
pub struct SystemCheck {
    /// Short label used in log lines and spinner messages.
    pub name: &'static str,
    /// The check function itself.
    pub run: fn(&SystemEnv) -> CheckResult,
}

/// A named database check.
pub struct DatabaseCheck {
    /// Short label used in log lines and spinner messages.
    pub name: &'static str,
    /// The check function itself.
    pub run: fn(&dyn DatabaseProbe, &DatabaseConfig) -> CheckResult,
}

/// Host-environment checks in report order.
///
/// The writable-path check is not listed here because it takes a path
/// list instead of a [`SystemEnv`]; [`RequirementsChecker::check_system`]
/// always runs it first.
pub const SYSTEM_CHECKS: &[SystemCheck] = &[
    SystemCheck {
        name: "memory limit",
        run: system::check_memory,
    },
    SystemCheck {
        name: "server variables",
        run: system::check_server_variables,
    },
    SystemCheck {
        name: "database driver",
        run: system::check_database_driver,
    },
    SystemCheck {
        name: "JSON support",
        run: system::check_json_codec,
    },
];

/// Database checks in report order.
pub const DATABASE_CHECKS: &[DatabaseCheck] = &[
    DatabaseCheck {
        name: "connection",
        run: database::check_connection,
    },
    DatabaseCheck {
        name: "server version",
        run: database::check_version,
    },
    DatabaseCheck {
        name: "InnoDB engine",
        run: database::check_innodb,
    },
    DatabaseCheck {
        name: "temporary tables",
        run: database::check_temp_tables,
    },
    DatabaseCheck {
        name: "auto increment",
        run: database::check_auto_increment,
    },
    DatabaseCheck {
        name: "triggers",
        run: database::check_triggers,
    },
    DatabaseCheck {
        name: "thread stack",
        run: database::check_thread_stack,
    },
    DatabaseCheck {
        name: "table locking",
        run: database::check_lock_tables,
    },
];

/// Runs the pre-flight suite against one host environment and one
/// database target.
///
/// The checker is cheap to build and meant to live for a single run; the
/// CLI constructs one per invocation, tests construct one per scenario.
pub struct RequirementsChecker<'a> {
    context: &'a HostContext,
    probe: &'a dyn DatabaseProbe,
}

impl<'a> RequirementsChecker<'a> {
    pub fn new(context: &'a HostContext, probe: &'a dyn DatabaseProbe) -> Self {
        Self { context, probe }
    }

    fn system_env(&self) -> SystemEnv<'a> {
        SystemEnv {
            context: self.context,
            probe: self.probe,
        }
    }

    /// Runs a single entry from [`SYSTEM_CHECKS`].
    pub fn run_system_check(&self, check: &SystemCheck) -> CheckResult {
        debug!("Running system check '{}'", check.name);
        (check.run)(&self.system_env())
    }

    /// Runs a single entry from [`DATABASE_CHECKS`].
    pub fn run_database_check(
        &self,
        check: &DatabaseCheck,
        config: &DatabaseConfig,
    ) -> CheckResult {
        debug!("Running database check '{}'", check.name);
        (check.run)(self.probe, config)
    }

    /// Runs the writable-path check.
    ///
    /// Not part of [`SYSTEM_CHECKS`] because it takes the path list
    /// instead of a [`SystemEnv`]; the suite always runs it first.
    pub fn run_writable_paths_check(&self, file_paths: &[PathBuf]) -> CheckResult {
        debug!("Checking write access to {} path(s)", file_paths.len());
        system::check_writable_paths(file_paths)
    }

    /// Runs the writable-path check, then every system check in order.
    ///
    /// Always returns `SYSTEM_CHECKS.len() + 1` results.
    pub fn check_system(&self, file_paths: &[PathBuf]) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(SYSTEM_CHECKS.len() + 1);
        results.push(self.run_writable_paths_check(file_paths));
        for check in SYSTEM_CHECKS {
            results.push(self.run_system_check(check));
        }
        results
    }

    /// Runs every database check against `config`, in order.
    ///
    /// Always returns `DATABASE_CHECKS.len()` results, even when the
    /// server is unreachable; each check reports its own failure.
    pub fn check_database(&self, config: &DatabaseConfig) -> Vec<CheckResult> {
        DATABASE_CHECKS
            .iter()
            .map(|check| self.run_database_check(check, config))
            .collect()
    }

    /// Runs the full suite: system checks first, then database checks.
    pub fn check_all(&self, file_paths: &[PathBuf], config: &DatabaseConfig) -> Vec<CheckResult> {
        let mut results = self.check_system(file_paths);
        results.extend(self.check_database(config));
        results
    }
}

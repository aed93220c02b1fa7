//! Installation requirement checks.
//!
//! Everything a pre-flight run produces or consumes lives here: the
//! result and report types, the individual host-environment and database
//! checks, and the suite that runs them in a fixed order.
//!
//! # Modules
//!
//! - [`report`] - Check results, severities, and the aggregate report
//! - [`system`] - Host-environment checks (paths, memory, variables, codecs)
//! - [`database`] - Database capability checks run over a live session
//! - [`suite`] - Named check tables and the [`RequirementsChecker`]

pub mod database;
pub mod report;
pub mod suite;
pub mod system;

pub use report::{CheckResult, Report, Severity, Summary};
pub use suite::{RequirementsChecker, DATABASE_CHECKS, SYSTEM_CHECKS};

//! Check report types.
//!
//! Every requirement check produces exactly one [`CheckResult`]; a full run
//! bundles them into a [`Report`] for terminal rendering or JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a check outcome affects installation.
///
/// Variants are declared in ascending blocking impact, so the derived
/// ordering gives `Ok < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Requirement met; the installer stays quiet.
    Ok,
    /// Requirement suspect but not blocking; the installer proceeds flagged.
    Warning,
    /// Requirement failed; installation must not proceed.
    Error,
}

impl Severity {
    /// Whether this outcome alone blocks installation.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Lowercase label used in JSON output and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// The outcome of a single requirement check.
///
/// Checks never fail silently: a check that cannot determine its answer
/// still produces a result with an explanatory `details` string.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Stable human-readable check name.
    pub title: String,
    /// Blocking impact of the outcome.
    pub severity: Severity,
    /// Measured value or failure explanation; never empty.
    pub details: String,
}

impl CheckResult {
    pub fn ok(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(title, Severity::Ok, details)
    }

    pub fn warning(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(title, Severity::Warning, details)
    }

    pub fn error(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(title, Severity::Error, details)
    }

    fn new(title: impl Into<String>, severity: Severity, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            severity,
            details: details.into(),
        }
    }

    /// Whether the check passed outright.
    pub fn passed(&self) -> bool {
        self.severity == Severity::Ok
    }
}

/// Pass/warn/fail counts for a completed run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// A completed run of the check suite.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Display title, usually the application being installed.
    pub title: String,
    /// When the run completed.
    pub checked_at: DateTime<Utc>,
    #[serde(rename = "counts")]
    pub summary: Summary,
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new(title: impl Into<String>, results: Vec<CheckResult>) -> Self {
        let summary = Summary {
            passed: results.iter().filter(|r| r.severity == Severity::Ok).count(),
            warnings: results
                .iter()
                .filter(|r| r.severity == Severity::Warning)
                .count(),
            errors: results
                .iter()
                .filter(|r| r.severity == Severity::Error)
                .count(),
        };
        Self {
            title: title.into(),
            checked_at: Utc::now(),
            summary,
            results,
        }
    }

    /// The most severe outcome in the run, or `Ok` for an empty run.
    pub fn worst(&self) -> Severity {
        self.results
            .iter()
            .map(|r| r.severity)
            .max()
            .unwrap_or(Severity::Ok)
    }

    /// Whether the run blocks installation.
    ///
    /// Errors always block; warnings block only in strict mode.
    pub fn is_blocking(&self, strict: bool) -> bool {
        match self.worst() {
            Severity::Error => true,
            Severity::Warning => strict,
            Severity::Ok => false,
        }
    }
}

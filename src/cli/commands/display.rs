//! Shared rendering for the check commands.
//!
//! `check`, `system`, and `database` all produce the same report shape;
//! this module holds the spinner loop that renders one line per check,
//! the summary and verdict rendering, and the `--json` envelope, so the
//! three commands cannot drift apart.

use std::path::PathBuf;

use serde::Serialize;

use crate::checks::suite::{RequirementsChecker, DATABASE_CHECKS, SYSTEM_CHECKS};
use crate::checks::{CheckResult, Report, Severity};
use crate::db::DatabaseConfig;
use crate::error::{RecceError, Result};
use crate::ui::{OutputMode, Prompt, PromptType, SpinnerHandle, UserInterface};

use super::dispatcher::CommandResult;

/// Indent for check lines under a section label.
const CHECK_INDENT: usize = 2;

/// Run the system checks, rendering one spinner line per check.
pub fn run_system_checks(
    checker: &RequirementsChecker,
    file_paths: &[PathBuf],
    ui: &mut dyn UserInterface,
) -> Vec<CheckResult> {
    let mode = ui.output_mode();
    if mode.shows_summary() {
        ui.message("System");
    }

    let mut results = Vec::with_capacity(SYSTEM_CHECKS.len() + 1);

    let spinner = ui.start_spinner_indented("Checking writable paths", CHECK_INDENT);
    let result = checker.run_writable_paths_check(file_paths);
    finish_check(mode, spinner, &result);
    results.push(result);

    for check in SYSTEM_CHECKS {
        let spinner = ui.start_spinner_indented(&format!("Checking {}", check.name), CHECK_INDENT);
        let result = checker.run_system_check(check);
        finish_check(mode, spinner, &result);
        results.push(result);
    }

    results
}

/// Run the database checks, rendering one spinner line per check.
pub fn run_database_checks(
    checker: &RequirementsChecker,
    config: &DatabaseConfig,
    ui: &mut dyn UserInterface,
) -> Vec<CheckResult> {
    let mode = ui.output_mode();
    if mode.shows_summary() {
        ui.message("Database");
    }

    let mut results = Vec::with_capacity(DATABASE_CHECKS.len());
    for check in DATABASE_CHECKS {
        let spinner = ui.start_spinner_indented(&format!("Checking {}", check.name), CHECK_INDENT);
        let result = checker.run_database_check(check, config);
        finish_check(mode, spinner, &result);
        results.push(result);
    }

    results
}

/// Render the summary block and the verdict line for a completed run.
pub fn render_outcome(ui: &mut dyn UserInterface, report: &Report, strict: bool) {
    let summary = &report.summary;
    if ui.output_mode().shows_summary() {
        ui.message("");
        ui.message(&format!(
            "Checks: {} passed, {}, {}",
            summary.passed,
            count(summary.warnings, "warning"),
            count(summary.errors, "error"),
        ));
    }

    if summary.errors > 0 {
        ui.error(&format!(
            "Installation blocked: {} must be fixed.",
            count(summary.errors, "error")
        ));
    } else if summary.warnings > 0 && strict {
        ui.error(&format!(
            "Installation blocked: {} treated as blocking (strict mode).",
            count(summary.warnings, "warning")
        ));
    } else if summary.warnings > 0 {
        ui.warning(&format!(
            "Proceed with caution: {} to review.",
            count(summary.warnings, "warning")
        ));
    } else {
        ui.success("Ready to install.");
    }
}

/// Ask for the database password when the merged settings leave it empty.
///
/// Interactive runs get a hidden prompt; non-interactive runs resolve
/// `RECCE_PROMPT_DB_PASSWORD` or fall back to an empty password.
pub fn ensure_password(
    mut config: DatabaseConfig,
    ui: &mut dyn UserInterface,
) -> Result<DatabaseConfig> {
    if !config.password.is_empty() {
        return Ok(config);
    }

    let prompt = Prompt {
        key: "db_password".to_string(),
        question: format!("Password for {}@{}", config.username, config.host),
        prompt_type: PromptType::Password,
        default: Some(String::new()),
    };
    config.password = ui.prompt(&prompt)?.as_string();
    Ok(config)
}

/// Exit status for a completed run: blocked reports exit 1.
pub fn verdict(report: &Report, strict: bool) -> CommandResult {
    if report.is_blocking(strict) {
        CommandResult::failure(1)
    } else {
        CommandResult::success()
    }
}

/// Serialize a report plus its blocking verdict as pretty JSON.
pub fn render_json(report: &Report, strict: bool) -> Result<String> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        #[serde(flatten)]
        report: &'a Report,
        blocking: bool,
    }

    let envelope = Envelope {
        report,
        blocking: report.is_blocking(strict),
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| RecceError::Other(e.into()))
}

fn finish_check(mode: OutputMode, mut spinner: Box<dyn SpinnerHandle>, result: &CheckResult) {
    let line = result_line(result, mode.shows_details());
    match result.severity {
        Severity::Ok => spinner.finish_success(&line),
        Severity::Warning => spinner.finish_warning(&line),
        Severity::Error => spinner.finish_error(&line),
    }
}

/// One rendered line per check: the title, with details appended for
/// anything that did not pass (and for every check in verbose mode).
fn result_line(result: &CheckResult, show_passing_details: bool) -> String {
    if show_passing_details || result.severity != Severity::Ok {
        format!("{}: {}", result.title, result.details)
    } else {
        result.title.clone()
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FakeProbe;
    use crate::host::HostContext;
    use crate::ui::MockUI;
    use std::collections::HashMap;

    fn healthy_context() -> HostContext {
        let vars = HashMap::from([
            ("SCRIPT_NAME".to_string(), "/install.php".to_string()),
            ("HTTP_HOST".to_string(), "app.test".to_string()),
            (
                "SCRIPT_FILENAME".to_string(),
                "/srv/app/install.php".to_string(),
            ),
        ]);
        HostContext::new(vars, Some("512M".to_string()))
    }

    #[test]
    fn system_run_starts_one_spinner_per_check() {
        let context = healthy_context();
        let probe = FakeProbe::new();
        let checker = RequirementsChecker::new(&context, &probe);
        let mut ui = MockUI::new();

        let results = run_system_checks(&checker, &[], &mut ui);

        assert_eq!(results.len(), SYSTEM_CHECKS.len() + 1);
        assert_eq!(ui.spinners().len(), results.len());
        assert_eq!(ui.spinners()[0], "Checking writable paths");
        assert!(ui.has_message("System"));
    }

    #[test]
    fn database_run_starts_one_spinner_per_check() {
        let context = healthy_context();
        let probe = FakeProbe::new();
        let checker = RequirementsChecker::new(&context, &probe);
        let mut ui = MockUI::new();

        let results = run_database_checks(&checker, &FakeProbe::config(), &mut ui);

        assert_eq!(results.len(), DATABASE_CHECKS.len());
        assert_eq!(ui.spinners().len(), results.len());
        assert!(ui.spinners().contains(&"Checking connection".to_string()));
        assert!(ui
            .spinners()
            .contains(&"Checking table locking".to_string()));
        assert!(ui.has_message("Database"));
    }

    #[test]
    fn passing_line_hides_details_by_default() {
        let result = CheckResult::ok("Memory limit", "512M configured");
        assert_eq!(result_line(&result, false), "Memory limit");
        assert_eq!(result_line(&result, true), "Memory limit: 512M configured");
    }

    #[test]
    fn failing_lines_always_carry_details() {
        let warning = CheckResult::warning("Memory limit", "only 48M configured");
        let error = CheckResult::error("Triggers", "CREATE TRIGGER denied");
        assert_eq!(result_line(&warning, false), "Memory limit: only 48M configured");
        assert_eq!(result_line(&error, false), "Triggers: CREATE TRIGGER denied");
    }

    #[test]
    fn clean_report_is_ready_to_install() {
        let report = Report::new("App", vec![CheckResult::ok("a", "fine")]);
        let mut ui = MockUI::new();

        render_outcome(&mut ui, &report, false);

        assert!(ui.has_success("Ready to install."));
        assert!(ui.has_message("Checks: 1 passed, 0 warnings, 0 errors"));
    }

    #[test]
    fn warnings_render_a_caution_verdict() {
        let report = Report::new("App", vec![CheckResult::warning("a", "hmm")]);
        let mut ui = MockUI::new();

        render_outcome(&mut ui, &report, false);

        assert!(ui.has_warning("Proceed with caution: 1 warning to review."));
    }

    #[test]
    fn strict_mode_turns_warnings_into_a_blocked_verdict() {
        let report = Report::new("App", vec![CheckResult::warning("a", "hmm")]);
        let mut ui = MockUI::new();

        render_outcome(&mut ui, &report, true);

        assert!(ui.has_error("Installation blocked: 1 warning treated as blocking (strict mode)."));
    }

    #[test]
    fn errors_render_a_blocked_verdict() {
        let report = Report::new(
            "App",
            vec![
                CheckResult::error("a", "broken"),
                CheckResult::error("b", "also broken"),
            ],
        );
        let mut ui = MockUI::new();

        render_outcome(&mut ui, &report, false);

        assert!(ui.has_error("Installation blocked: 2 errors must be fixed."));
    }

    #[test]
    fn quiet_mode_skips_the_summary_block() {
        let report = Report::new("App", vec![CheckResult::ok("a", "fine")]);
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        render_outcome(&mut ui, &report, false);

        assert!(!ui.has_message("Checks:"));
        assert!(ui.has_success("Ready to install."));
    }

    #[test]
    fn json_envelope_carries_report_fields_and_verdict() {
        let report = Report::new(
            "App",
            vec![
                CheckResult::ok("a", "fine"),
                CheckResult::error("b", "broken"),
            ],
        );

        let json = render_json(&report, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "App");
        assert!(value["checked_at"].is_string());
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["counts"]["errors"], 1);
        assert_eq!(value["blocking"], true);
    }

    #[test]
    fn json_blocking_reflects_strict_mode() {
        let report = Report::new("App", vec![CheckResult::warning("a", "hmm")]);

        let relaxed: serde_json::Value =
            serde_json::from_str(&render_json(&report, false).unwrap()).unwrap();
        let strict: serde_json::Value =
            serde_json::from_str(&render_json(&report, true).unwrap()).unwrap();

        assert_eq!(relaxed["blocking"], false);
        assert_eq!(strict["blocking"], true);
    }

    #[test]
    fn existing_password_is_not_prompted_for() {
        let mut ui = MockUI::new();
        let config = FakeProbe::config();

        let result = ensure_password(config, &mut ui).unwrap();

        assert_eq!(result.password, "secret");
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn empty_password_triggers_a_prompt() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("db_password", "hunter2");
        let config = DatabaseConfig {
            password: String::new(),
            ..FakeProbe::config()
        };

        let result = ensure_password(config, &mut ui).unwrap();

        assert_eq!(result.password, "hunter2");
        assert_eq!(ui.prompts_shown(), &["db_password".to_string()]);
    }

    #[test]
    fn unanswered_password_prompt_stays_empty() {
        let mut ui = MockUI::new();
        let config = DatabaseConfig {
            password: String::new(),
            ..FakeProbe::config()
        };

        let result = ensure_password(config, &mut ui).unwrap();

        assert_eq!(result.password, "");
    }

    #[test]
    fn verdict_maps_blocking_to_exit_one() {
        let clean = Report::new("App", vec![CheckResult::ok("a", "fine")]);
        let broken = Report::new("App", vec![CheckResult::error("a", "broken")]);

        assert_eq!(verdict(&clean, false).exit_code, 0);
        assert_eq!(verdict(&broken, false).exit_code, 1);
        assert!(!verdict(&broken, false).success);
    }

    #[test]
    fn verdict_honors_strict_mode() {
        let warned = Report::new("App", vec![CheckResult::warning("a", "hmm")]);

        assert_eq!(verdict(&warned, false).exit_code, 0);
        assert_eq!(verdict(&warned, true).exit_code, 1);
    }
}

//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use recce::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("db_password", "hunter2");
//!
//! // Use ui in code under test...
//! ui.message("Running checks");
//! ui.success("Ready to install.");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Running checks"));
//! assert!(ui.has_success("Ready to install."));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{
    parse_confirmation, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    ///
    /// When `prompt()` is called with this key, it returns the configured response.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.spinners.clear();
        self.prompts_shown.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let is_confirm = matches!(prompt.prompt_type, PromptType::Confirm);

        // Return pre-configured response if available
        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            if is_confirm {
                return Ok(PromptResult::Bool(parse_confirmation(response)));
            }
            return Ok(PromptResult::String(response.clone()));
        }

        // Fall back to default if available
        if let Some(default) = &prompt.default {
            if is_confirm {
                return Ok(PromptResult::Bool(parse_confirmation(default)));
            }
            return Ok(PromptResult::String(default.clone()));
        }

        // Return type-appropriate empty for last resort (for testing)
        if is_confirm {
            return Ok(PromptResult::Bool(false));
        }
        Ok(PromptResult::String(String::new()))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn start_spinner_indented(&mut self, message: &str, _indent: usize) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner handle that does nothing (for MockUI).
#[derive(Debug, Default)]
pub struct MockSpinner;

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_warning(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");

        assert_eq!(ui.messages(), &["hello".to_string()]);
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
    }

    #[test]
    fn mock_captures_headers_and_spinners() {
        let mut ui = MockUI::new();
        ui.show_header("Pre-flight");
        let _ = ui.start_spinner("Checking memory");

        assert_eq!(ui.headers(), &["Pre-flight".to_string()]);
        assert_eq!(ui.spinners(), &["Checking memory".to_string()]);
    }

    #[test]
    fn mock_prompt_returns_configured_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("db_password", "hunter2");

        let prompt = Prompt {
            key: "db_password".to_string(),
            question: "Password?".to_string(),
            prompt_type: PromptType::Password,
            default: None,
        };
        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_string(), "hunter2");
        assert_eq!(ui.prompts_shown(), &["db_password".to_string()]);
    }

    #[test]
    fn mock_confirm_parses_yes_and_no() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("overwrite", "yes");

        let prompt = Prompt {
            key: "overwrite".to_string(),
            question: "Overwrite?".to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
        };
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(true));

        ui.set_prompt_response("overwrite", "no");
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(false));
    }

    #[test]
    fn mock_confirm_without_response_declines() {
        let mut ui = MockUI::new();
        let prompt = Prompt {
            key: "overwrite".to_string(),
            question: "Overwrite?".to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
        };
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(false));
    }

    #[test]
    fn mock_clear_resets_captures() {
        let mut ui = MockUI::new();
        ui.message("one");
        ui.clear();
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn mock_interactive_flag() {
        let mut ui = MockUI::new();
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }
}

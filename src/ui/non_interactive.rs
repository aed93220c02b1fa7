//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{RecceError, Result};

use super::{
    parse_confirmation, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// UI implementation for non-interactive mode.
///
/// Spinners degrade to plain printed lines, which read cleanly in
/// CI logs. Prompts cannot block, so answers come from
/// `RECCE_PROMPT_*` environment variables or the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        // Collect RECCE_PROMPT_* env vars
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("RECCE_PROMPT_"))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn resolve_response(&self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("RECCE_PROMPT_{}", prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Some(value.clone());
        }
        prompt.default.clone()
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let Some(value) = self.resolve_response(prompt) else {
            return Err(RecceError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ),
            });
        };

        match prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(parse_confirmation(&value))),
            PromptType::Password => Ok(PromptResult::String(value)),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.start_spinner_indented(message, 0)
    }

    fn start_spinner_indented(&mut self, message: &str, indent: usize) -> Box<dyn SpinnerHandle> {
        let visible = self.mode.shows_spinners();
        if visible {
            let prefix = " ".repeat(indent);
            println!("{}{}", prefix, message);
        }
        Box::new(NoopSpinner { indent, visible })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints finish lines instead of animating.
struct NoopSpinner {
    indent: usize,
    visible: bool,
}

impl NoopSpinner {
    fn finish(&self, icon: &str, msg: &str) {
        if self.visible {
            let prefix = " ".repeat(self.indent);
            println!("{}{} {}", prefix, icon, msg);
        }
    }
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finish("✓", msg);
    }

    fn finish_warning(&mut self, msg: &str) {
        self.finish("⚠", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            self.finish("✗", msg);
        } else {
            // Errors surface even in silent mode.
            eprintln!("✗ {}", msg);
        }
    }
}

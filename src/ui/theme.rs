//! Visual theme and styling.

use console::Style;

/// Recce's visual theme.
#[derive(Debug, Clone)]
pub struct RecceTheme {
    /// Style for passing results (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for failing results (red bold).
    pub error: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for RecceTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RecceTheme {
    /// Create the default Recce theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().bold().cyan(),
            highlight: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            highlight: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format a passing result (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format a failing result (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("🧭"),
            self.highlight.apply_to(title)
        )
    }

    /// Format secondary detail text.
    pub fn format_detail(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(msg))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

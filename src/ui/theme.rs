//! Visual theme and styling.

use console::Style;

use crate::tasks::Severity;

/// Styles used by the terminal UI.
#[derive(Debug, Clone)]
pub struct ConductorTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
}

impl Default for ConductorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ConductorTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(format!("▶ {}", title)))
    }

    /// Style a line according to an outcome severity.
    pub fn format_severity(&self, severity: Severity, msg: &str) -> String {
        match severity {
            Severity::Ok => self.format_success(msg),
            Severity::Warning => self.format_warning(msg),
            Severity::Error | Severity::Critical => self.format_error(msg),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_without_escape_codes() {
        let theme = ConductorTheme::plain();
        assert_eq!(theme.format_success("done"), "✓ done");
        assert_eq!(theme.format_warning("slow"), "⚠ slow");
        assert_eq!(theme.format_error("broken"), "✗ broken");
        assert_eq!(theme.format_header("Run"), "▶ Run");
    }

    #[test]
    fn severity_picks_matching_icon() {
        let theme = ConductorTheme::plain();
        assert!(theme.format_severity(Severity::Ok, "a").starts_with('✓'));
        assert!(theme.format_severity(Severity::Warning, "a").starts_with('⚠'));
        assert!(theme.format_severity(Severity::Error, "a").starts_with('✗'));
        assert!(theme.format_severity(Severity::Critical, "a").starts_with('✗'));
    }

    #[test]
    fn colored_theme_contains_message() {
        let theme = ConductorTheme::new();
        assert!(theme.format_success("done").contains("done"));
    }
}

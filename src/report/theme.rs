//! Console color theme.

use console::Style;

/// Styles applied to run output.
#[derive(Debug, Clone)]
pub struct MailflowTheme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub accent: Style,
    pub muted: Style,
    pub heading: Style,
}

impl MailflowTheme {
    /// The standard colored theme. `console` suppresses the escape codes
    /// itself when the stream is not a terminal.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red(),
            warning: Style::new().yellow(),
            accent: Style::new().cyan(),
            muted: Style::new().dim(),
            heading: Style::new().bold(),
        }
    }

    /// A theme with no styling at all, for captured or piped output.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            warning: Style::new(),
            accent: Style::new(),
            muted: Style::new(),
            heading: Style::new(),
        }
    }
}

impl Default for MailflowTheme {
    fn default() -> Self {
        Self::new()
    }
}

//! Status glyphs for step outcomes.

use console::Style;

use crate::pipeline::StepOutcome;
use crate::report::theme::MailflowTheme;

/// Visual category of a step outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failed,
    Skipped,
    Running,
    Warning,
}

impl StatusKind {
    /// Unicode glyph used on capable terminals.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Running => "◆",
            Self::Warning => "⚠",
        }
    }

    /// ASCII fallback for dumb terminals and piped output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Skipped => "[skip]",
            Self::Running => "[run]",
            Self::Warning => "[warn]",
        }
    }

    /// The theme style that colors this status.
    pub fn styled(self, theme: &MailflowTheme) -> &Style {
        match self {
            Self::Success => &theme.success,
            Self::Failed => &theme.error,
            Self::Skipped => &theme.muted,
            Self::Running => &theme.accent,
            Self::Warning => &theme.warning,
        }
    }

    /// Colored glyph, with the ASCII fallback when unicode is unsafe.
    pub fn format(self, theme: &MailflowTheme, unicode: bool) -> String {
        let glyph = if unicode { self.icon() } else { self.bracketed() };
        self.styled(theme).apply_to(glyph).to_string()
    }
}

impl From<&StepOutcome> for StatusKind {
    fn from(outcome: &StepOutcome) -> Self {
        match outcome {
            StepOutcome::Success { .. } => Self::Success,
            StepOutcome::Failed { .. } => Self::Failed,
            StepOutcome::Skipped { .. } => Self::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_and_fallbacks_are_distinct() {
        let kinds = [
            StatusKind::Success,
            StatusKind::Failed,
            StatusKind::Skipped,
            StatusKind::Running,
            StatusKind::Warning,
        ];
        let mut icons: Vec<_> = kinds.iter().map(|k| k.icon()).collect();
        icons.sort();
        icons.dedup();
        assert_eq!(icons.len(), kinds.len());

        let mut brackets: Vec<_> = kinds.iter().map(|k| k.bracketed()).collect();
        brackets.sort();
        brackets.dedup();
        assert_eq!(brackets.len(), kinds.len());
    }

    #[test]
    fn outcome_maps_to_matching_status() {
        let success = StepOutcome::Success { detail: vec![] };
        let skipped = StepOutcome::Skipped {
            reason: "nothing to do".into(),
        };
        assert_eq!(StatusKind::from(&success), StatusKind::Success);
        assert_eq!(StatusKind::from(&skipped), StatusKind::Skipped);
    }

    #[test]
    fn plain_theme_format_keeps_glyph() {
        let theme = MailflowTheme::plain();
        assert_eq!(StatusKind::Success.format(&theme, true), "✓");
        assert_eq!(StatusKind::Failed.format(&theme, false), "[FAIL]");
    }
}

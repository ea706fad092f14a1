//! Error types for Mailflow setup.
//!
//! This module defines [`MailflowError`], the error type for failures that
//! occur before the pipeline starts (configuration and credential
//! resolution), and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MailflowError` for setup-phase errors that abort the run
//! - API call failures during the pipeline are NOT represented here:
//!   they are caught at the step executor boundary and downgraded to
//!   [`StepOutcome::Failed`](crate::pipeline::StepOutcome) data
//! - Use `anyhow::Error` (via `MailflowError::Other`) for unexpected errors

use thiserror::Error;

/// Setup-phase error type for Mailflow.
#[derive(Debug, Error)]
pub enum MailflowError {
    /// Invalid configuration value (empty or malformed).
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Mailflow setup operations.
pub type Result<T> = std::result::Result<T, MailflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_error_displays_message() {
        let err = MailflowError::ConfigValidationError {
            message: "sender email must not be empty".into(),
        };
        assert!(err.to_string().contains("sender email must not be empty"));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: MailflowError = anyhow::anyhow!("unexpected").into();
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(MailflowError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}

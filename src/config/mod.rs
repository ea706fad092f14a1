//! Run configuration.
//!
//! A [`RunConfig`] is built once from the CLI arguments at process start
//! and passed immutably into the pipeline. There is no global mutable
//! configuration: the orchestrator only ever sees this struct and the
//! resolved [`Credentials`].

mod credentials;

pub use credentials::{Credentials, ACCOUNT_API_KEY_ENV, SUBACCOUNT_API_KEY_ENV};

use crate::cli::Cli;
use crate::error::{MailflowError, Result};

/// Immutable configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the ESP platform API.
    pub base_url: String,
    /// Sender address for demonstration emails.
    pub from_email: String,
    /// Recipient address for demonstration emails.
    pub to_email: String,
    /// Sending domain to register.
    pub domain: String,
    /// Callback URL registered for webhook events.
    pub webhook_url: String,
    /// Days of history for statistics queries.
    pub stats_window_days: i64,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl RunConfig {
    /// Build and validate configuration from parsed CLI arguments.
    ///
    /// Values are validated only for non-emptiness; the platform is the
    /// authority on whether an address or domain is actually usable.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            base_url: require_http_url("base URL", &cli.base_url)?,
            from_email: require_non_empty("sender email", &cli.from)?,
            to_email: require_non_empty("recipient email", &cli.to)?,
            domain: require_non_empty("sending domain", &cli.domain)?,
            webhook_url: require_non_empty("webhook URL", &cli.webhook_url)?,
            stats_window_days: cli.stats_window,
            timeout_secs: cli.timeout,
        })
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MailflowError::ConfigValidationError {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(trimmed.to_string())
}

fn require_http_url(field: &str, value: &str) -> Result<String> {
    let url = require_non_empty(field, value)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(MailflowError::ConfigValidationError {
            message: format!("{} must start with http:// or https://", field),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["mailflow"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn builds_from_default_cli() {
        let config = RunConfig::from_cli(&cli(&[])).unwrap();
        assert_eq!(config.stats_window_days, 7);
        assert!(!config.from_email.is_empty());
        assert!(!config.webhook_url.is_empty());
    }

    #[test]
    fn rejects_empty_sender() {
        let result = RunConfig::from_cli(&cli(&["--from", "  "]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("sender email"), "error was: {}", err);
    }

    #[test]
    fn rejects_empty_domain() {
        let result = RunConfig::from_cli(&cli(&["--domain", ""]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = RunConfig::from_cli(&cli(&["--base-url", "ftp://api.example"]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("base URL"), "error was: {}", err);
    }

    #[test]
    fn trims_whitespace_from_values() {
        let config = RunConfig::from_cli(&cli(&["--domain", " demo.test "])).unwrap();
        assert_eq!(config.domain, "demo.test");
    }
}

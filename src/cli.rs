//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! Mailflow is a single-shot tool, so there are no subcommands: parsing
//! the arguments and running the pipeline is the whole program.

use clap::Parser;

/// Mailflow - End-to-end ESP platform API workflow demonstration.
#[derive(Debug, Parser)]
#[command(name = "mailflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the ESP platform API
    #[arg(long, env = "MAILFLOW_BASE_URL", default_value = "https://api.sendpost.io/api/v1")]
    pub base_url: String,

    /// Sender address for the demonstration emails
    #[arg(long, env = "MAILFLOW_FROM", default_value = "sender@yourdomain.com")]
    pub from: String,

    /// Recipient address for the demonstration emails
    #[arg(long, env = "MAILFLOW_TO", default_value = "recipient@example.com")]
    pub to: String,

    /// Sending domain to register and verify
    #[arg(long, env = "MAILFLOW_DOMAIN", default_value = "yourdomain.com")]
    pub domain: String,

    /// Callback URL for webhook event delivery
    #[arg(
        long,
        env = "MAILFLOW_WEBHOOK_URL",
        default_value = "https://your-webhook-endpoint.example/webhook"
    )]
    pub webhook_url: String,

    /// Days of history for statistics queries
    #[arg(long, default_value_t = 7)]
    pub stats_window: i64,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply_without_args() {
        let cli = Cli::try_parse_from(["mailflow"]).unwrap();
        assert_eq!(cli.stats_window, 7);
        assert_eq!(cli.timeout, 30);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.base_url.starts_with("https://"));
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "mailflow",
            "--base-url",
            "http://localhost:9999/api/v1",
            "--domain",
            "demo.test",
            "--verbose",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://localhost:9999/api/v1");
        assert_eq!(cli.domain, "demo.test");
        assert!(cli.verbose);
        assert!(cli.no_color);
    }
}

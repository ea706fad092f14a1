//! Terminal reporter.

use std::time::Duration;

use crate::pipeline::{RunSummary, StepOutcome, StepRecord};
use crate::report::status::StatusKind;
use crate::report::theme::MailflowTheme;
use crate::report::{OutputMode, Reporter};

/// How many detail lines a step prints in normal mode before truncating.
const NORMAL_DETAIL_LINES: usize = 4;

/// Writes run progress to stdout, one line per step.
pub struct ConsoleReporter {
    theme: MailflowTheme,
    mode: OutputMode,
    unicode: bool,
    total: usize,
}

impl ConsoleReporter {
    pub fn new(mode: OutputMode) -> Self {
        let term = console::Term::stdout();
        Self {
            theme: MailflowTheme::new(),
            mode,
            unicode: term.features().is_attended(),
            total: 0,
        }
    }

    /// Fully specified constructor, used by tests.
    pub fn with_parts(theme: MailflowTheme, mode: OutputMode, unicode: bool) -> Self {
        Self {
            theme,
            mode,
            unicode,
            total: 0,
        }
    }

    fn step_line(&self, record: &StepRecord) -> String {
        let status = StatusKind::from(&record.outcome).format(&self.theme, self.unicode);
        format!(
            "{} [{:>2}/{}] {} ({})",
            status,
            record.index,
            self.total,
            record.name,
            format_duration(record.duration)
        )
    }

    fn print_detail(&self, lines: &[String]) {
        let limit = match self.mode {
            OutputMode::Verbose => lines.len(),
            _ => NORMAL_DETAIL_LINES,
        };
        for line in lines.iter().take(limit) {
            println!("         {}", self.theme.muted.apply_to(line));
        }
        if lines.len() > limit {
            println!(
                "         {}",
                self.theme
                    .muted
                    .apply_to(format!("... {} more line(s)", lines.len() - limit))
            );
        }
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, total: usize) {
        self.total = total;
        if self.mode != OutputMode::Quiet {
            println!(
                "{}",
                self.theme
                    .heading
                    .apply_to(format!("Running {} pipeline steps", total))
            );
            println!();
        }
    }

    fn step_started(&mut self, _index: usize, _total: usize, _name: &str) {}

    fn step_finished(&mut self, record: &StepRecord) {
        // Quiet mode surfaces only problems.
        if self.mode == OutputMode::Quiet && record.outcome.is_success() {
            return;
        }

        println!("{}", self.step_line(record));
        match &record.outcome {
            StepOutcome::Success { detail } => {
                if self.mode != OutputMode::Quiet {
                    self.print_detail(detail);
                }
            }
            StepOutcome::Failed { kind, status, body } => {
                let mut lines = vec![format!("failure kind: {}", kind)];
                if let Some(status) = status {
                    lines.push(format!("HTTP status: {}", status));
                }
                if let Some(body) = body {
                    if !body.is_empty() {
                        lines.push(format!("response: {}", body));
                    }
                }
                for line in &lines {
                    println!("         {}", self.theme.error.apply_to(line));
                }
            }
            StepOutcome::Skipped { reason } => {
                println!("         {}", self.theme.muted.apply_to(reason));
            }
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        println!();
        let counts = format!(
            "{} succeeded, {} failed, {} skipped",
            summary.succeeded, summary.failed, summary.skipped
        );
        let styled = if summary.failed > 0 {
            self.theme.warning.apply_to(counts).to_string()
        } else {
            self.theme.success.apply_to(counts).to_string()
        };
        println!(
            "{} {} ({})",
            self.theme.heading.apply_to("Summary:"),
            styled,
            format_duration(summary.duration)
        );
    }
}

fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

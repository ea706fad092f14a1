//! Run reporting.
//!
//! The orchestrator talks to a [`Reporter`] trait object, so output is
//! pluggable: [`ConsoleReporter`] prints to the terminal,
//! [`CaptureReporter`] records callbacks for assertions.

mod capture;
mod console;
mod status;
mod theme;

pub use capture::{CaptureReporter, CapturedStep};
pub use console::ConsoleReporter;
pub use status::StatusKind;
pub use theme::MailflowTheme;

use crate::pipeline::{RunSummary, StepRecord};

/// Output verbosity, derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Failures and the summary only.
    Quiet,
    /// One line per step plus capped detail.
    Normal,
    /// Everything, uncapped.
    Verbose,
}

impl OutputMode {
    /// Resolve the mode from the two CLI flags. Verbose wins over quiet
    /// when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }
}

/// Receives run progress from the orchestrator.
pub trait Reporter {
    fn run_started(&mut self, total: usize);
    fn step_started(&mut self, index: usize, total: usize, name: &str);
    fn step_finished(&mut self, record: &StepRecord);
    fn run_finished(&mut self, summary: &RunSummary);
}

//! In-memory reporter for tests.

use crate::pipeline::{RunSummary, StepOutcome, StepRecord};
use crate::report::Reporter;

/// One finished step as seen by the reporter, flattened for assertions.
#[derive(Debug, Clone)]
pub struct CapturedStep {
    pub name: String,
    pub index: usize,
    /// The outcome label: "success", "failed" or "skipped".
    pub outcome: String,
    /// Failure kind label, for failed steps.
    pub kind: Option<String>,
    pub status: Option<u16>,
    pub skip_reason: Option<String>,
    pub detail: Vec<String>,
}

/// Records every reporter callback instead of printing.
#[derive(Debug, Default)]
pub struct CaptureReporter {
    pub started: Vec<String>,
    pub finished: Vec<CapturedStep>,
    /// `(succeeded, failed, skipped)` from the final summary.
    pub totals: Option<(usize, usize, usize)>,
}

impl CaptureReporter {
    pub fn step(&self, name: &str) -> Option<&CapturedStep> {
        self.finished.iter().find(|step| step.name == name)
    }
}

impl Reporter for CaptureReporter {
    fn run_started(&mut self, _total: usize) {}

    fn step_started(&mut self, _index: usize, _total: usize, name: &str) {
        self.started.push(name.to_string());
    }

    fn step_finished(&mut self, record: &StepRecord) {
        let mut captured = CapturedStep {
            name: record.name.to_string(),
            index: record.index,
            outcome: record.outcome.label().to_string(),
            kind: None,
            status: None,
            skip_reason: None,
            detail: Vec::new(),
        };
        match &record.outcome {
            StepOutcome::Success { detail } => captured.detail = detail.clone(),
            StepOutcome::Failed { kind, status, .. } => {
                captured.kind = Some(kind.label().to_string());
                captured.status = *status;
            }
            StepOutcome::Skipped { reason } => captured.skip_reason = Some(reason.clone()),
        }
        self.finished.push(captured);
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        self.totals = Some((summary.succeeded, summary.failed, summary.skipped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiErrorKind;
    use std::time::Duration;

    #[test]
    fn capture_flattens_outcomes() {
        let mut reporter = CaptureReporter::default();
        reporter.step_started(1, 2, "Create webhook");
        reporter.step_finished(&StepRecord {
            name: "Create webhook",
            index: 1,
            outcome: StepOutcome::Failed {
                kind: ApiErrorKind::Forbidden,
                status: Some(403),
                body: Some("no".into()),
            },
            duration: Duration::from_millis(1),
        });
        reporter.step_finished(&StepRecord {
            name: "Retrieve message detail",
            index: 2,
            outcome: StepOutcome::Skipped {
                reason: "message id not available".into(),
            },
            duration: Duration::ZERO,
        });

        assert_eq!(reporter.started, vec!["Create webhook"]);
        let failed = reporter.step("Create webhook").unwrap();
        assert_eq!(failed.outcome, "failed");
        assert_eq!(failed.kind.as_deref(), Some("forbidden"));
        assert_eq!(failed.status, Some(403));

        let skipped = reporter.step("Retrieve message detail").unwrap();
        assert_eq!(skipped.outcome, "skipped");
        assert_eq!(
            skipped.skip_reason.as_deref(),
            Some("message id not available")
        );
    }
}

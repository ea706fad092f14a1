//! Step vocabulary: the static pipeline table, outcomes, and records.

use std::time::Duration;

use crate::client::{ApiError, ApiErrorKind, Scope};
use crate::pipeline::context::ContextField;

/// Identifies one operation in the fixed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    ListSubAccounts,
    CreateSubAccount,
    CreateWebhook,
    AddDomain,
    ListDomains,
    SendTransactional,
    SendMarketing,
    MessageDetail,
    SubAccountStats,
    AggregateStats,
    AccountStats,
    ListIps,
    CreateIpPool,
}

/// What to do when a declared input is missing from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Do not run the step at all; record it as skipped. The API client
    /// is never invoked.
    Skip,
    /// Substitute the documented fallback value and run.
    UseDefault,
    /// Run anyway and let the platform reject the call.
    Attempt,
}

/// Static descriptor for one pipeline step. Created once; never mutated.
#[derive(Debug)]
pub struct StepSpec {
    pub id: StepId,
    pub name: &'static str,
    pub scope: Scope,
    /// Context fields this step reads.
    pub requires: &'static [ContextField],
    pub on_missing: MissingPolicy,
}

/// The fixed pipeline, in topological order.
pub const PIPELINE: [StepSpec; 13] = [
    StepSpec {
        id: StepId::ListSubAccounts,
        name: "List sub-accounts",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::CreateSubAccount,
        name: "Create sub-account",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::CreateWebhook,
        name: "Create webhook",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::AddDomain,
        name: "Add domain",
        scope: Scope::SubAccount,
        // The domain is registered under the sub-account credential, so
        // a missing sub-account id is survivable: attempt the call and
        // let the platform decide.
        requires: &[ContextField::SubAccountId],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::ListDomains,
        name: "List domains",
        scope: Scope::SubAccount,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::SendTransactional,
        name: "Send transactional email",
        scope: Scope::SubAccount,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::SendMarketing,
        name: "Send marketing email",
        scope: Scope::SubAccount,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::MessageDetail,
        name: "Retrieve message detail",
        scope: Scope::Account,
        // Without a message id there is nothing to look up.
        requires: &[ContextField::MessageId],
        on_missing: MissingPolicy::Skip,
    },
    StepSpec {
        id: StepId::SubAccountStats,
        name: "Sub-account statistics",
        scope: Scope::Account,
        requires: &[ContextField::SubAccountId],
        on_missing: MissingPolicy::UseDefault,
    },
    StepSpec {
        id: StepId::AggregateStats,
        name: "Aggregate statistics",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::AccountStats,
        name: "Account-wide statistics",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::ListIps,
        name: "List dedicated IPs",
        scope: Scope::Account,
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
    StepSpec {
        id: StepId::CreateIpPool,
        name: "Create IP pool",
        scope: Scope::Account,
        // Needs at least one allocated IP; checked inside the step
        // because availability is runtime data, not a context field.
        requires: &[],
        on_missing: MissingPolicy::Attempt,
    },
];

/// Outcome of one step. Immutable once created.
#[derive(Debug)]
pub enum StepOutcome {
    /// The call succeeded; `detail` holds display lines for the reporter.
    Success { detail: Vec<String> },
    /// The call was attempted and failed.
    Failed {
        kind: ApiErrorKind,
        status: Option<u16>,
        body: Option<String>,
    },
    /// The step was never attempted.
    Skipped { reason: String },
}

impl StepOutcome {
    /// Build a failure outcome from a caught API error.
    pub fn from_api_error(error: &ApiError) -> Self {
        Self::Failed {
            kind: error.kind(),
            status: error.status(),
            body: error.body().map(String::from),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Short lowercase label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }
}

/// One executed (or skipped) step, as handed to the reporter.
#[derive(Debug)]
pub struct StepRecord {
    pub name: &'static str,
    /// 1-based position in the pipeline.
    pub index: usize,
    pub outcome: StepOutcome,
    pub duration: Duration,
}

/// Counts returned by the orchestrator at run end.
#[derive(Debug)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

//! The demonstration pipeline.
//!
//! Submodules:
//! - [`context`]: identifiers threaded between steps
//! - [`step`]: the static step table and outcome types
//! - [`runner`]: the orchestrator and per-step executor

pub mod context;
pub mod runner;
pub mod step;

pub use context::{ContextField, WorkflowContext, DEFAULT_SUB_ACCOUNT_ID};
pub use runner::Pipeline;
pub use step::{
    MissingPolicy, RunSummary, StepId, StepOutcome, StepRecord, StepSpec, PIPELINE,
};

//! Guided walkthrough of an email platform's API surface.
//!
//! The binary runs a fixed pipeline of platform operations against one
//! account: tenant management, webhook registration, sending domains,
//! email submission, message lookup, statistics, and dedicated IP
//! pooling. Every step is attempted even when an earlier one failed, so
//! a single run shows which parts of an integration work and which do
//! not.
//!
//! Modules:
//! - [`cli`]: command-line interface
//! - [`config`]: run configuration and credential resolution
//! - [`client`]: the authenticated platform API client
//! - [`pipeline`]: the step table and orchestrator
//! - [`report`]: progress output
//! - [`error`]: setup-phase errors

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use error::{MailflowError, Result};

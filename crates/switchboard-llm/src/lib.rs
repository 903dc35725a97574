//! Request orchestration for Switchboard
//!
//! Ties admission control, model selection, budget enforcement and
//! provider invocation into one per-request protocol. Providers are
//! resolved by model-name prefix; families without a registered backend
//! answer with a canned echo so the router stays usable offline.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod invoker;
pub mod orchestrator;
pub mod provider;

pub use error::LlmError;
pub use invoker::Invoker;
pub use orchestrator::{Orchestrator, Prediction};
pub use provider::{EchoProvider, Provider};

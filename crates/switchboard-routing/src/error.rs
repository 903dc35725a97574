//! Routing-specific error types

use thiserror::Error;

/// Errors that can occur during model selection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// The registry has no candidates to score
    #[error("no models available")]
    NoModelsAvailable,
}

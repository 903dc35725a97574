#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod budget;
mod env;
pub mod invocation;
mod loader;
pub mod rate_limit;
pub mod routing;
pub mod telemetry;

use serde::Deserialize;

pub use auth::*;
pub use budget::*;
pub use invocation::*;
pub use rate_limit::*;
pub use routing::*;
pub use telemetry::*;

/// Top-level Switchboard configuration
///
/// Every section is optional; an empty file yields the reference
/// deployment (eight built-in models, 10 requests per minute, a 5.0
/// budget with `text-ada-001` as fallback).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Model registry and scoring weights
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Global request admission limit
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Spend ceiling and fallback model
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Provider families and invocation timeout
    #[serde(default)]
    pub invocation: InvocationConfig,
    /// Credential for weight updates
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

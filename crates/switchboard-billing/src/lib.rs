//! Spend tracking against a fixed budget

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod monitor;

pub use error::BillingError;
pub use monitor::UsageMonitor;

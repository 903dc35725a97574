use thiserror::Error;

/// Errors raised by budget enforcement
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// The charge would take cumulative spend past the limit
    #[error("cost limit exceeded: projected spend {projected:.4} exceeds budget {limit:.4}")]
    BudgetExceeded {
        /// Spend after the rejected charge
        projected: f64,
        /// Configured ceiling
        limit: f64,
    },
}

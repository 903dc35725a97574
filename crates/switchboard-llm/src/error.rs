use http::StatusCode;
use switchboard_billing::BillingError;
use switchboard_core::HttpError;
use switchboard_ratelimit::RateLimitError;
use switchboard_routing::RoutingError;
use thiserror::Error;

/// Errors that can end a routed request or a weight update
#[derive(Debug, Error)]
pub enum LlmError {
    /// Too many requests inside the admission window
    #[error("rate limit exceeded")]
    RateLimited {
        /// Seconds until the rate limit resets
        retry_after: u64,
    },

    /// Neither the selected model nor the fallback fits the budget
    #[error("cost limit exceeded: projected spend {projected:.4} exceeds budget {limit:.4}")]
    BudgetExceeded { projected: f64, limit: f64 },

    /// The registry has nothing to choose from
    #[error("no models available for routing")]
    NoModelsAvailable,

    /// Provider invocation failed or timed out
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Weight update presented a missing or wrong credential
    #[error("authentication required")]
    Unauthorized,

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RateLimitError> for LlmError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::Exceeded { retry_after } => Self::RateLimited { retry_after },
            RateLimitError::Config(_) => Self::Internal(err.into()),
        }
    }
}

impl From<BillingError> for LlmError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::BudgetExceeded { projected, limit } => Self::BudgetExceeded { projected, limit },
        }
    }
}

impl From<RoutingError> for LlmError {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::NoModelsAvailable => Self::NoModelsAvailable,
        }
    }
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::BudgetExceeded { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::NoModelsAvailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::RateLimited { .. } => "rate_limit_error",
            Self::BudgetExceeded { .. } => "budget_exceeded_error",
            Self::NoModelsAvailable => "routing_error",
            Self::Upstream(_) => "upstream_error",
            Self::Unauthorized => "authentication_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }

    fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

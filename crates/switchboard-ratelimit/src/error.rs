use thiserror::Error;

/// Rate limiting errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateLimitError {
    /// Configuration error
    #[error("rate limit configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after}s")]
    Exceeded {
        /// Seconds until the oldest admitted request leaves the window
        retry_after: u64,
    },
}

use std::time::Duration;

use switchboard_config::RateLimitConfig;

use crate::{error::RateLimitError, window::SlidingWindow};

/// Request-level admission control
///
/// One counter shared by every caller. There is no per-client keying:
/// a burst from one source consumes capacity for all.
#[derive(Debug)]
pub struct RequestLimiter {
    global: SlidingWindow,
}

impl RequestLimiter {
    /// Create from configuration
    pub fn new(config: &RateLimitConfig) -> Result<Self, RateLimitError> {
        let window = parse_duration(&config.window)?;
        Self::with_window(config.requests, window)
    }

    /// Create with an explicit threshold and window length
    pub fn with_window(max_requests: u32, window: Duration) -> Result<Self, RateLimitError> {
        Ok(Self {
            global: SlidingWindow::new(max_requests, window)?,
        })
    }

    /// Admit the current request against the global window
    pub fn check(&self) -> Result<(), RateLimitError> {
        self.global.check().inspect_err(|e| {
            if let RateLimitError::Exceeded { retry_after } = e {
                tracing::warn!(
                    limit = self.global.max_requests(),
                    window_secs = self.global.window().as_secs(),
                    retry_after,
                    "global rate limit exceeded"
                );
            }
        })
    }

    /// Requests currently counted against the window
    pub fn admitted(&self) -> usize {
        self.global.admitted()
    }
}

fn parse_duration(s: &str) -> Result<Duration, RateLimitError> {
    duration_str::parse(s).map_err(|e| RateLimitError::Config(format!("invalid duration '{s}': {e}")))
}

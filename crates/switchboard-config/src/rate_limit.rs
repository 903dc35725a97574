use serde::Deserialize;

/// Global request admission limit
///
/// A single sliding window shared by all callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window
    #[serde(default = "default_requests")]
    pub requests: u32,
    /// Window duration (e.g. "60s", "1m")
    #[serde(default = "default_window")]
    pub window: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            window: default_window(),
        }
    }
}

const fn default_requests() -> u32 {
    10
}

fn default_window() -> String {
    "60s".to_owned()
}

//! Sliding-window admission control

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod request;
mod window;

pub use error::RateLimitError;
pub use request::RequestLimiter;
pub use window::SlidingWindow;

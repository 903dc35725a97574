//! Shared seams between the routing core and its boundary layers

mod error;

pub use error::HttpError;

//! Provider trait and the offline echo backend

mod echo;

use async_trait::async_trait;

pub use echo::EchoProvider;

use crate::error::LlmError;

/// Trait implemented by each model backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Run `text` through `model` and return the reply text
    async fn invoke(&self, model: &str, text: &str) -> Result<String, LlmError>;
}

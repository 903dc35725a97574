use async_trait::async_trait;

use super::Provider;
use crate::error::LlmError;

/// Stand-in backend that describes the call instead of making it
///
/// Serves families that have no real provider registered, and models
/// whose name matches no family at all.
#[derive(Debug, Clone)]
pub struct EchoProvider {
    family: Option<String>,
}

impl EchoProvider {
    /// Echo for a known family without a backend
    pub fn family(name: impl Into<String>) -> Self {
        Self {
            family: Some(name.into()),
        }
    }

    /// Echo for models that match no family
    pub const fn unknown() -> Self {
        Self { family: None }
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn name(&self) -> &str {
        self.family.as_deref().unwrap_or("unknown")
    }

    async fn invoke(&self, model: &str, text: &str) -> Result<String, LlmError> {
        Ok(match &self.family {
            Some(family) => format!("[{family} mock inference for {model}] => {text}"),
            None => format!("[Unknown model invocation for {model}] => {text}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn family_echo_names_family_and_model() {
        let provider = EchoProvider::family("groq");
        assert_eq!(provider.name(), "groq");
        assert_eq!(
            provider.invoke("groq-l80", "hello").await.unwrap(),
            "[groq mock inference for groq-l80] => hello"
        );
    }

    #[tokio::test]
    async fn unknown_echo() {
        let provider = EchoProvider::unknown();
        assert_eq!(provider.name(), "unknown");
        assert_eq!(
            provider.invoke("mystery-1", "").await.unwrap(),
            "[Unknown model invocation for mystery-1] => "
        );
    }
}

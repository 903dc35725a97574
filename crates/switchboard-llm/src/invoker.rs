//! Dispatch of a chosen model to its provider family

use std::sync::Arc;
use std::time::Duration;

use switchboard_config::InvocationConfig;

use crate::error::LlmError;
use crate::provider::{EchoProvider, Provider};

/// Provider family identified by model-name prefixes
struct Family {
    name: String,
    prefixes: Vec<String>,
    provider: Arc<dyn Provider>,
}

/// Resolves model names to providers and calls them
///
/// Families are matched in declaration order; the first family with a
/// prefix of the model name wins. Each family starts out served by an
/// [`EchoProvider`] until a real backend is registered.
pub struct Invoker {
    families: Vec<Family>,
    unknown: Arc<dyn Provider>,
    timeout: Option<Duration>,
}

impl Invoker {
    /// Build from configuration with every family echoing
    pub fn new(config: &InvocationConfig) -> Result<Self, LlmError> {
        let timeout = config
            .timeout
            .as_deref()
            .map(|raw| {
                duration_str::parse(raw)
                    .map_err(|e| LlmError::Internal(anyhow::anyhow!("invalid invocation timeout '{raw}': {e}")))
            })
            .transpose()?;

        let families = config
            .families
            .iter()
            .map(|(name, family)| Family {
                name: name.clone(),
                prefixes: family.prefixes.clone(),
                provider: Arc::new(EchoProvider::family(name.as_str())),
            })
            .collect();

        Ok(Self {
            families,
            unknown: Arc::new(EchoProvider::unknown()),
            timeout,
        })
    }

    /// Serve a configured family with a real provider
    pub fn register(&mut self, family: &str, provider: Arc<dyn Provider>) -> Result<(), LlmError> {
        let slot = self
            .families
            .iter_mut()
            .find(|f| f.name == family)
            .ok_or_else(|| LlmError::Internal(anyhow::anyhow!("unknown provider family '{family}'")))?;

        tracing::debug!(family, provider = provider.name(), "provider registered");
        slot.provider = provider;
        Ok(())
    }

    /// Name of the family serving `model`, if any
    pub fn family_of(&self, model: &str) -> Option<&str> {
        self.resolve(model).map(|f| f.name.as_str())
    }

    /// Run `text` through `model` on its provider
    ///
    /// Every provider failure comes back as [`LlmError::Upstream`].
    pub async fn invoke(&self, model: &str, text: &str) -> Result<String, LlmError> {
        let provider = self.resolve(model).map_or(&self.unknown, |f| &f.provider);

        let call = provider.invoke(model, text);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(LlmError::Upstream(format!(
                    "{} did not answer within {}s",
                    provider.name(),
                    limit.as_secs_f64()
                )))
            }),
            None => call.await,
        };

        result.map_err(|e| {
            tracing::error!(model, provider = provider.name(), error = %e, "invocation failed");
            match e {
                LlmError::Upstream(_) => e,
                other => LlmError::Upstream(format!("{}: {other}", provider.name())),
            }
        })
    }

    fn resolve(&self, model: &str) -> Option<&Family> {
        self.families
            .iter()
            .find(|f| f.prefixes.iter().any(|p| model.starts_with(p.as_str())))
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("families", &self.families.iter().map(|f| f.name.as_str()).collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use switchboard_config::FamilyConfig;

    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl Provider for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn invoke(&self, model: &str, _text: &str) -> Result<String, LlmError> {
            Ok(format!("{} from {model}", self.0))
        }
    }

    struct Stalled;

    #[async_trait]
    impl Provider for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn invoke(&self, _model: &str, _text: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    struct Misbehaving(fn() -> LlmError);

    #[async_trait]
    impl Provider for Misbehaving {
        fn name(&self) -> &str {
            "misbehaving"
        }

        async fn invoke(&self, _model: &str, _text: &str) -> Result<String, LlmError> {
            Err((self.0)())
        }
    }

    #[tokio::test]
    async fn provider_errors_become_upstream() {
        let cases: [fn() -> LlmError; 4] = [
            || LlmError::RateLimited { retry_after: 30 },
            || LlmError::Internal(anyhow::anyhow!("connection reset")),
            || LlmError::Unauthorized,
            || LlmError::BudgetExceeded {
                projected: 2.0,
                limit: 1.0,
            },
        ];

        for make in cases {
            let mut invoker = Invoker::new(&InvocationConfig::default()).unwrap();
            invoker.register("groq", Arc::new(Misbehaving(make))).unwrap();

            let err = invoker.invoke("groq-l80", "x").await.unwrap_err();
            assert!(
                matches!(&err, LlmError::Upstream(msg) if msg.starts_with("misbehaving: ")),
                "got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn upstream_errors_pass_through_unchanged() {
        let mut invoker = Invoker::new(&InvocationConfig::default()).unwrap();
        invoker
            .register("groq", Arc::new(Misbehaving(|| LlmError::Upstream("503".to_owned()))))
            .unwrap();

        let err = invoker.invoke("groq-l80", "x").await.unwrap_err();
        assert!(matches!(err, LlmError::Upstream(msg) if msg == "503"));
    }

    #[tokio::test]
    async fn default_families_echo() {
        let invoker = Invoker::new(&InvocationConfig::default()).unwrap();

        assert_eq!(
            invoker.invoke("gpt-4", "hi").await.unwrap(),
            "[openai mock inference for gpt-4] => hi"
        );
        assert_eq!(
            invoker.invoke("text-ada-001", "hi").await.unwrap(),
            "[openai mock inference for text-ada-001] => hi"
        );
        assert_eq!(
            invoker.invoke("groq-l80", "hi").await.unwrap(),
            "[groq mock inference for groq-l80] => hi"
        );
        assert_eq!(
            invoker.invoke("claude-x", "hi").await.unwrap(),
            "[Unknown model invocation for claude-x] => hi"
        );
    }

    #[tokio::test]
    async fn registered_provider_replaces_echo() {
        let mut invoker = Invoker::new(&InvocationConfig::default()).unwrap();
        invoker.register("groq", Arc::new(Fixed("real"))).unwrap();

        assert_eq!(invoker.invoke("groq-l120", "hi").await.unwrap(), "real from groq-l120");
        assert!(invoker.invoke("gpt-4", "hi").await.unwrap().starts_with("[openai mock"));
    }

    #[test]
    fn registering_unknown_family_fails() {
        let mut invoker = Invoker::new(&InvocationConfig::default()).unwrap();
        assert!(matches!(
            invoker.register("anthropic", Arc::new(Fixed("x"))),
            Err(LlmError::Internal(_))
        ));
    }

    #[test]
    fn first_declared_family_wins() {
        let mut config = InvocationConfig::default();
        config.families.insert(
            "turbo".to_owned(),
            FamilyConfig {
                prefixes: vec!["gpt-3.5".to_owned()],
            },
        );
        let invoker = Invoker::new(&config).unwrap();

        assert_eq!(invoker.family_of("gpt-3.5-turbo"), Some("openai"));
        assert_eq!(invoker.family_of("groq-l80"), Some("groq"));
        assert_eq!(invoker.family_of("llama"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_surfaces_as_upstream() {
        let config = InvocationConfig {
            timeout: Some("5s".to_owned()),
            ..InvocationConfig::default()
        };
        let mut invoker = Invoker::new(&config).unwrap();
        invoker.register("openai", Arc::new(Stalled)).unwrap();

        let err = invoker.invoke("gpt-4", "hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Upstream(msg) if msg.contains("stalled")));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let config = InvocationConfig {
            timeout: Some("soon".to_owned()),
            ..InvocationConfig::default()
        };
        assert!(matches!(Invoker::new(&config), Err(LlmError::Internal(_))));
    }
}

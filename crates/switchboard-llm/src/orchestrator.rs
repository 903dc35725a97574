//! Per-request routing protocol

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use switchboard_billing::UsageMonitor;
use switchboard_config::Config;
use switchboard_ratelimit::RequestLimiter;
use switchboard_routing::{ModelRegistry, ScoredModel, WeightStore, Weights, rank, select};

use crate::error::LlmError;
use crate::invoker::Invoker;

/// Result of a routed request
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Model that actually served the request
    pub chosen_model: String,
    /// Provider reply
    pub reply: String,
    /// Ledger total after this request was charged
    pub current_usage: f64,
    /// Whether the budget forced a substitution
    pub fallback_used: bool,
    /// Other registry models, best first
    pub alternatives: Vec<String>,
}

/// Substitute served when the selected model does not fit the budget
#[derive(Debug, Clone)]
struct Fallback {
    model: String,
    cost: f64,
}

/// Owns every piece of shared routing state
///
/// Share it as `Arc<Orchestrator>`; all methods take `&self`.
#[derive(Debug)]
pub struct Orchestrator {
    weights: WeightStore,
    registry: ModelRegistry,
    limiter: RequestLimiter,
    usage: UsageMonitor,
    invoker: Invoker,
    fallback: Option<Fallback>,
    weights_api_key: Option<SecretString>,
}

impl Orchestrator {
    /// Build from configuration with echo providers for every family
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let invoker = Invoker::new(&config.invocation)?;
        Self::with_invoker(config, invoker)
    }

    /// Build from configuration around a prepared invoker
    pub fn with_invoker(config: &Config, invoker: Invoker) -> Result<Self, LlmError> {
        let registry = ModelRegistry::from_config(&config.routing);
        if registry.is_empty() {
            tracing::warn!("model registry is empty, every request will fail");
        }

        let fallback = config.budget.fallback().map(|model| Fallback {
            model: model.to_owned(),
            cost: config.budget.fallback_cost,
        });

        tracing::info!(
            models = registry.len(),
            requests = config.rate_limit.requests,
            window = %config.rate_limit.window,
            budget = config.budget.limit,
            fallback = fallback.as_ref().map(|f| f.model.as_str()),
            "orchestrator ready"
        );

        Ok(Self {
            weights: WeightStore::new(config.routing.weights.into()),
            registry,
            limiter: RequestLimiter::new(&config.rate_limit)?,
            usage: UsageMonitor::new(&config.budget),
            invoker,
            fallback,
            weights_api_key: config.auth.weights_api_key.clone(),
        })
    }

    /// Route one request end to end
    ///
    /// Admission, selection and the budget gate run before any provider
    /// call. The budget is charged only after the provider answers.
    pub async fn predict(&self, text: &str) -> Result<Prediction, LlmError> {
        self.limiter.check()?;

        let weights = self.weights.get();
        let primary = select(&weights, &self.registry, text)?;

        let (chosen, cost, fallback_used) = match self.usage.check_budget(primary.model.cost) {
            Ok(()) => (primary.model.name.as_str(), primary.model.cost, false),
            Err(err) => {
                let Some(fallback) = self.fallback.as_ref().filter(|f| f.model != primary.model.name) else {
                    return Err(err.into());
                };
                self.usage.check_budget(fallback.cost)?;

                tracing::warn!(
                    selected = %primary.model.name,
                    selected_cost = primary.model.cost,
                    fallback = %fallback.model,
                    fallback_cost = fallback.cost,
                    "selected model over budget, using fallback"
                );
                (fallback.model.as_str(), fallback.cost, true)
            }
        };

        let reply = self.invoker.invoke(chosen, text).await?;
        let current_usage = self.usage.record(cost);

        tracing::info!(
            model = chosen,
            score = primary.score,
            cost,
            current_usage,
            fallback_used,
            "request routed"
        );

        let alternatives = rank(&weights, &self.registry, text)
            .into_iter()
            .map(|s| s.model.name.as_str())
            .filter(|name| *name != chosen)
            .map(str::to_owned)
            .collect();

        Ok(Prediction {
            chosen_model: chosen.to_owned(),
            reply,
            current_usage,
            fallback_used,
            alternatives,
        })
    }

    /// Every model scored against `text` under the current weights, best
    /// first
    ///
    /// Does not touch the rate limiter or the ledger.
    pub fn rank(&self, text: &str) -> Vec<ScoredModel<'_>> {
        rank(&self.weights.get(), &self.registry, text)
    }

    /// Current weight vector
    pub fn weights(&self) -> Weights {
        self.weights.get()
    }

    /// Replace the weight vector if `credential` matches the configured key
    pub fn update_weights(&self, weights: Weights, credential: &str) -> Result<Weights, LlmError> {
        let Some(expected) = &self.weights_api_key else {
            tracing::warn!("weight update refused: no weights API key configured");
            return Err(LlmError::Unauthorized);
        };

        if credential != expected.expose_secret() {
            tracing::warn!("weight update refused: invalid credential");
            return Err(LlmError::Unauthorized);
        }

        let previous = self.weights.set(weights);
        tracing::info!(?previous, current = ?weights, "weights updated");

        Ok(weights)
    }

    pub const fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub const fn usage(&self) -> &UsageMonitor {
        &self.usage
    }
}

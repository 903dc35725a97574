//! Programmatic configuration builder for integration tests

use secrecy::SecretString;
use switchboard_config::{Config, ModelProfileConfig, WeightsConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the reference deployment
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the registry with an empty one
    pub fn without_models(mut self) -> Self {
        self.config.routing.models.clear();
        self
    }

    /// Append a fully specified model
    pub fn with_model(mut self, name: &str, acc: f64, lat: f64, cost: f64, load: f64, conf: f64) -> Self {
        self.config
            .routing
            .models
            .push(ModelProfileConfig::complete(name, acc, lat, cost, load, conf));
        self
    }

    /// Set all six scoring coefficients to the same value
    pub fn with_uniform_weights(mut self, value: f64) -> Self {
        self.config.routing.weights = WeightsConfig {
            alpha1: value,
            alpha2: value,
            alpha3: value,
            alpha4: value,
            alpha5: value,
            alpha6: value,
        };
        self
    }

    pub fn with_rate_limit(mut self, requests: u32, window: &str) -> Self {
        self.config.rate_limit.requests = requests;
        window.clone_into(&mut self.config.rate_limit.window);
        self
    }

    pub fn with_budget(mut self, limit: f64) -> Self {
        self.config.budget.limit = limit;
        self
    }

    pub fn with_fallback(mut self, model: &str, cost: f64) -> Self {
        model.clone_into(&mut self.config.budget.fallback_model);
        self.config.budget.fallback_cost = cost;
        self
    }

    pub fn without_fallback(mut self) -> Self {
        self.config.budget.fallback_model.clear();
        self
    }

    pub fn with_weights_key(mut self, key: &str) -> Self {
        self.config.auth.weights_api_key = Some(SecretString::from(key));
        self
    }

    pub fn with_invocation_timeout(mut self, timeout: &str) -> Self {
        self.config.invocation.timeout = Some(timeout.to_owned());
        self
    }

    /// Build the final config, failing on anything `Config::load` would reject
    pub fn build(self) -> Config {
        self.config.validate().expect("test config should validate");
        self.config
    }

    /// Build without validation
    pub fn build_unchecked(self) -> Config {
        self.config
    }
}

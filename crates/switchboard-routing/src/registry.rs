//! Candidate models with fixed scoring attributes
//!
//! Profiles come from configuration and may omit attributes. Missing
//! values are filled from the default policy once, at load time, so
//! scoring only ever sees complete descriptors.

use serde::Serialize;
use switchboard_config::{AttributeDefaults, ModelProfileConfig, RoutingConfig};

/// Static metadata for one candidate backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    /// Model identifier
    pub name: String,
    /// Accuracy estimate (0.0 to 1.0)
    pub acc: f64,
    /// Latency estimate
    pub lat: f64,
    /// Cost charged per call
    pub cost: f64,
    /// Current load estimate
    pub load: f64,
    /// Confidence estimate (0.0 to 1.0)
    pub conf: f64,
}

impl ModelDescriptor {
    pub fn new(name: &str, acc: f64, lat: f64, cost: f64, load: f64, conf: f64) -> Self {
        Self {
            name: name.to_owned(),
            acc,
            lat,
            cost,
            load,
            conf,
        }
    }

    /// Fill the gaps in a configured profile from the default policy
    pub fn from_profile(profile: &ModelProfileConfig, defaults: &AttributeDefaults) -> Self {
        Self {
            name: profile.name.trim().to_owned(),
            acc: profile.acc.unwrap_or(defaults.acc),
            lat: profile.lat.unwrap_or(defaults.lat),
            cost: profile.cost.unwrap_or(defaults.cost),
            load: profile.load.unwrap_or(defaults.load),
            conf: profile.conf.unwrap_or(defaults.conf),
        }
    }
}

/// Ordered, read-only list of candidates
///
/// Order matters: it is the scan order for selection and therefore the
/// tie-break order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub const fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Build a registry from configuration
    pub fn from_config(config: &RoutingConfig) -> Self {
        let models = config
            .models
            .iter()
            .map(|p| ModelDescriptor::from_profile(p, &config.defaults))
            .collect();

        Self { models }
    }

    /// All candidates in registry order
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Find a candidate by name
    pub fn find(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

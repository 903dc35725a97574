use serde::Deserialize;

/// Model registry and scoring weights
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Initial weight vector
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Values used for attributes a model profile leaves out
    #[serde(default)]
    pub defaults: AttributeDefaults,
    /// Candidate models in scan order
    #[serde(default = "builtin_models")]
    pub models: Vec<ModelProfileConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            defaults: AttributeDefaults::default(),
            models: builtin_models(),
        }
    }
}

/// The six scoring coefficients
///
/// No range checks: operators may use any sign or magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightsConfig {
    /// Accuracy reward
    pub alpha1: f64,
    /// Latency penalty
    pub alpha2: f64,
    /// Cost penalty
    pub alpha3: f64,
    /// Load penalty
    pub alpha4: f64,
    /// Input complexity term
    pub alpha5: f64,
    /// Confidence reward
    pub alpha6: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            alpha1: 2.0,
            alpha2: 1.0,
            alpha3: 1.5,
            alpha4: 0.5,
            alpha5: 1.0,
            alpha6: 1.2,
        }
    }
}

/// Default policy for missing descriptor attributes
///
/// The stock values bias scoring against incomplete profiles: no accuracy
/// or confidence credit, full latency, cost, and load penalties.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeDefaults {
    pub acc: f64,
    pub lat: f64,
    pub cost: f64,
    pub load: f64,
    pub conf: f64,
}

impl Default for AttributeDefaults {
    fn default() -> Self {
        Self {
            acc: 0.0,
            lat: 1.0,
            cost: 1.0,
            load: 1.0,
            conf: 0.0,
        }
    }
}

/// One candidate model as written in configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelProfileConfig {
    /// Model identifier, also used to pick the provider family
    pub name: String,
    /// Accuracy estimate in `[0, 1]`
    #[serde(default)]
    pub acc: Option<f64>,
    /// Latency estimate, non-negative
    #[serde(default)]
    pub lat: Option<f64>,
    /// Cost per call, non-negative
    #[serde(default)]
    pub cost: Option<f64>,
    /// Current load estimate, non-negative
    #[serde(default)]
    pub load: Option<f64>,
    /// Confidence estimate in `[0, 1]`
    #[serde(default)]
    pub conf: Option<f64>,
}

impl ModelProfileConfig {
    /// Profile with every attribute present
    pub fn complete(name: &str, acc: f64, lat: f64, cost: f64, load: f64, conf: f64) -> Self {
        Self {
            name: name.to_owned(),
            acc: Some(acc),
            lat: Some(lat),
            cost: Some(cost),
            load: Some(load),
            conf: Some(conf),
        }
    }
}

/// Reference registry used when no models are configured
pub fn builtin_models() -> Vec<ModelProfileConfig> {
    vec![
        ModelProfileConfig::complete("text-davinci-003", 0.88, 0.25, 0.15, 0.40, 0.85),
        ModelProfileConfig::complete("text-curie-001", 0.80, 0.15, 0.10, 0.30, 0.75),
        ModelProfileConfig::complete("text-babbage-001", 0.72, 0.10, 0.08, 0.35, 0.70),
        ModelProfileConfig::complete("text-ada-001", 0.65, 0.05, 0.05, 0.20, 0.60),
        ModelProfileConfig::complete("gpt-3.5-turbo", 0.85, 0.20, 0.10, 0.50, 0.80),
        ModelProfileConfig::complete("gpt-4", 0.90, 0.35, 0.25, 0.40, 0.95),
        ModelProfileConfig::complete("groq-l80", 0.70, 0.04, 0.03, 0.15, 0.65),
        ModelProfileConfig::complete("groq-l120", 0.78, 0.07, 0.05, 0.25, 0.72),
    ]
}

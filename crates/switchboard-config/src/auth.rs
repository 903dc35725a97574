use secrecy::SecretString;
use serde::Deserialize;

/// Weight-update authentication
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Key callers must present to replace the weight vector.
    /// When unset, weight updates are refused.
    #[serde(default)]
    pub weights_api_key: Option<SecretString>,
}

use std::collections::HashSet;
use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus the file read
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(
            models = config.routing.models.len(),
            rate_limit = config.rate_limit.requests,
            budget = config.budget.limit,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Weights are deliberately left unchecked; any real coefficients are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated constraint
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_registry()?;
        self.validate_rate_limit()?;
        self.validate_budget()?;
        self.validate_invocation()?;
        Ok(())
    }

    /// The registry must be usable before the first request arrives
    fn validate_registry(&self) -> anyhow::Result<()> {
        let routing = &self.routing;

        if routing.models.is_empty() {
            anyhow::bail!("routing.models must list at least one model");
        }

        let defaults = &routing.defaults;
        check_unit("routing.defaults.acc", defaults.acc)?;
        check_non_negative("routing.defaults.lat", defaults.lat)?;
        check_non_negative("routing.defaults.cost", defaults.cost)?;
        check_non_negative("routing.defaults.load", defaults.load)?;
        check_unit("routing.defaults.conf", defaults.conf)?;

        let mut seen = HashSet::new();
        for model in &routing.models {
            let name = model.name.trim();
            if name.is_empty() {
                anyhow::bail!("routing.models entries must have a non-empty name");
            }
            if !seen.insert(name) {
                anyhow::bail!("duplicate model name in routing.models: '{name}'");
            }

            if let Some(acc) = model.acc {
                check_unit(&format!("model '{name}' acc"), acc)?;
            }
            if let Some(lat) = model.lat {
                check_non_negative(&format!("model '{name}' lat"), lat)?;
            }
            if let Some(cost) = model.cost {
                check_non_negative(&format!("model '{name}' cost"), cost)?;
            }
            if let Some(load) = model.load {
                check_non_negative(&format!("model '{name}' load"), load)?;
            }
            if let Some(conf) = model.conf {
                check_unit(&format!("model '{name}' conf"), conf)?;
            }
        }

        Ok(())
    }

    fn validate_rate_limit(&self) -> anyhow::Result<()> {
        if self.rate_limit.requests == 0 {
            anyhow::bail!("rate_limit.requests must be greater than 0");
        }

        let window = parse_duration("rate_limit.window", &self.rate_limit.window)?;
        if window.is_zero() {
            anyhow::bail!("rate_limit.window must be greater than 0");
        }

        Ok(())
    }

    fn validate_budget(&self) -> anyhow::Result<()> {
        check_non_negative("budget.limit", self.budget.limit)?;

        if self.budget.fallback().is_some() {
            check_non_negative("budget.fallback_cost", self.budget.fallback_cost)?;
        }

        Ok(())
    }

    fn validate_invocation(&self) -> anyhow::Result<()> {
        if let Some(ref timeout) = self.invocation.timeout {
            parse_duration("invocation.timeout", timeout)?;
        }

        for (family, config) in &self.invocation.families {
            if config.prefixes.iter().any(|p| p.is_empty()) {
                anyhow::bail!("invocation.families.{family} contains an empty prefix");
            }
        }

        Ok(())
    }
}

fn parse_duration(field: &str, value: &str) -> anyhow::Result<std::time::Duration> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid duration for {field} '{value}': {e}"))
}

fn check_non_negative(field: &str, value: f64) -> anyhow::Result<()> {
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{field} must be a finite non-negative number, got {value}");
    }
    Ok(())
}

fn check_unit(field: &str, value: f64) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{field} must be within [0, 1], got {value}");
    }
    Ok(())
}

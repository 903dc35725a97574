use serde::Deserialize;

/// Spend ceiling and fallback substitution
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetConfig {
    /// Maximum cumulative cost per period
    #[serde(default = "default_limit")]
    pub limit: f64,
    /// When the ledger starts over
    #[serde(default)]
    pub period: BudgetPeriod,
    /// Model substituted when the selected one does not fit the budget.
    /// An empty string disables the fallback.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,
    /// Nominal cost charged for a fallback invocation
    #[serde(default = "default_fallback_cost")]
    pub fallback_cost: f64,
}

impl BudgetConfig {
    /// The configured fallback model, if any
    pub fn fallback(&self) -> Option<&str> {
        let name = self.fallback_model.trim();
        (!name.is_empty()).then_some(name)
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            period: BudgetPeriod::default(),
            fallback_model: default_fallback_model(),
            fallback_cost: default_fallback_cost(),
        }
    }
}

/// Ledger reset policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    /// Never reset; spend accumulates for the life of the process
    #[default]
    Lifetime,
    /// Reset at the start of each calendar month (UTC)
    Monthly,
}

const fn default_limit() -> f64 {
    5.0
}

fn default_fallback_model() -> String {
    "text-ada-001".to_owned()
}

const fn default_fallback_cost() -> f64 {
    0.05
}

use indexmap::IndexMap;
use serde::Deserialize;

/// How selected models are dispatched to providers
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvocationConfig {
    /// Upper bound on a single provider call (e.g. "30s")
    #[serde(default)]
    pub timeout: Option<String>,
    /// Provider families keyed by name, matched in declaration order
    #[serde(default = "default_families")]
    pub families: IndexMap<String, FamilyConfig>,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            families: default_families(),
        }
    }
}

/// Model-name prefixes that identify one provider family
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyConfig {
    pub prefixes: Vec<String>,
}

fn default_families() -> IndexMap<String, FamilyConfig> {
    let mut families = IndexMap::new();
    families.insert(
        "openai".to_owned(),
        FamilyConfig {
            prefixes: vec!["gpt-".to_owned(), "text-".to_owned()],
        },
    );
    families.insert(
        "groq".to_owned(),
        FamilyConfig {
            prefixes: vec!["groq-".to_owned()],
        },
    );
    families
}

use std::sync::LazyLock;

use regex::Regex;

/// `{{ env.NAME }}` with an optional `| default("value")` tail
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
        .expect("placeholder pattern must compile")
});

/// Substitute environment placeholders in raw config text
///
/// Runs before TOML parsing so secrets can stay out of the file.
/// Comment lines are copied as-is, which lets a file document a
/// placeholder without requiring the variable to exist.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for captures in PLACEHOLDER.captures_iter(line) {
            let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            output.push_str(&line[cursor..whole.start()]);
            output.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
            cursor = whole.end();
        }
        output.push_str(&line[cursor..]);
    }

    Ok(output)
}

fn resolve(key: &str, default: Option<&str>) -> anyhow::Result<String> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        anyhow::bail!("unsupported placeholder `{key}`, only `env.NAME` is recognised");
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable `{name}` is not set"),
    }
}

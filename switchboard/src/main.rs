mod args;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use args::{Args, Command, DEFAULT_CONFIG};
use clap::Parser;
use serde_json::json;
use switchboard_config::Config;
use switchboard_core::HttpError;
use switchboard_llm::{LlmError, Orchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let (config, source) = load_config(args.config.as_deref())?;

    switchboard_telemetry::init(&config.telemetry, args.log_filter.as_deref())?;
    tracing::debug!(config = %source, "configuration loaded");

    let orchestrator = Orchestrator::from_config(&config)?;

    let output = match args.command {
        Command::Predict { text } => {
            let text = prompt(text)?;
            match orchestrator.predict(&text).await {
                Ok(prediction) => serde_json::to_value(prediction)?,
                Err(e) => {
                    println!("{}", serde_json::to_string_pretty(&error_body(&e))?);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Rank { text } => {
            let text = prompt(text)?;
            let ranked: Vec<_> = orchestrator
                .rank(&text)
                .iter()
                .map(|s| json!({ "model": s.model.name, "score": s.score }))
                .collect();
            json!(ranked)
        }
        Command::Weights => serde_json::to_value(orchestrator.weights())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(ExitCode::SUCCESS)
}

/// Load the given file, or the default file if it exists, or built-in
/// defaults, along with a description of where the config came from
fn load_config(path: Option<&Path>) -> anyhow::Result<(Config, String)> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => return Ok((Config::default(), "built-in defaults".to_owned())),
    };

    Ok((Config::load(path)?, path.display().to_string()))
}

fn prompt(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Error envelope in the shape a transport layer would return
fn error_body(err: &LlmError) -> serde_json::Value {
    let mut body = json!({
        "error": {
            "type": err.error_type(),
            "status": err.status_code().as_u16(),
            "message": err.client_message(),
        }
    });
    if let Some(retry_after) = err.retry_after() {
        body["error"]["retry_after"] = json!(retry_after);
    }
    body
}

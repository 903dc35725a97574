use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default configuration file, used only if present
pub const DEFAULT_CONFIG: &str = "switchboard.toml";

/// Switchboard LLM request router
#[derive(Debug, Parser)]
#[command(name = "switchboard", about = "Route prompts to the best-scoring model within a budget")]
pub struct Args {
    /// Path to configuration file [default: switchboard.toml]
    #[arg(short, long, env = "SWITCHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured log filter
    #[arg(long, env = "SWITCHBOARD_LOG")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Route a prompt and print the prediction
    Predict {
        /// Prompt text; read from stdin when omitted
        text: Option<String>,
    },
    /// Score every model for a prompt without invoking anything
    Rank {
        /// Prompt text; read from stdin when omitted
        text: Option<String>,
    },
    /// Print the active weight vector
    Weights,
}

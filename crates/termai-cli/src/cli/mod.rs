//! CLI command definitions for the `termai` binary.
//!
//! Uses clap derive macros for argument parsing. With no subcommand the
//! binary starts the chat session.

pub mod agent;
pub mod chat;
pub mod check;
pub mod config;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use termai_types::config::{ConfigFile, ProviderKind};

/// Chat with a hosted LLM from your terminal.
#[derive(Parser)]
#[command(name = "termai", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text (config, check).
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub agent: AgentArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command-line overrides for `config.toml`.
#[derive(Args, Debug, Default, Clone)]
pub struct AgentArgs {
    /// Model identifier (e.g., gemini-2.5-flash).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Provider preset: gemini or openai.
    #[arg(long, global = true)]
    pub provider: Option<ProviderKind>,

    /// Custom OpenAI-compatible base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// System instructions sent with every request.
    #[arg(long, global = true, value_name = "TEXT")]
    pub instructions: Option<String>,

    /// Sampling temperature.
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// Maximum tokens per answer.
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,
}

impl AgentArgs {
    /// The overrides as a sparse config layer.
    pub fn overrides(&self) -> ConfigFile {
        ConfigFile {
            model: self.model.clone(),
            provider: self.provider,
            base_url: self.base_url.clone(),
            instructions: self.instructions.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default).
    Chat,

    /// Show the resolved configuration.
    Config,

    /// Send one small request to verify the API key and endpoint.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

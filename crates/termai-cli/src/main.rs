//! Terminal AI entry point.
//!
//! Binary name: `termai`
//!
//! Parses CLI arguments, sets up logging, loads `.env`, resolves the agent
//! configuration, then dispatches to the chat session or a utility command.

mod cli;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use termai_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or config
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "termai", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    termai_infra::secret::env::load_env_file(None);
    let agent = cli::agent::resolve_agent(&cli.agent).await;

    let result = match cli.command {
        None | Some(Commands::Chat) => cli::chat::loop_runner::run_chat(agent).await,
        Some(Commands::Config) => cli::config::show_config(&agent, cli.json).await,
        Some(Commands::Check) => cli::check::check(agent, cli.json).await,
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

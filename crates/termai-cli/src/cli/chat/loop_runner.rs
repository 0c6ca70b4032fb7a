//! Chat session wiring: provider, console, session loop.

use std::io::IsTerminal;

use anyhow::Result;
use tracing::debug;

use termai_core::chat::session_loop::SessionLoop;
use termai_infra::llm::create_provider;

use crate::cli::agent::ResolvedAgent;

use super::piped::PipedConsole;
use super::renderer::TerminalConsole;

/// Run the chat until exit, quit, or end of input.
///
/// A terminal on stdin gets the line editor. Anything else (a pipe, a file)
/// is read line by line without touching the terminal.
pub async fn run_chat(agent: ResolvedAgent) -> Result<()> {
    let ResolvedAgent {
        config, api_key, ..
    } = agent;
    let mut session = SessionLoop::new(create_provider(&config, api_key), config);

    if std::io::stdin().is_terminal() {
        let mut console = TerminalConsole::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
        session.run(&mut console).await;
        // Restores the terminal from raw mode.
        drop(console);
    } else {
        debug!("stdin is not a terminal, reading piped input");
        session.run(&mut PipedConsole::stdio()).await;
    }
    Ok(())
}

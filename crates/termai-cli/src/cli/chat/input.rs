//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C) signals.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use termai_core::chat::console::InputEvent;

/// Styled `You: ` prompt.
pub fn prompt() -> String {
    format!("{}", style("You: ").cyan().bold())
}

/// Async input handler wrapping rustyline_async.
///
/// The terminal stays in raw mode for the lifetime of this value, so all
/// output must go through the paired `SharedWriter`.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Read a line of input.
    ///
    /// The line is returned as typed. Non-blank lines go into the in-memory
    /// history. A terminal error ends input like Ctrl+D does.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    let _ = self.rl.add_history_entry(line.clone());
                }
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!(error = %e, "Readline failed, treating as end of input");
                InputEvent::Eof
            }
        }
    }

    /// Write out everything queued on the `SharedWriter`.
    pub fn flush(&mut self) {
        if let Err(e) = self.rl.flush() {
            tracing::debug!(error = %e, "Failed to flush terminal output");
        }
    }
}

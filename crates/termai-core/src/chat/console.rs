//! Terminal-facing ports of the chat loop.
//!
//! The CLI implements both traits on one value so that rendering can flush
//! through the line editor that owns the terminal.

use std::future::Future;

use termai_types::config::AgentConfig;
use termai_types::turn::{Turn, TurnError};

/// Outcome of acquiring one line from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line (may be empty).
    Message(String),
    /// End of input (Ctrl+D or closed stdin).
    Eof,
    /// Interrupt raised while editing (Ctrl+C).
    Interrupted,
}

/// Source of user input lines.
pub trait LineSource {
    /// Wait for the next line. Must stay usable after `Interrupted`.
    fn read_line(&mut self) -> impl Future<Output = InputEvent>;
}

/// Append-only output surface for the chat loop.
///
/// Calls arrive strictly in order from the single loop task.
pub trait ChatSurface {
    /// Startup panel, written once.
    fn welcome(&mut self, config: &AgentConfig);

    /// Parting message before the loop exits.
    fn farewell(&mut self);

    /// Notice shown after an interrupt during input.
    fn interrupted(&mut self);

    /// Response header and working indicator, before any fragment.
    fn response_started(&mut self, model: &str);

    /// One text fragment, appended after the previous ones.
    fn fragment(&mut self, text: &str);

    /// Trailing newline and elapsed-time status line.
    fn response_finished(&mut self, turn: &Turn);

    /// One-line error report for a failed turn.
    fn turn_failed(&mut self, error: &TurnError);
}

//! Non-interactive chat console for when stdin is not a terminal.
//!
//! Lines come from any async buffered reader (stdin in practice); the line
//! editor is never created, so no raw mode and no `/dev/tty`. Output goes
//! straight to the writer. There is no thinking indicator.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use termai_core::chat::console::{ChatSurface, InputEvent, LineSource};
use termai_types::config::AgentConfig;
use termai_types::turn::{Turn, TurnError};

use super::banner::{response_header, welcome_panel};
use super::renderer::{error_line, farewell_line, interrupt_notice, status_line};

pub struct PipedConsole<R, W> {
    lines: Lines<R>,
    out: W,
}

impl PipedConsole<BufReader<Stdin>, std::io::Stdout> {
    /// Read from stdin, write to stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout())
    }
}

impl<R, W> PipedConsole<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to write chat output");
        }
    }

    fn write_line(&mut self, text: &str) {
        self.write(&format!("{text}\n"));
    }
}

impl<R, W> LineSource for PipedConsole<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn read_line(&mut self) -> InputEvent {
        match self.lines.next_line().await {
            Ok(Some(line)) => InputEvent::Message(line),
            Ok(None) => InputEvent::Eof,
            Err(e) => {
                tracing::debug!(error = %e, "Reading input failed, treating as end of input");
                InputEvent::Eof
            }
        }
    }
}

impl<R, W> ChatSurface for PipedConsole<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    fn welcome(&mut self, _config: &AgentConfig) {
        self.write_line(&welcome_panel());
    }

    fn farewell(&mut self) {
        self.write_line(&farewell_line());
    }

    fn interrupted(&mut self) {
        self.write_line(&interrupt_notice());
    }

    fn response_started(&mut self, model: &str) {
        self.write_line(&response_header(model));
    }

    fn fragment(&mut self, text: &str) {
        self.write(&format!("{}", console::style(text).yellow()));
    }

    fn response_finished(&mut self, turn: &Turn) {
        self.write_line(&format!("\n{}", status_line(turn.elapsed)));
    }

    fn turn_failed(&mut self, error: &TurnError) {
        self.write_line(&format!("\n{}", error_line(error)));
    }
}

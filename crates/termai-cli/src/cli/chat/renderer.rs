//! Terminal rendering for the chat loop.
//!
//! `TerminalConsole` owns the line editor and its `SharedWriter`, so every
//! write lands above the prompt instead of corrupting it. Fragments are
//! written raw as they arrive and never re-rendered.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rustyline_async::{ReadlineError, SharedWriter};

use termai_core::chat::console::{ChatSurface, InputEvent, LineSource};
use termai_types::config::AgentConfig;
use termai_types::turn::{Turn, TurnError};

use super::banner::{response_header, welcome_panel};
use super::input::{ChatInput, prompt};

/// `Response generated in N.NN seconds`.
pub fn status_line(elapsed: Duration) -> String {
    format!(
        "{}",
        style(format!(
            "Response generated in {:.2} seconds",
            elapsed.as_secs_f64()
        ))
        .blue()
        .dim()
    )
}

pub fn error_line(error: &TurnError) -> String {
    format!("{}", style(format!("Error: {error}")).red())
}

pub fn farewell_line() -> String {
    format!("{}", style("Goodbye!").yellow().italic())
}

pub fn interrupt_notice() -> String {
    format!(
        "{}",
        style("Press 'exit' to quit or continue your query...")
            .yellow()
            .italic()
    )
}

/// `Thinking...` indicator, drawn once and cleared on the first fragment.
///
/// Never steady-ticked: every draw happens on the loop task, between writes
/// to the line editor.
fn thinking_spinner(target: ProgressDrawTarget) -> ProgressBar {
    let spinner = ProgressBar::with_draw_target(None, target);
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(format!("{}", style("Thinking...").green().bold()));
    spinner.tick();
    spinner
}

/// Line editor plus styled output, as one [`LineSource`] + [`ChatSurface`].
pub struct TerminalConsole {
    input: ChatInput,
    out: SharedWriter,
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    /// Put the terminal into line-editing mode with the `You: ` prompt.
    pub fn new() -> Result<Self, ReadlineError> {
        let (input, out) = ChatInput::new(prompt())?;
        Ok(Self {
            input,
            out,
            spinner: None,
        })
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::debug!(error = %e, "Failed to write chat output");
        }
        self.input.flush();
    }

    fn write_line(&mut self, text: &str) {
        self.write(&format!("{text}\n"));
    }
}

impl LineSource for TerminalConsole {
    async fn read_line(&mut self) -> InputEvent {
        self.input.read_line().await
    }
}

impl ChatSurface for TerminalConsole {
    fn welcome(&mut self, _config: &AgentConfig) {
        self.write_line(&welcome_panel());
    }

    fn farewell(&mut self) {
        self.write_line(&farewell_line());
    }

    fn interrupted(&mut self) {
        self.write_line(&format!("\n{}", interrupt_notice()));
    }

    fn response_started(&mut self, model: &str) {
        self.write_line(&response_header(model));
        self.spinner = Some(thinking_spinner(ProgressDrawTarget::stderr()));
    }

    fn fragment(&mut self, text: &str) {
        self.stop_spinner();
        self.write(&format!("{}", style(text).yellow()));
    }

    fn response_finished(&mut self, turn: &Turn) {
        self.stop_spinner();
        self.write_line(&format!("\n{}", status_line(turn.elapsed)));
    }

    fn turn_failed(&mut self, error: &TurnError) {
        self.stop_spinner();
        self.write_line(&format!("\n{}", error_line(error)));
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::InMemoryTerm;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_status_line_two_decimals() {
        assert_eq!(
            plain(&status_line(Duration::from_millis(1234))),
            "Response generated in 1.23 seconds"
        );
        assert_eq!(
            plain(&status_line(Duration::ZERO)),
            "Response generated in 0.00 seconds"
        );
    }

    #[test]
    fn test_error_line_prefix() {
        let err = TurnError::Transport("connection reset".to_string());
        assert_eq!(
            plain(&error_line(&err)),
            "Error: connection failed: connection reset"
        );
    }

    #[test]
    fn test_thinking_spinner_only_redraws_when_driven() {
        let term = InMemoryTerm::new(4, 40);
        let spinner = thinking_spinner(ProgressDrawTarget::term_like(Box::new(term.clone())));
        let drawn = term.contents();
        assert!(drawn.contains("Thinking..."));

        std::thread::sleep(Duration::from_millis(250));
        assert_eq!(term.contents(), drawn);

        spinner.finish_and_clear();
        assert!(!term.contents().contains("Thinking..."));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(plain(&farewell_line()), "Goodbye!");
        assert_eq!(
            plain(&interrupt_notice()),
            "Press 'exit' to quit or continue your query..."
        );
        assert_eq!(plain(&prompt()), "You: ");
    }
}

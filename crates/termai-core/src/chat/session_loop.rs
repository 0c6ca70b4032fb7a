//! The read-stream-render cycle.
//!
//! One line at a time: read, classify, then either exit, skip, or run a
//! single streamed turn. Turn failures are reported and the loop goes back
//! to reading input; only exit words and end-of-input leave the loop.

use tracing::{debug, info};

use termai_types::config::AgentConfig;
use termai_types::turn::SessionSummary;

use crate::llm::box_provider::BoxLlmProvider;

use super::console::{ChatSurface, InputEvent, LineSource};
use super::engine::ChatEngine;

/// Words that end the session, compared case-insensitively.
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Where the loop is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    /// A line was accepted and its turn has not run yet.
    Streaming { input: String },
    /// Terminal.
    Exiting,
}

/// What to do with one submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Exit,
    Skip,
    Submit(String),
}

/// Classify a submitted line.
///
/// Only a line that is exactly an exit word (any case) exits; `" exit"` is
/// an ordinary prompt. Whitespace-only lines are skipped. The submitted
/// text is passed through as typed.
pub fn classify_input(line: &str) -> InputAction {
    if line.trim().is_empty() {
        InputAction::Skip
    } else if EXIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
        InputAction::Exit
    } else {
        InputAction::Submit(line.to_string())
    }
}

pub struct SessionLoop {
    engine: ChatEngine,
    config: AgentConfig,
    state: LoopState,
    summary: SessionSummary,
}

impl SessionLoop {
    pub fn new(provider: BoxLlmProvider, config: AgentConfig) -> Self {
        Self {
            engine: ChatEngine::new(provider),
            config,
            state: LoopState::AwaitingInput,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Advance the state machine by one transition.
    pub async fn step<C>(&mut self, console: &mut C) -> &LoopState
    where
        C: LineSource + ChatSurface,
    {
        let state = std::mem::replace(&mut self.state, LoopState::Exiting);

        self.state = match state {
            LoopState::AwaitingInput => match console.read_line().await {
                InputEvent::Message(line) => match classify_input(&line) {
                    InputAction::Exit => {
                        console.farewell();
                        LoopState::Exiting
                    }
                    InputAction::Skip => LoopState::AwaitingInput,
                    InputAction::Submit(input) => LoopState::Streaming { input },
                },
                InputEvent::Interrupted => {
                    self.summary.interrupts += 1;
                    console.interrupted();
                    LoopState::AwaitingInput
                }
                InputEvent::Eof => {
                    debug!("End of input");
                    console.farewell();
                    LoopState::Exiting
                }
            },
            LoopState::Streaming { input } => {
                match self.engine.run_turn(&self.config, input, console).await {
                    Ok(turn) => {
                        console.response_finished(&turn);
                        self.summary.completed_turns += 1;
                        debug!(
                            elapsed_ms = turn.elapsed.as_millis() as u64,
                            chars = turn.response.len(),
                            "Turn completed"
                        );
                    }
                    Err(e) => {
                        console.turn_failed(&e);
                        // Already on the console; keep it below the default warn filter.
                        info!(error = %e, "Turn failed");
                        self.summary.failed_turns += 1;
                    }
                }
                LoopState::AwaitingInput
            }
            LoopState::Exiting => LoopState::Exiting,
        };

        &self.state
    }

    /// Show the welcome panel and run until the loop exits.
    pub async fn run<C>(&mut self, console: &mut C) -> SessionSummary
    where
        C: LineSource + ChatSurface,
    {
        console.welcome(&self.config);
        info!(
            agent = %self.config.name,
            model = %self.config.model,
            provider = %self.engine.provider().name(),
            "Chat session started"
        );

        while *self.step(console).await != LoopState::Exiting {}

        info!(
            completed = self.summary.completed_turns,
            failed = self.summary.failed_turns,
            interrupts = self.summary.interrupts,
            "Chat session ended"
        );
        self.summary
    }
}

//! Test doubles for the chat loop: a scripted provider and a scripted console.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use termai_types::config::AgentConfig;
use termai_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, StreamEvent, Usage,
};
use termai_types::turn::{Turn, TurnError};

use crate::llm::provider::{EventStream, LlmProvider};

use super::console::{ChatSurface, InputEvent, LineSource};

/// One scripted stream item.
pub enum Step {
    Event(StreamEvent),
    /// `LlmError` is not `Clone`, so failures are built on demand.
    Fail(fn() -> LlmError),
}

impl Step {
    pub fn text(text: &str) -> Self {
        Step::Event(StreamEvent::TextDelta {
            index: 0,
            text: text.to_string(),
        })
    }
}

#[derive(Default)]
struct ScriptState {
    scripts: VecDeque<Vec<Step>>,
    requests: Vec<CompletionRequest>,
}

/// Provider that replays one script per `stream` call, in order.
///
/// Once the scripts run out every further stream ends immediately with
/// `Done`. `complete` always answers "ready".
#[derive(Clone)]
pub struct ScriptedProvider {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Vec<Step>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                scripts: scripts.into(),
                requests: Vec::new(),
            })),
        }
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.state.lock().unwrap().requests.push(request.clone());
        Ok(CompletionResponse {
            id: "scripted-1".to_string(),
            content: "ready".to_string(),
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 5,
                output_tokens: 1,
            },
        })
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let steps = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state
                .scripts
                .pop_front()
                .unwrap_or_else(|| vec![Step::Event(StreamEvent::Done)])
        };

        Box::pin(async_stream::stream! {
            for step in steps {
                match step {
                    Step::Event(event) => yield Ok(event),
                    Step::Fail(make) => {
                        yield Err(make());
                        return;
                    }
                }
            }
        })
    }
}

/// Everything a surface was asked to render, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Welcome(String),
    Farewell,
    Interrupted,
    Header(String),
    Fragment(String),
    Finished(String),
    Failed(String),
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub log: Vec<Rendered>,
    pub headers: Vec<String>,
    pub fragments: Vec<String>,
    pub turns: Vec<Turn>,
    pub errors: Vec<String>,
}

impl ChatSurface for RecordingSurface {
    fn welcome(&mut self, config: &AgentConfig) {
        self.log.push(Rendered::Welcome(config.name.clone()));
    }

    fn farewell(&mut self) {
        self.log.push(Rendered::Farewell);
    }

    fn interrupted(&mut self) {
        self.log.push(Rendered::Interrupted);
    }

    fn response_started(&mut self, model: &str) {
        self.headers.push(model.to_string());
        self.log.push(Rendered::Header(model.to_string()));
    }

    fn fragment(&mut self, text: &str) {
        self.fragments.push(text.to_string());
        self.log.push(Rendered::Fragment(text.to_string()));
    }

    fn response_finished(&mut self, turn: &Turn) {
        self.turns.push(turn.clone());
        self.log.push(Rendered::Finished(turn.response.clone()));
    }

    fn turn_failed(&mut self, error: &TurnError) {
        self.errors.push(error.to_string());
        self.log.push(Rendered::Failed(error.to_string()));
    }
}

/// Console replaying queued input events; yields `Eof` once drained.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<InputEvent>,
    pub reads: usize,
    pub surface: RecordingSurface,
}

impl ScriptedConsole {
    pub fn new(inputs: Vec<InputEvent>) -> Self {
        Self {
            inputs: inputs.into(),
            ..Default::default()
        }
    }

    /// Shorthand for a console fed only submitted lines.
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| InputEvent::Message(line.to_string()))
                .collect(),
        )
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl LineSource for ScriptedConsole {
    async fn read_line(&mut self) -> InputEvent {
        self.reads += 1;
        self.inputs.pop_front().unwrap_or(InputEvent::Eof)
    }
}

impl ChatSurface for ScriptedConsole {
    fn welcome(&mut self, config: &AgentConfig) {
        self.surface.welcome(config);
    }

    fn farewell(&mut self) {
        self.surface.farewell();
    }

    fn interrupted(&mut self) {
        self.surface.interrupted();
    }

    fn response_started(&mut self, model: &str) {
        self.surface.response_started(model);
    }

    fn fragment(&mut self, text: &str) {
        self.surface.fragment(text);
    }

    fn response_finished(&mut self, turn: &Turn) {
        self.surface.response_finished(turn);
    }

    fn turn_failed(&mut self, error: &TurnError) {
        self.surface.turn_failed(error);
    }
}

//! Single-turn execution against an LLM provider.
//!
//! `ChatEngine` builds the `CompletionRequest` for a turn (system
//! instructions + the one user line, no history), streams the answer into a
//! [`ChatSurface`], and returns the finished [`Turn`] or a [`TurnError`].

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use futures_util::{Stream, StreamExt};
use pin_project_lite::pin_project;
use tracing::{Instrument, debug, info_span};

use termai_types::config::AgentConfig;
use termai_types::llm::{CompletionRequest, CompletionResponse, LlmError, Message, StreamEvent};
use termai_types::turn::{Turn, TurnError};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::provider::EventStream;

use super::console::ChatSurface;

/// Executes LLM calls on behalf of the session loop.
pub struct ChatEngine {
    provider: BoxLlmProvider,
}

impl ChatEngine {
    pub fn new(provider: BoxLlmProvider) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    /// Open a streaming request for one user line.
    pub fn execute(&self, config: &AgentConfig, input: &str) -> EventStream {
        let request = build_request(config, input, true);

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = ?request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.stream = true,
        );

        Box::pin(StreamInSpan {
            inner: self.provider.stream(request),
            span,
        })
    }

    /// Run one turn: render every fragment as it arrives and collect them.
    ///
    /// The stream is drained to its end (or first error) before returning,
    /// so at most one request is ever in flight. On error the partial answer
    /// is dropped; fragments already rendered stay on screen.
    pub async fn run_turn<S: ChatSurface>(
        &self,
        config: &AgentConfig,
        input: String,
        surface: &mut S,
    ) -> Result<Turn, TurnError> {
        surface.response_started(&config.model);

        let start = Instant::now();
        let mut stream = self.execute(config, &input);
        let mut response = String::new();

        while let Some(event) = stream.next().await {
            match event? {
                StreamEvent::TextDelta { text, .. } => {
                    surface.fragment(&text);
                    response.push_str(&text);
                }
                StreamEvent::MessageDelta { stop_reason } => {
                    debug!(%stop_reason, "Provider finished message");
                }
                StreamEvent::Usage(usage) => {
                    debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "Token usage"
                    );
                }
                StreamEvent::Connected => {}
                StreamEvent::Done => break,
            }
        }

        Ok(Turn {
            input,
            response,
            elapsed: start.elapsed(),
        })
    }

    /// Send a minimal non-streaming request to verify key and endpoint.
    pub async fn check(&self, config: &AgentConfig) -> Result<CompletionResponse, LlmError> {
        let mut request = build_request(config, "Reply with the single word: ready", false);
        request.max_tokens = Some(16);

        let span = info_span!(
            "gen_ai.check",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
        );
        self.provider.complete(&request).instrument(span).await
    }
}

/// Build the request for one turn. Each turn stands alone: no prior messages.
pub fn build_request(config: &AgentConfig, input: &str, stream: bool) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        messages: vec![Message::user(input)],
        system: Some(config.instructions.clone()),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        stream,
    }
}

pin_project! {
    /// Keeps a tracing span entered while the inner stream is polled, so the
    /// span covers the whole streaming duration rather than stream creation.
    struct StreamInSpan<S> {
        #[pin]
        inner: S,
        span: tracing::Span,
    }
}

impl<S: Stream> Stream for StreamInSpan<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let _enter = this.span.enter();
        this.inner.poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::{RecordingSurface, ScriptedProvider, Step};
    use termai_types::llm::{StopReason, Usage};

    fn engine_with(steps: Vec<Vec<Step>>) -> (ChatEngine, ScriptedProvider) {
        let provider = ScriptedProvider::new(steps);
        (ChatEngine::new(BoxLlmProvider::new(provider.clone())), provider)
    }

    #[test]
    fn test_build_request_single_turn() {
        let config = AgentConfig::default();
        let request = build_request(&config, "hello", true);
        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "hello");
        assert_eq!(request.system.as_deref(), Some(config.instructions.as_str()));
        assert!(request.stream);
    }

    #[tokio::test]
    async fn test_run_turn_accumulates_fragments_in_order() {
        let (engine, provider) = engine_with(vec![vec![
            Step::Event(StreamEvent::Connected),
            Step::text("Hi"),
            Step::text(" there"),
            Step::Event(StreamEvent::Usage(Usage {
                input_tokens: 3,
                output_tokens: 3,
            })),
            Step::text("!"),
            Step::Event(StreamEvent::MessageDelta {
                stop_reason: StopReason::EndTurn,
            }),
            Step::Event(StreamEvent::Done),
        ]]);
        let mut surface = RecordingSurface::default();

        let turn = engine
            .run_turn(&AgentConfig::default(), "hello".to_string(), &mut surface)
            .await
            .unwrap();

        assert_eq!(turn.input, "hello");
        assert_eq!(turn.response, "Hi there!");
        assert_eq!(surface.fragments, vec!["Hi", " there", "!"]);
        assert_eq!(surface.fragments.concat(), turn.response);
        assert_eq!(surface.headers, vec!["gemini-2.5-flash"]);
        assert_eq!(provider.request_count(), 1);
    }

    #[tokio::test]
    async fn test_run_turn_error_mid_stream_discards_answer() {
        let (engine, _) = engine_with(vec![vec![
            Step::text("partial"),
            Step::Fail(|| LlmError::Stream("connection reset".to_string())),
        ]]);
        let mut surface = RecordingSurface::default();

        let err = engine
            .run_turn(&AgentConfig::default(), "hello".to_string(), &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, TurnError::Transport(_)));
        // Already-rendered fragments stay rendered.
        assert_eq!(surface.fragments, vec!["partial"]);
    }

    #[tokio::test]
    async fn test_run_turn_stops_at_done() {
        let (engine, _) = engine_with(vec![vec![
            Step::text("answer"),
            Step::Event(StreamEvent::Done),
            Step::text("ignored"),
        ]]);
        let mut surface = RecordingSurface::default();

        let turn = engine
            .run_turn(&AgentConfig::default(), "q".to_string(), &mut surface)
            .await
            .unwrap();
        assert_eq!(turn.response, "answer");
    }

    #[tokio::test]
    async fn test_run_turn_sends_instructions_and_input() {
        let (engine, provider) = engine_with(vec![vec![Step::Event(StreamEvent::Done)]]);
        let config = AgentConfig {
            instructions: "Answer tersely.".to_string(),
            ..AgentConfig::default()
        };
        let mut surface = RecordingSurface::default();

        engine
            .run_turn(&config, "what is rust".to_string(), &mut surface)
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some("Answer tersely."));
        assert_eq!(requests[0].messages[0].content, "what is rust");
    }

    #[tokio::test]
    async fn test_check_uses_non_streaming_request() {
        let (engine, provider) = engine_with(vec![]);
        let response = engine.check(&AgentConfig::default()).await.unwrap();
        assert_eq!(response.content, "ready");
        let requests = provider.requests();
        assert!(!requests[0].stream);
        assert_eq!(requests[0].max_tokens, Some(16));
    }
}

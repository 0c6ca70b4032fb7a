//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! provider-agnostic [`StreamEvent`] enum defined in `termai-types`.

use futures_util::StreamExt;

use async_openai::types::chat::{
    ChatCompletionResponseStream, CreateChatCompletionStreamResponse, FinishReason,
};

use termai_types::llm::{StopReason, StreamEvent, Usage};
use termai_core::llm::provider::EventStream;

use super::map_openai_error;

pub(crate) fn stop_reason(finish_reason: &FinishReason) -> StopReason {
    match finish_reason {
        FinishReason::Stop => StopReason::EndTurn,
        FinishReason::Length => StopReason::MaxTokens,
        FinishReason::ToolCalls | FinishReason::FunctionCall => StopReason::ToolUse,
        FinishReason::ContentFilter => StopReason::ContentFilter,
    }
}

/// Events carried by one stream chunk, in the order they should be emitted.
///
/// Empty content deltas are dropped. Usage arrives on a trailing chunk with
/// no choices when the provider reports it.
pub fn chunk_events(chunk: &CreateChatCompletionStreamResponse) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    for choice in &chunk.choices {
        if let Some(text) = choice.delta.content.as_deref() {
            if !text.is_empty() {
                events.push(StreamEvent::TextDelta {
                    index: choice.index,
                    text: text.to_string(),
                });
            }
        }

        if let Some(finish_reason) = &choice.finish_reason {
            events.push(StreamEvent::MessageDelta {
                stop_reason: stop_reason(finish_reason),
            });
        }
    }

    if let Some(usage) = &chunk.usage {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        }));
    }

    events
}

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of [`StreamEvent`]s.
///
/// The returned stream emits:
/// 1. `Connected` -- immediately on entry
/// 2. `TextDelta` / `MessageDelta` / `Usage` -- per chunk, via [`chunk_events`]
/// 3. `Done` -- once the provider closes the stream
///
/// The first chunk error ends the stream.
pub fn map_openai_stream(stream: ChatCompletionResponseStream) -> EventStream {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        let mut stream = stream;
        while let Some(result) = stream.next().await {
            let chunk = result.map_err(map_openai_error)?;
            for event in chunk_events(&chunk) {
                yield event;
            }
        }

        yield StreamEvent::Done;
    })
}

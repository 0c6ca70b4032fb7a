//! Per-turn result types.
//!
//! A turn either completes with its accumulated answer or fails with one
//! `TurnError`, which the session loop reports before prompting again.

use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;

/// One completed request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// The submitted line, as typed.
    pub input: String,
    /// All text fragments of the answer, concatenated in arrival order.
    pub response: String,
    /// Wall-clock time from opening the stream to its end.
    pub elapsed: Duration,
}

/// Why a turn failed. Contained to the turn; never fatal to the session.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("connection failed: {0}")]
    Transport(String),

    #[error("malformed stream event: {0}")]
    MalformedStreamEvent(String),

    #[error("{0}")]
    Provider(String),
}

impl From<LlmError> for TurnError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed => {
                TurnError::Authentication("the provider rejected the API key".to_string())
            }
            LlmError::MissingApiKey { .. } => TurnError::Authentication(err.to_string()),
            LlmError::Transport(msg) | LlmError::Stream(msg) => TurnError::Transport(msg),
            LlmError::Deserialization(msg) => TurnError::MalformedStreamEvent(msg),
            LlmError::Provider { .. } | LlmError::InvalidRequest(_) => {
                TurnError::Provider(err.to_string())
            }
        }
    }
}

/// Counters reported when the session loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub completed_turns: u32,
    pub failed_turns: u32,
    pub interrupts: u32,
}

//! Shared domain types for Terminal AI.
//!
//! LLM request and streaming shapes, the agent configuration value, and the
//! per-turn result types used by the session loop.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod llm;
pub mod turn;

//! Provider ports and chat orchestration for Terminal AI.
//!
//! This crate defines the "ports" the infrastructure and CLI layers plug
//! into (`LlmProvider`, `LineSource`, `ChatSurface`) and the session loop
//! that drives them. It depends only on `termai-types` -- never on
//! `termai-infra` or any network/terminal crate.

pub mod chat;
pub mod llm;

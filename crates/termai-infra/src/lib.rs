//! Infrastructure layer for Terminal AI.
//!
//! Contains the implementations behind the ports defined in `termai-core`:
//! the OpenAI-compatible provider adapter, environment credential lookup,
//! and `config.toml` loading.

pub mod config;
pub mod llm;
pub mod secret;

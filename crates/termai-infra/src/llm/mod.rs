//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `termai-core`, plus a factory ([`create_provider`]) that builds it from
//! the resolved [`AgentConfig`].
//!
//! [`LlmProvider`]: termai_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use termai_core::llm::box_provider::BoxLlmProvider;
use termai_types::config::AgentConfig;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] for the agent's configured provider.
///
/// A missing key is not an error here: the provider is still built and every
/// request it serves fails with `LlmError::MissingApiKey`.
pub fn create_provider(config: &AgentConfig, api_key: Option<SecretString>) -> BoxLlmProvider {
    let oai_config = openai_compat::config::from_agent_config(config, api_key);
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config))
}

//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each preset returns an [`OpenAiCompatConfig`] with the provider's base URL
//! and key variable; [`from_agent_config`] layers the resolved agent settings
//! on top.

use secrecy::SecretString;

use termai_types::config::{AgentConfig, ProviderKind};

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key. `None` makes every request fail with `MissingApiKey`.
    pub api_key: Option<SecretString>,
    /// Variable the key was looked up in, named in the missing-key error.
    pub api_key_env: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
}

/// Google Gemini via its OpenAI-compatible endpoint.
pub fn gemini_defaults(api_key: Option<SecretString>, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: ProviderKind::Gemini.default_base_url().into(),
        api_key,
        api_key_env: ProviderKind::Gemini.default_api_key_env().into(),
        model: model.into(),
    }
}

/// OpenAI.
pub fn openai_defaults(api_key: Option<SecretString>, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: ProviderKind::OpenAi.default_base_url().into(),
        api_key,
        api_key_env: ProviderKind::OpenAi.default_api_key_env().into(),
        model: model.into(),
    }
}

/// Preset for the agent's provider, with its base URL and key variable.
pub fn from_agent_config(config: &AgentConfig, api_key: Option<SecretString>) -> OpenAiCompatConfig {
    let mut oai = match config.provider {
        ProviderKind::Gemini => gemini_defaults(api_key, &config.model),
        ProviderKind::OpenAi => openai_defaults(api_key, &config.model),
    };
    oai.base_url = config.base_url.trim_end_matches('/').to_string();
    oai.api_key_env = config.api_key_env.clone();
    oai
}

//! Agent configuration types for Terminal AI.
//!
//! `ConfigFile` mirrors the optional `config.toml`; every field may be
//! omitted. `AgentConfig` is the resolved, immutable value handed to the
//! session loop once the file and command-line overrides are merged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display name used for the agent when none is configured.
pub const DEFAULT_AGENT_NAME: &str = "Terminal AI";

/// System instructions used when none are configured.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful, general-purpose AI assistant designed to answer all types of user queries, \
including programming, writing, troubleshooting, and general knowledge. \
Since you operate in a command-line interface, avoid using markdown styling such as asterisks (*), \
hashes (#), or other formatting symbols that may not display well in terminal environments. \
Always respond in clear, plain text that is easy to read and understand in a terminal window.";

/// Hosted model backends reachable through the OpenAI-compatible protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Base URL of the provider's OpenAI-compatible API.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("invalid provider: '{other}'")),
        }
    }
}

/// On-disk configuration (`config.toml`). All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub name: Option<String>,
    pub instructions: Option<String>,
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ConfigFile {
    /// Layer `overrides` on top of this file and fill the gaps with the
    /// provider's defaults.
    ///
    /// Base URL, key variable and model follow the *resolved* provider, so
    /// `--provider openai` alone switches all three.
    pub fn resolve(self, overrides: ConfigFile) -> AgentConfig {
        let provider = overrides.provider.or(self.provider).unwrap_or_default();

        AgentConfig {
            name: overrides
                .name
                .or(self.name)
                .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
            instructions: overrides
                .instructions
                .or(self.instructions)
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            provider,
            model: overrides
                .model
                .or(self.model)
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: overrides
                .base_url
                .or(self.base_url)
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            api_key_env: overrides
                .api_key_env
                .or(self.api_key_env)
                .unwrap_or_else(|| provider.default_api_key_env().to_string()),
            temperature: overrides.temperature.or(self.temperature),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
        }
    }
}

/// Resolved agent identity and endpoint settings.
///
/// Built once at startup and shared read-only for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub instructions: String,
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable carrying the API key (never the key).
    pub api_key_env: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        ConfigFile::default().resolve(ConfigFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_agent_config_targets_gemini() {
        let config = AgentConfig::default();
        assert_eq!(config.name, "Terminal AI");
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta/openai"
        );
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert!(config.instructions.contains("plain text"));
        assert!(config.temperature.is_none());
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn test_provider_override_switches_provider_defaults() {
        let overrides = ConfigFile {
            provider: Some(ProviderKind::OpenAi),
            ..Default::default()
        };
        let config = ConfigFile::default().resolve(overrides);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = ConfigFile {
            model: Some("gemini-2.5-pro".to_string()),
            temperature: Some(0.2),
            ..Default::default()
        };
        let overrides = ConfigFile {
            model: Some("gemini-2.0-flash".to_string()),
            ..Default::default()
        };
        let config = file.resolve(overrides);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_config_file_deserialize_partial() {
        let toml_str = r#"
name = "Shell Helper"
model = "gemini-2.5-pro"
max_tokens = 2048
"#;
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.name.as_deref(), Some("Shell Helper"));
        assert_eq!(file.max_tokens, Some(2048));
        assert!(file.provider.is_none());

        let config = file.resolve(ConfigFile::default());
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        let result: Result<ConfigFile, _> = toml::from_str("modle = \"typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_serde() {
        let file: ConfigFile = toml::from_str("provider = \"openai\"").unwrap();
        assert_eq!(file.provider, Some(ProviderKind::OpenAi));
    }
}

//! Startup resolution of the agent: config file, flags, and API key.

use std::path::PathBuf;

use secrecy::SecretString;
use tracing::{debug, warn};

use termai_infra::config::{load_config_file, resolve_config_dir};
use termai_infra::secret::env::resolve_api_key;
use termai_types::config::AgentConfig;

use super::AgentArgs;

/// Everything a command needs to talk to the provider.
pub struct ResolvedAgent {
    pub config: AgentConfig,
    pub config_dir: PathBuf,
    pub api_key: Option<SecretString>,
}

/// Load `config.toml`, apply the flags, and look up the API key.
///
/// A missing key is logged, not fatal: every turn will report it instead.
pub async fn resolve_agent(args: &AgentArgs) -> ResolvedAgent {
    let config_dir = resolve_config_dir();
    let file = load_config_file(&config_dir).await;
    let config = file.resolve(args.overrides());

    let api_key = resolve_api_key(&config.api_key_env);
    if api_key.is_none() {
        warn!(
            env_var = %config.api_key_env,
            "API key not set; requests will fail until it is exported"
        );
    }

    debug!(
        provider = %config.provider,
        model = %config.model,
        base_url = %config.base_url,
        config_dir = %config_dir.display(),
        "Resolved agent configuration"
    );

    ResolvedAgent {
        config,
        config_dir,
        api_key,
    }
}

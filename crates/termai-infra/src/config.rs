//! Configuration file loader for Terminal AI.
//!
//! Reads `config.toml` from the config directory (`~/.config/termai/` in
//! production) into a [`ConfigFile`]. Falls back to an empty file, and so to
//! the built-in defaults, when it is missing or malformed.

use std::path::{Path, PathBuf};

use termai_types::config::ConfigFile;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "TERMAI_CONFIG_DIR";

/// Resolve the config directory.
///
/// Priority: `TERMAI_CONFIG_DIR`, then the platform config dir
/// (`~/.config/termai` on Linux), then `./.termai`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(config) = dirs::config_dir() {
        return config.join("termai");
    }

    PathBuf::from(".termai")
}

/// Path of the config file inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Load `{config_dir}/config.toml`.
///
/// - Missing file: empty [`ConfigFile`], logged at debug.
/// - Unreadable or malformed file: logs a warning and returns the empty file.
pub async fn load_config_file(config_dir: &Path) -> ConfigFile {
    let path = config_path(config_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return ConfigFile::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ConfigFile::default();
        }
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            tracing::debug!(path = %path.display(), "Loaded config file");
            file
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use termai_types::config::ProviderKind;

    #[tokio::test]
    async fn test_load_config_file_missing_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let file = load_config_file(tmp.path()).await;
        assert_eq!(file, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_load_config_file_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            config_path(tmp.path()),
            r#"
name = "Shell Buddy"
provider = "openai"
temperature = 0.3
"#,
        )
        .await
        .unwrap();

        let file = load_config_file(tmp.path()).await;
        assert_eq!(file.name.as_deref(), Some("Shell Buddy"));
        assert_eq!(file.provider, Some(ProviderKind::OpenAi));
        assert_eq!(file.temperature, Some(0.3));
    }

    #[tokio::test]
    async fn test_load_config_file_invalid_toml_returns_empty() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "this is not { valid toml !!!")
            .await
            .unwrap();

        let file = load_config_file(tmp.path()).await;
        assert_eq!(file, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_load_config_file_unknown_key_returns_empty() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(config_path(tmp.path()), "modle = \"gemini-2.5-pro\"")
            .await
            .unwrap();

        let file = load_config_file(tmp.path()).await;
        assert!(file.model.is_none());
    }

    #[test]
    fn test_resolve_config_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(CONFIG_DIR_ENV, "/tmp/test-termai");
        }
        let dir = resolve_config_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-termai"));
        unsafe {
            std::env::remove_var(CONFIG_DIR_ENV);
        }
    }
}

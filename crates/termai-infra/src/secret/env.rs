//! Environment variable credential lookup.
//!
//! The API key is read once at startup from the variable named in the agent
//! config (`GEMINI_API_KEY` by default) and kept wrapped in a
//! [`SecretString`] from then on. A `.env` file can supply it; variables
//! already exported win over the file.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::debug;

/// Load variables from a `.env` file into the process environment.
///
/// With `None`, searches the current directory and its parents. Returns the
/// file that was loaded. A missing or malformed file is logged and skipped.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(loaded) => {
            debug!(path = %loaded.display(), "Loaded .env file");
            Some(loaded)
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            None
        }
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable .env file");
            None
        }
    }
}

/// Read an API key from `env_var`.
///
/// Unset, empty, and non-Unicode values all count as absent: none of them
/// can authenticate a request.
pub fn resolve_api_key(env_var: &str) -> Option<SecretString> {
    match std::env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        // Invalid Unicode cannot be sent as a header value anyway.
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

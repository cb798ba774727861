//! Configuration, data-directory, and credential resolution.
//!
//! Reads `config.toml` from the data directory (`~/.rehearse/` by default)
//! and deserializes it into [`GlobalConfig`]. Falls back to the defaults
//! when the file is missing or malformed. The API key comes from the
//! environment only and is wrapped in a [`SecretString`] immediately.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use rehearse_types::config::GlobalConfig;
use rehearse_types::llm::LlmError;

/// Environment variables consulted for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["REHEARSE_API_KEY", "OPENROUTER_API_KEY"];

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`GlobalConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the data directory: `REHEARSE_DATA_DIR` if set, else
/// `~/.rehearse`, else the current directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("REHEARSE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".rehearse"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve the provider API key from the environment.
///
/// Checked before any network call: absence (or a whitespace-only value)
/// is [`LlmError::EmptyCredential`].
pub fn resolve_api_key() -> Result<SecretString, LlmError> {
    first_non_empty(
        API_KEY_VARS
            .iter()
            .map(|var| std::env::var(var).ok()),
    )
    .map(SecretString::from)
    .ok_or(LlmError::EmptyCredential)
}

fn first_non_empty(candidates: impl Iterator<Item = Option<String>>) -> Option<String> {
    candidates
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

// Configuration loader
// Loads settings from ~/.chattune/config.toml (or an explicit path) and the
// API key from the environment

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{API_KEY_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::settings::{Config, ConfigError};

/// Read the training service key from `OPENAI_API_KEY`.
///
/// Must be called before any other I/O for commands that talk to the service.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    api_key_from_value(std::env::var(API_KEY_ENV).ok())
}

/// Validate a raw key value; empty or whitespace-only counts as missing
pub fn api_key_from_value(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey),
    }
}

/// Default config location: ~/.chattune/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present, otherwise built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let config = match path {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn load_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Invalid config TOML at {}", path.display()))?;

    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

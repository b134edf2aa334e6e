// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set. Export it first, e.g. export OPENAI_API_KEY=\"sk-...\"")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Pipeline configuration (file paths, service endpoint, job options)
///
/// The API key is deliberately not part of this struct; it is only ever
/// read from the environment (see [`super::api_key_from_env`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Raw chat export
    pub input_path: PathBuf,

    /// JSONL dataset target (overwritten on every run)
    pub output_path: PathBuf,

    /// Service root, e.g. "https://api.openai.com"
    pub base_url: String,

    /// Base model for the tuning job
    pub base_model: String,

    /// Case-insensitive markers for media placeholders
    pub skip_markers: Vec<String>,

    /// Optional suffix for the tuned model name
    pub suffix: Option<String>,

    /// Optional epoch count (service picks when unset)
    pub n_epochs: Option<u32>,

    /// Optional already-uploaded validation file id
    pub validation_file: Option<String>,

    pub chat_temperature: f32,
    pub chat_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            base_model: DEFAULT_BASE_MODEL.to_string(),
            skip_markers: vec![DEFAULT_SKIP_MARKER.to_string()],
            suffix: None,
            n_epochs: None,
            validation_file: None,
            chat_temperature: DEFAULT_CHAT_TEMPERATURE,
            chat_max_tokens: DEFAULT_CHAT_MAX_TOKENS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_model.trim().is_empty() {
            return Err(ConfigError::Invalid("base_model must not be empty".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.skip_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Invalid("skip_markers must not contain empty strings".into()));
        }
        if self.n_epochs == Some(0) {
            return Err(ConfigError::Invalid("n_epochs must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_model, "gpt-4o-mini-2024-07-18");
        assert_eq!(config.skip_markers, vec!["immagine omessa".to_string()]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.n_epochs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.base_model = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.skip_markers.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("base_model = \"gpt-4.1-mini\"\nn_epochs = 3").unwrap();
        assert_eq!(config.base_model, "gpt-4.1-mini");
        assert_eq!(config.n_epochs, Some(3));
        assert_eq!(config.output_path, PathBuf::from("training_data.jsonl"));
    }
}

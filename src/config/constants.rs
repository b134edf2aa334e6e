// Project-wide constants
//
// Centralised here so file names, endpoints and the base model have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Environment variable holding the training service API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default training service root (paths like `/v1/files` are appended).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Base model fine-tuning jobs are created against.
pub const DEFAULT_BASE_MODEL: &str = "gpt-4o-mini-2024-07-18";

/// Raw chat export read by `train` and `prepare`.
pub const DEFAULT_INPUT_PATH: &str = "whatsapp.txt";

/// JSONL dataset written by `train` and `prepare`.
pub const DEFAULT_OUTPUT_PATH: &str = "training_data.jsonl";

/// WhatsApp (Italian locale) stand-in for a media message.
pub const DEFAULT_SKIP_MARKER: &str = "immagine omessa";

/// Upload purpose tag for tuning data.
pub const FINE_TUNE_PURPOSE: &str = "fine-tune";

/// Sampling settings for `chat`.
pub const DEFAULT_CHAT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 300;

/// Directory under $HOME holding the optional config file.
pub const CONFIG_DIR_NAME: &str = ".chattune";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{api_key_from_env, api_key_from_value, default_config_path, load_config};
pub use settings::{Config, ConfigError};

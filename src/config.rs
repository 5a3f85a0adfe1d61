//! Application configuration
//!
//! Loads an optional TOML file, then environment variables prefixed with
//! `PICKLINE_` (nested keys separated by `__`), e.g.
//! `PICKLINE_STAKING__BANKROLL=2500` or `PICKLINE_BOOKS__BLOCKED=bovada,mybookie`.

use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::kelly::StakingConfig;
use crate::core::quotes::BookPolicy;
use crate::error::OddsError;

/// Default config file name (any supported extension)
pub const DEFAULT_CONFIG_FILE: &str = "pickline";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid staking configuration: {0}")]
    Invalid(#[from] OddsError),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub staking: StakingConfig,
    pub books: BookPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load from `path` (required if given, else optional `pickline.*`) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("PICKLINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("books.preferred")
                    .with_list_parse_key("books.blocked"),
            )
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.staking.validate()?)
    }
}

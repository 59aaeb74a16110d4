//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: the TOML file layout (Config, IrcConfig, GithubConfig, ShortenerConfig)
//! - [`session`]: the immutable per-delivery [`SessionConfig`]
//! - [`defaults`]: serde default functions and port constants
//! - [`validation`]: startup checks that collect every problem at once

pub mod defaults;
mod session;
mod types;
pub mod validation;

pub use session::SessionConfig;
pub use types::{Config, GithubConfig, IrcConfig, PortSetting, Secret, ShortenerConfig};
pub use validation::ValidationError;

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        validation::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

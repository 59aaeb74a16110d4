//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("irc.host is required")]
    MissingHost,
    #[error("irc.nick is required")]
    MissingNick,
    #[error("irc.room is required")]
    MissingRoom,
    #[error("irc.nick must not contain spaces or control characters, got '{0}'")]
    InvalidNick(String),
    #[error("irc.room must not contain spaces, commas or control characters, got '{0}'")]
    InvalidRoom(String),
    #[error("irc.port must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("irc.read_timeout_secs must be greater than zero")]
    ZeroReadTimeout,
}

fn is_wire_unsafe(s: &str) -> bool {
    s.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let irc = &config.irc;

    if irc.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }

    if irc.nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if is_wire_unsafe(&irc.nick) || irc.nick.starts_with([':', '#']) {
        errors.push(ValidationError::InvalidNick(irc.nick.clone()));
    }

    let room = irc.room.trim();
    if room.is_empty() {
        errors.push(ValidationError::MissingRoom);
    } else if is_wire_unsafe(room) || room.contains(',') {
        errors.push(ValidationError::InvalidRoom(irc.room.clone()));
    }

    if let Err(e) = irc.resolve_port() {
        errors.push(e);
    }

    if irc.read_timeout_secs == 0 {
        errors.push(ValidationError::ZeroReadTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

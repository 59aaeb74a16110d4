//! Core configuration types.

use std::fmt;

use serde::Deserialize;

use super::defaults::{
    default_api_url, default_cache_ttl_secs, default_http_timeout_secs, default_read_timeout_secs,
};

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The IRC target every notification is delivered to.
    pub irc: IrcConfig,
    /// Repository metadata lookups.
    #[serde(default)]
    pub github: GithubConfig,
    /// Optional link shortening service.
    #[serde(default)]
    pub shortener: ShortenerConfig,
}

/// A credential that must never be printed.
///
/// `Debug` and `Display` both render `****`; the raw value is only reachable
/// through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// A port as written in the config file.
///
/// Webhook settings arrive as strings, so both `port = 6697` and
/// `port = "6697"` are accepted. An empty string means "unspecified".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortSetting {
    Number(i64),
    Text(String),
}

/// IRC target configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IrcConfig {
    pub host: String,
    #[serde(default)]
    pub port: Option<PortSetting>,
    #[serde(default)]
    pub ssl: bool,
    pub nick: String,
    /// Room name; `#` is prefixed unless it already carries a channel sigil.
    pub room: String,
    #[serde(default)]
    pub password: Option<Secret>,
    #[serde(default)]
    pub nickserv_password: Option<Secret>,
    /// Comma separated branch allow-list. Empty or absent allows all.
    #[serde(default)]
    pub branches: Option<String>,
    #[serde(default)]
    pub no_colors: bool,
    /// Print full URLs instead of shortened ones.
    #[serde(default)]
    pub long_url: bool,
    /// Speak with NOTICE instead of PRIVMSG.
    #[serde(default)]
    pub notice: bool,
    #[serde(default)]
    pub message_delay_ms: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default)]
    pub realname_prefix: Option<String>,
}

/// Repository metadata API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: Option<Secret>,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// Link shortener configuration. Shortening is off without an endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenerConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_never_prints() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(****)");
        assert_eq!(secret.to_string(), "****");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_debug_config_hides_passwords() {
        let irc: IrcConfig = toml::from_str(
            r#"
            host = "h"
            nick = "n"
            room = "r"
            password = "hunter2"
            nickserv_password = "hunter3"
            "#,
        )
        .unwrap();
        let printed = format!("{irc:?}");
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("hunter3"));
    }

    #[test]
    fn test_port_accepts_number_or_string() {
        let irc: IrcConfig = toml::from_str("host = \"h\"\nnick = \"n\"\nroom = \"r\"\nport = 7000").unwrap();
        assert_eq!(irc.port, Some(PortSetting::Number(7000)));

        let irc: IrcConfig = toml::from_str("host = \"h\"\nnick = \"n\"\nroom = \"r\"\nport = \"\"").unwrap();
        assert_eq!(irc.port, Some(PortSetting::Text(String::new())));
    }
}

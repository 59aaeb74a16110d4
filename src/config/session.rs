//! The immutable configuration one IRC session runs with.

use std::time::Duration;

use super::defaults::default_port;
use super::types::{IrcConfig, PortSetting, Secret};
use super::validation::ValidationError;
use crate::render::{BranchFilter, RenderOptions};

impl IrcConfig {
    /// Resolve the configured port.
    ///
    /// Absent, empty and zero all mean "unspecified" and fall back to the
    /// SSL-dependent default, so the result is always a usable port.
    pub fn resolve_port(&self) -> Result<u16, ValidationError> {
        let explicit = match &self.port {
            None => None,
            Some(PortSetting::Number(0)) => None,
            Some(PortSetting::Number(n)) => {
                Some(u16::try_from(*n).map_err(|_| ValidationError::InvalidPort(n.to_string()))?)
            }
            Some(PortSetting::Text(s)) if s.trim().is_empty() => None,
            Some(PortSetting::Text(s)) => {
                let port: u16 = s
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::InvalidPort(s.clone()))?;
                (port != 0).then_some(port)
            }
        };
        Ok(explicit.unwrap_or_else(|| default_port(self.ssl)))
    }

    /// The channel to join: the room with `#` prefixed when it has no sigil.
    pub fn channel(&self) -> String {
        let room = self.room.trim();
        if room.starts_with(['#', '&']) {
            room.to_string()
        } else {
            format!("#{room}")
        }
    }
}

fn non_empty(secret: &Option<Secret>) -> Option<Secret> {
    secret.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Per-notification session settings.
///
/// Built once per delivery, after the repository identity is known, and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub use_ssl: bool,
    pub nick: String,
    pub channel: String,
    pub password: Option<Secret>,
    pub nickserv_password: Option<Secret>,
    pub branch_filter: BranchFilter,
    pub no_colors: bool,
    pub notice: bool,
    pub realname: String,
    pub message_delay: Duration,
    pub read_timeout: Duration,
}

impl SessionConfig {
    /// Build the session settings for one delivery.
    ///
    /// `identity` is the repository identity string; it becomes the realname,
    /// behind `realname_prefix` when one is configured.
    pub fn new(irc: &IrcConfig, identity: &str) -> Result<Self, ValidationError> {
        let realname = match irc.realname_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => format!("{prefix} - {identity}"),
            _ => identity.to_string(),
        };

        Ok(Self {
            host: irc.host.trim().to_string(),
            port: irc.resolve_port()?,
            use_ssl: irc.ssl,
            nick: irc.nick.clone(),
            channel: irc.channel(),
            password: non_empty(&irc.password),
            nickserv_password: non_empty(&irc.nickserv_password),
            branch_filter: BranchFilter::parse(irc.branches.as_deref().unwrap_or_default()),
            no_colors: irc.no_colors,
            notice: irc.notice,
            realname,
            message_delay: Duration::from_millis(irc.message_delay_ms),
            read_timeout: Duration::from_secs(irc.read_timeout_secs),
        })
    }

    /// Rendering options derived from this session.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.branch_filter.clone(), self.no_colors).fit_to_target(&self.channel)
    }
}

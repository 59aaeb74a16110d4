//! Default value functions for configuration.

/// Port used when SSL is disabled and no port is configured.
pub const DEFAULT_PORT: u16 = 6667;

/// Port used when SSL is enabled and no port is configured.
pub const DEFAULT_SSL_PORT: u16 = 6697;

/// The port a target listens on when the configuration leaves it open.
pub fn default_port(ssl: bool) -> u16 {
    if ssl { DEFAULT_SSL_PORT } else { DEFAULT_PORT }
}

pub fn default_read_timeout_secs() -> u64 {
    30
}

// =============================================================================
// HTTP Defaults
// =============================================================================

pub fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

pub fn default_cache_ttl_secs() -> u64 {
    300
}

pub fn default_http_timeout_secs() -> u64 {
    5
}

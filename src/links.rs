//! URL shortening.
//!
//! Links are shortened before rendering so the renderer stays pure. Any
//! failure keeps the long URL; a notification is never held up by the
//! shortener.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ShortenerConfig;

#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("shortener request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("shortener answered {0} without a Location header")]
    NoLocation(reqwest::StatusCode),
    #[error("shortener timed out")]
    Timeout,
}

/// Something that turns a long URL into a short one.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError>;
}

/// Shortener speaking the git.io protocol: POST `url=<long>` as a form and
/// read the short link from the `Location` header.
pub struct HttpShortener {
    endpoint: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpShortener {
    /// Build a shortener, or `None` when no endpoint is configured.
    pub fn from_config(config: &ShortenerConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_deref()?.trim();
        if endpoint.is_empty() {
            return None;
        }
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("ircrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Some(Self {
            endpoint: endpoint.to_string(),
            timeout,
            http_client,
        })
    }
}

#[async_trait]
impl UrlShortener for HttpShortener {
    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let request = self
            .http_client
            .post(&self.endpoint)
            .form(&[("url", url)])
            .send();
        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ShortenError::Timeout)??;

        let status = response.status();
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(ShortenError::NoLocation(status))
    }
}

/// Long URL to short URL mapping handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortLinks {
    map: HashMap<String, String>,
}

impl ShortLinks {
    pub fn insert(&mut self, long: impl Into<String>, short: impl Into<String>) {
        self.map.insert(long.into(), short.into());
    }

    /// The short form of `url`, or `url` itself when none is known.
    pub fn get<'a>(&'a self, url: &'a str) -> &'a str {
        self.map.get(url).map_or(url, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Shorten every URL, keeping the long form for any that fail.
pub async fn shorten_all(shortener: Option<&dyn UrlShortener>, urls: &[String]) -> ShortLinks {
    let mut links = ShortLinks::default();
    let Some(shortener) = shortener else {
        return links;
    };

    for url in urls {
        if links.map.contains_key(url) {
            continue;
        }
        match shortener.shorten(url).await {
            Ok(short) => {
                debug!(url = %url, short = %short, "shortened link");
                links.insert(url.clone(), short);
            }
            Err(e) => warn!(url = %url, error = %e, "link shortening failed, using long URL"),
        }
    }
    links
}

//! Repository visibility lookups.
//!
//! The relay discloses `owner/name` in the realname only for public
//! repositories. Anything other than a definite "public" answer, errors
//! included, falls back to the owner alone.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GithubConfig;
use crate::event::RepoRef;

#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("repository lookup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("repository lookup answered {0}")]
    Status(reqwest::StatusCode),
    #[error("repository lookup timed out")]
    Timeout,
}

/// Answers whether a repository is public.
#[async_trait]
pub trait VisibilityResolver: Send + Sync {
    async fn is_public(&self, owner: &str, name: &str) -> Result<bool, VisibilityError>;
}

/// The realname identity for a repository: `owner/name` when public,
/// `owner` otherwise.
pub fn identity_string(repo: &RepoRef, public: bool) -> String {
    if public {
        format!("{}/{}", repo.owner, repo.name)
    } else {
        repo.owner.clone()
    }
}

/// Resolve and format in one step, failing closed.
pub async fn resolve_identity(resolver: &dyn VisibilityResolver, repo: &RepoRef) -> String {
    let public = match resolver.is_public(&repo.owner, &repo.name).await {
        Ok(public) => public,
        Err(e) => {
            warn!(repo = %repo, error = %e, "visibility unknown, treating as private");
            false
        }
    };
    identity_string(repo, public)
}

/// Cached lookup result with expiry.
#[derive(Debug, Clone, Copy)]
struct CachedVisibility {
    public: bool,
    expires_at: Instant,
}

/// Visibility via the repository metadata API: `GET /repos/{owner}/{name}`.
///
/// Definite answers (2xx and 404) are cached for `cache_ttl_secs`; errors
/// are not, so the next delivery asks again.
pub struct GithubResolver {
    api_url: String,
    token: Option<String>,
    ttl: Duration,
    timeout: Duration,
    cache: DashMap<(String, String), CachedVisibility>,
    http_client: reqwest::Client,
}

impl GithubResolver {
    pub fn new(config: &GithubConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ircrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        debug!(
            api_url = %config.api_url,
            cache_ttl = config.cache_ttl_secs,
            "visibility resolver initialized"
        );

        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config
                .token
                .as_ref()
                .filter(|t| !t.is_empty())
                .map(|t| t.expose().to_string()),
            ttl: Duration::from_secs(config.cache_ttl_secs),
            timeout,
            cache: DashMap::new(),
            http_client,
        }
    }

    async fn fetch(&self, owner: &str, name: &str) -> Result<bool, VisibilityError> {
        let url = format!("{}/repos/{owner}/{name}", self.api_url);
        let mut request = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| VisibilityError::Timeout)??;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(VisibilityError::Status(status))
        }
    }

    fn prune_cache(&self) {
        let now = Instant::now();
        self.cache.retain(|_, v| v.expires_at > now);
    }

    #[cfg(test)]
    fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl VisibilityResolver for GithubResolver {
    #[allow(clippy::collapsible_if)]
    async fn is_public(&self, owner: &str, name: &str) -> Result<bool, VisibilityError> {
        let key = (owner.to_string(), name.to_string());
        if let Some(cached) = self.cache.get(&key) {
            if cached.expires_at > Instant::now() {
                debug!(owner, name, "visibility cache hit");
                return Ok(cached.public);
            }
        }

        let public = self.fetch(owner, name).await?;
        self.prune_cache();
        self.cache.insert(
            key,
            CachedVisibility {
                public,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(public)
    }
}

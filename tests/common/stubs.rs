//! Collaborator stand-ins with call counters.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ircrelay::links::{ShortenError, UrlShortener};
use ircrelay::visibility::{VisibilityError, VisibilityResolver};

/// Every repository is public except ones named `private`.
#[derive(Default)]
pub struct StubResolver {
    calls: AtomicUsize,
}

impl StubResolver {
    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisibilityResolver for StubResolver {
    async fn is_public(&self, _owner: &str, name: &str) -> Result<bool, VisibilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(name != "private")
    }
}

/// Shortens everything to `short`.
#[derive(Default)]
pub struct StubShortener {
    calls: AtomicUsize,
}

impl StubShortener {
    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlShortener for StubShortener {
    async fn shorten(&self, _url: &str) -> Result<String, ShortenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("short".to_string())
    }
}

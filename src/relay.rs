//! One notification in, one IRC session out.
//!
//! [`Relay::deliver`] resolves the realname, renders the event, shortens
//! links and runs an [`IrcSession`]. Only connection-level failures are
//! reported; everything softer is logged and degraded in place.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{Instrument, info, info_span, warn};

use crate::config::{Config, IrcConfig, SessionConfig, ValidationError};
use crate::error::SessionError;
use crate::event::{Event, EventKind, RepoRef};
use crate::links::{HttpShortener, ShortLinks, UrlShortener, shorten_all};
use crate::render::render;
use crate::session::IrcSession;
use crate::transcript::TranscriptRecorder;
use crate::transport::{Connector, NetConnector};
use crate::visibility::{GithubResolver, VisibilityResolver, resolve_identity};

/// An inbound event: its kind and raw payload.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: EventKind,
    pub payload: Value,
}

impl Notification {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// A completed delivery.
#[derive(Debug)]
pub struct Delivery {
    pub transcript: TranscriptRecorder,
    /// Message lines sent to the channel.
    pub messages: usize,
    /// Whether the server sent its `004` welcome.
    pub welcomed: bool,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid irc settings: {0}")]
    Config(#[from] ValidationError),

    /// The session failed; the transcript covers everything up to the failure.
    #[error("delivery failed: {source}")]
    Session {
        #[source]
        source: SessionError,
        transcript: TranscriptRecorder,
    },
}

impl RelayError {
    pub fn transcript(&self) -> Option<&TranscriptRecorder> {
        match self {
            RelayError::Config(_) => None,
            RelayError::Session { transcript, .. } => Some(transcript),
        }
    }
}

pub struct Relay {
    irc: IrcConfig,
    connector: Arc<dyn Connector>,
    resolver: Arc<dyn VisibilityResolver>,
    shortener: Option<Arc<dyn UrlShortener>>,
}

impl Relay {
    pub fn new(
        irc: IrcConfig,
        connector: Arc<dyn Connector>,
        resolver: Arc<dyn VisibilityResolver>,
    ) -> Self {
        Self {
            irc,
            connector,
            resolver,
            shortener: None,
        }
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn UrlShortener>) -> Self {
        self.shortener = Some(shortener);
        self
    }

    /// Production wiring: real sockets, the repository API and, when an
    /// endpoint is configured, the link shortener.
    pub fn from_config(config: &Config) -> Self {
        let relay = Self::new(
            config.irc.clone(),
            Arc::new(NetConnector::new()),
            Arc::new(GithubResolver::new(&config.github)),
        );
        match HttpShortener::from_config(&config.shortener) {
            Some(shortener) => relay.with_shortener(Arc::new(shortener)),
            None => relay,
        }
    }

    pub async fn deliver(&self, notification: &Notification) -> Result<Delivery, RelayError> {
        let repo = RepoRef::from_payload(&notification.payload);
        let repo_name = repo.as_ref().map(ToString::to_string).unwrap_or_default();
        let span = info_span!(
            "delivery",
            kind = %notification.kind,
            repo = %repo_name,
            channel = %self.irc.channel(),
        );
        self.deliver_inner(notification, repo).instrument(span).await
    }

    async fn deliver_inner(
        &self,
        notification: &Notification,
        repo: Option<RepoRef>,
    ) -> Result<Delivery, RelayError> {
        let identity = match &repo {
            Some(repo) => resolve_identity(self.resolver.as_ref(), repo).await,
            None => {
                warn!("payload names no repository, using nick as realname");
                self.irc.nick.clone()
            }
        };
        let config = SessionConfig::new(&self.irc, &identity)?;
        let lines = self.render_lines(notification, &config).await;

        let mut session = IrcSession::new(config);
        match session.run(self.connector.as_ref(), &lines).await {
            Ok(messages) => {
                info!(messages, welcomed = session.welcomed(), "notification delivered");
                Ok(Delivery {
                    welcomed: session.welcomed(),
                    transcript: session.into_transcript(),
                    messages,
                })
            }
            Err(source) => {
                warn!(error = %source, code = source.error_code(), "notification not delivered");
                Err(RelayError::Session {
                    source,
                    transcript: session.into_transcript(),
                })
            }
        }
    }

    /// Render the notification, or nothing when the payload is unusable.
    async fn render_lines(&self, notification: &Notification, config: &SessionConfig) -> Vec<String> {
        let event = match Event::parse(notification.kind, &notification.payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "payload not rendered");
                return Vec::new();
            }
        };

        let links = if self.irc.long_url {
            ShortLinks::default()
        } else {
            shorten_all(self.shortener.as_deref(), &event.links()).await
        };
        render(&event, &config.render_options(), &links)
    }
}

//! Error hierarchy for a single delivery.
//!
//! Only [`TransportError`] and [`SessionError`] ever reach the caller.
//! [`RenderError`] is logged and turned into an empty message batch; link
//! shortening and visibility failures are recovered where they happen.

use std::time::Duration;

use ircrelay_proto::ProtocolError;
use thiserror::Error;

use crate::session::SessionState;

// ============================================================================
// Transport Errors
// ============================================================================

/// Failures of the byte stream underneath a session.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    #[error("connection refused by {0}")]
    Refused(String),

    #[error("transport already closed")]
    Closed,
}

// ============================================================================
// Session Errors
// ============================================================================

/// Reasons a session stopped before QUIT was sent.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection error: {0}")]
    Connection(#[from] TransportError),

    #[error("timed out after {after:?} while {phase}")]
    Timeout {
        phase: SessionState,
        after: Duration,
    },
}

impl SessionError {
    /// Get a static error code string for log labelling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connection(TransportError::Io(_)) => "connection_io",
            Self::Connection(TransportError::Protocol(_)) => "connection_protocol",
            Self::Connection(TransportError::InvalidServerName(_)) => "invalid_server_name",
            Self::Connection(TransportError::Refused(_)) => "connection_refused",
            Self::Connection(TransportError::Closed) => "connection_closed",
            Self::Timeout { .. } => "timeout",
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// A payload that cannot be turned into an [`Event`](crate::event::Event).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported event kind: {0}")]
    UnsupportedEvent(String),

    #[error("invalid {kind} payload: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} payload is missing {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

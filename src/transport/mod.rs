//! Line transports a session runs over.
//!
//! A [`Connector`] opens one [`Transport`] per session. Production uses
//! [`net::NetConnector`] (TCP, optionally TLS); tests use
//! [`memory::MemoryConnector`], which scripts the server side and records
//! every line written.

pub mod memory;
pub mod net;

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;

pub use self::memory::{MemoryConnector, MemoryTransport, Wire};
pub use self::net::{NetConnector, NetTransport};

/// Where to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A bidirectional stream of text lines.
#[async_trait]
pub trait Transport: Send {
    /// Next inbound line without its terminator, or `None` at end of stream.
    async fn read_line(&mut self) -> Result<Option<String>, TransportError>;

    /// Send one line; the terminator is added by the transport.
    async fn write_line(&mut self, line: &str) -> Result<(), TransportError>;

    /// Flush and shut the stream down. Safe to call more than once.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Opens transports.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Transport>, TransportError>;
}

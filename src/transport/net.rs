//! TCP and TLS transports framed with [`LineCodec`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use ircrelay_proto::LineCodec;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use super::{Connector, Endpoint, Transport};
use crate::error::TransportError;

/// A connected IRC stream.
#[allow(clippy::large_enum_variant)]
pub enum NetTransport {
    /// Plain TCP transport.
    Tcp {
        framed: Framed<TcpStream, LineCodec>,
    },
    /// Client-side TLS transport.
    Tls {
        framed: Framed<TlsStream<TcpStream>, LineCodec>,
    },
}

impl NetTransport {
    pub fn tcp(stream: TcpStream) -> Self {
        Self::Tcp {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    pub fn tls(stream: TlsStream<TcpStream>) -> Self {
        Self::Tls {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }
}

#[async_trait]
impl Transport for NetTransport {
    async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let next = match self {
            NetTransport::Tcp { framed } => framed.next().await,
            NetTransport::Tls { framed } => framed.next().await,
        };
        Ok(next.transpose()?)
    }

    async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        match self {
            NetTransport::Tcp { framed } => framed.send(line.to_string()).await?,
            NetTransport::Tls { framed } => framed.send(line.to_string()).await?,
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self {
            NetTransport::Tcp { framed } => framed.close().await?,
            NetTransport::Tls { framed } => framed.close().await?,
        }
        Ok(())
    }
}

/// Opens real connections, verifying TLS against the system roots.
pub struct NetConnector {
    tls: TlsConnector,
}

impl NetConnector {
    pub fn new() -> Self {
        let mut roots = RootCertStore::empty();
        let certs = rustls_native_certs::load_native_certs();
        for cert in certs.certs {
            if let Err(e) = roots.add(cert) {
                warn!(error = %e, "failed to add root cert");
            }
        }
        for e in &certs.errors {
            warn!(error = %e, "error loading native certs");
        }

        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        Self {
            tls: TlsConnector::from(Arc::new(config)),
        }
    }
}

impl Default for NetConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for NetConnector {
    async fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Transport>, TransportError> {
        let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionRefused => {
                    TransportError::Refused(endpoint.to_string())
                }
                _ => TransportError::Io(e),
            })?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "failed to set TCP_NODELAY");
        }

        if !endpoint.tls {
            debug!(endpoint = %endpoint, "TCP connected");
            return Ok(Box::new(NetTransport::tcp(stream)));
        }

        let server_name = ServerName::try_from(endpoint.host.clone())
            .map_err(|_| TransportError::InvalidServerName(endpoint.host.clone()))?;
        let stream = self.tls.connect(server_name, stream).await?;
        debug!(endpoint = %endpoint, "TLS handshake complete");
        Ok(Box::new(NetTransport::tls(stream)))
    }
}

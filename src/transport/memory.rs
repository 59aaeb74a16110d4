//! In-memory transport for tests and dry runs.
//!
//! The server side is a fixed script of inbound lines. Everything the
//! session writes lands on a shared [`Wire`] that outlives the transport,
//! so a test can inspect the exact bytes after the session has closed.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Connector, Endpoint, Transport};
use crate::error::TransportError;

#[derive(Debug, Default)]
struct WireState {
    written: Vec<String>,
    endpoints: Vec<Endpoint>,
    closed: bool,
}

/// Shared record of what crossed an in-memory connection.
#[derive(Debug, Clone, Default)]
pub struct Wire {
    state: Arc<Mutex<WireState>>,
}

impl Wire {
    /// Every line written, in order.
    pub fn written(&self) -> Vec<String> {
        self.state.lock().written.clone()
    }

    /// The written lines joined as they appeared on the wire.
    pub fn raw(&self) -> String {
        self.state
            .lock()
            .written
            .iter()
            .map(|line| format!("{line}\r\n"))
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Endpoints connected to, one per successful connect.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.state.lock().endpoints.clone()
    }
}

/// Hands out [`MemoryTransport`]s that replay the same script.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    script: Vec<String>,
    refuse: bool,
    fail_after_writes: Option<usize>,
    stall_after_script: bool,
    wire: Wire,
}

impl MemoryConnector {
    /// Connector whose server sends `script`, then ends the stream.
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Connector that refuses every connection.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    /// Fail with a broken pipe once `n` lines have been written.
    pub fn fail_after_writes(mut self, n: usize) -> Self {
        self.fail_after_writes = Some(n);
        self
    }

    /// Keep the stream open and silent after the script instead of ending it.
    pub fn stall_after_script(mut self) -> Self {
        self.stall_after_script = true;
        self
    }

    pub fn wire(&self) -> Wire {
        self.wire.clone()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, endpoint: &Endpoint) -> Result<Box<dyn Transport>, TransportError> {
        if self.refuse {
            return Err(TransportError::Refused(endpoint.to_string()));
        }
        {
            let mut state = self.wire.state.lock();
            state.endpoints.push(endpoint.clone());
            state.closed = false;
        }
        Ok(Box::new(MemoryTransport {
            inbound: self.script.iter().cloned().collect(),
            writes: 0,
            fail_after_writes: self.fail_after_writes,
            stall_after_script: self.stall_after_script,
            wire: self.wire.clone(),
        }))
    }
}

pub struct MemoryTransport {
    inbound: VecDeque<String>,
    writes: usize,
    fail_after_writes: Option<usize>,
    stall_after_script: bool,
    wire: Wire,
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        if self.wire.is_closed() {
            return Err(TransportError::Closed);
        }
        match self.inbound.pop_front() {
            Some(line) => Ok(Some(line)),
            None if self.stall_after_script => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        if self.wire.is_closed() {
            return Err(TransportError::Closed);
        }
        if self.fail_after_writes.is_some_and(|n| self.writes >= n) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset").into());
        }
        self.writes += 1;
        self.wire.state.lock().written.push(line.to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.wire.state.lock().closed = true;
        Ok(())
    }
}

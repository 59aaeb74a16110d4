//! One IRC session: connect, register, speak, leave.
//!
//! An [`IrcSession`] delivers a single batch of lines and is then spent.
//! Every line sent or received lands in its transcript; lines carrying a
//! password are recorded with the password replaced by `****`.

mod state;

pub use self::state::SessionState;

use std::future::Future;
use std::time::Duration;

use ircrelay_proto::{Command, MAX_LINE_LEN, ProtocolError, has_numeric, is_from_nickserv, ping_token};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{SessionError, TransportError};
use crate::transcript::TranscriptRecorder;
use crate::transport::{Connector, Endpoint, Transport};

/// What NickServ is addressed as.
pub const NICKSERV: &str = "NICKSERV";

/// Redaction placeholder for secrets in the transcript.
pub const REDACTED: &str = "****";

/// Quiet period that ends the NickServ wait once NickServ has answered.
pub const NICKSERV_SETTLE: Duration = Duration::from_secs(1);

/// The mode field of `USER`; no modes requested.
const USER_MODE: &str = "8";

pub struct IrcSession {
    config: SessionConfig,
    state: SessionState,
    transcript: TranscriptRecorder,
    welcomed: bool,
}

impl IrcSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            transcript: TranscriptRecorder::new(),
            welcomed: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn transcript(&self) -> &TranscriptRecorder {
        &self.transcript
    }

    pub fn into_transcript(self) -> TranscriptRecorder {
        self.transcript
    }

    /// Whether the server's `004` was seen before the stream ended.
    pub fn welcomed(&self) -> bool {
        self.welcomed
    }

    fn advance(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "session cannot move from {} to {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "session state");
        self.state = next;
    }

    /// Deliver `lines` to the configured channel.
    ///
    /// Returns the number of message lines sent. The transport is closed on
    /// every path, and the session always ends in [`SessionState::Closed`].
    pub async fn run(
        &mut self,
        connector: &dyn Connector,
        lines: &[String],
    ) -> Result<usize, SessionError> {
        let endpoint = Endpoint {
            host: self.config.host.clone(),
            port: self.config.port,
            tls: self.config.use_ssl,
        };

        self.advance(SessionState::Connecting);
        let connected = self.bounded(connector.connect(&endpoint)).await;
        let mut transport = match connected {
            Ok(transport) => transport,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "connection failed");
                self.advance(SessionState::Closed);
                return Err(e);
            }
        };
        debug!(endpoint = %endpoint, "connected");

        let result = self.converse(transport.as_mut(), lines).await;

        if let Err(e) = transport.close().await {
            warn!(error = %e, "error closing transport");
        }
        self.advance(SessionState::Closed);
        result
    }

    async fn converse(
        &mut self,
        transport: &mut dyn Transport,
        lines: &[String],
    ) -> Result<usize, SessionError> {
        if let Some(password) = self.config.password.clone() {
            self.advance(SessionState::Authenticating);
            self.send_redacted(
                transport,
                Command::PASS(password.expose().to_string()),
                Command::PASS(REDACTED.to_string()),
            )
            .await?;
        }

        self.advance(SessionState::Registering);
        let nick = self.config.nick.clone();
        self.send(transport, Command::NICK(nick.clone())).await?;
        let realname = self.config.realname.clone();
        self.send(transport, Command::USER(nick, USER_MODE.to_string(), realname))
            .await?;

        self.advance(SessionState::AwaitingWelcome);
        self.await_welcome(transport).await?;

        if let Some(password) = self.config.nickserv_password.clone() {
            self.advance(SessionState::IdentifyingWithNickServ);
            self.send_redacted(
                transport,
                Command::PRIVMSG(NICKSERV.to_string(), format!("IDENTIFY {}", password.expose())),
                Command::PRIVMSG(NICKSERV.to_string(), format!("IDENTIFY {REDACTED}")),
            )
            .await?;
            self.await_nickserv(transport).await?;
        }

        let channel = self.config.channel.clone();
        self.advance(SessionState::Joining);
        self.send(transport, Command::JOIN(channel.clone())).await?;

        self.advance(SessionState::Sending);
        let mut sent = 0;
        for line in lines.iter().filter(|l| !l.is_empty()) {
            if sent > 0 && !self.config.message_delay.is_zero() {
                tokio::time::sleep(self.config.message_delay).await;
            }
            let command = if self.config.notice {
                Command::NOTICE(channel.clone(), line.clone())
            } else {
                Command::PRIVMSG(channel.clone(), line.clone())
            };
            self.send(transport, command).await?;
            sent += 1;
        }

        self.advance(SessionState::Parting);
        self.send(transport, Command::PART(channel, None)).await?;

        self.advance(SessionState::Quitting);
        self.send(transport, Command::QUIT(None)).await?;

        Ok(sent)
    }

    /// Read until `004` or end of stream. Reaching the end without a
    /// welcome is not an error: the server may simply be terse.
    async fn await_welcome(&mut self, transport: &mut dyn Transport) -> Result<(), SessionError> {
        while let Some(line) = self.read(transport).await? {
            if has_numeric(&line, "004") {
                self.welcomed = true;
                return Ok(());
            }
        }
        debug!("stream ended before welcome");
        Ok(())
    }

    /// Read and record every line until the stream ends.
    ///
    /// Servers that keep the stream open after NickServ has answered are
    /// given [`NICKSERV_SETTLE`] of silence before the session moves on, so
    /// confirmations sent after the reply (`900 ... logged in`) are still
    /// recorded.
    async fn await_nickserv(&mut self, transport: &mut dyn Transport) -> Result<(), SessionError> {
        let mut replied = false;
        loop {
            let line = if replied {
                let settle = NICKSERV_SETTLE.min(self.config.read_timeout);
                match tokio::time::timeout(settle, transport.read_line()).await {
                    Ok(line) => line?,
                    Err(_) => {
                        debug!("no more lines after NickServ reply");
                        return Ok(());
                    }
                }
            } else {
                self.bounded(transport.read_line()).await?
            };

            let Some(line) = self.accept(transport, line).await? else {
                return Ok(());
            };
            if !replied && is_from_nickserv(&line) {
                debug!("NickServ replied");
                replied = true;
            }
        }
    }

    /// Read one line, recording it and answering `PING`.
    async fn read(&mut self, transport: &mut dyn Transport) -> Result<Option<String>, SessionError> {
        let line = self.bounded(transport.read_line()).await?;
        self.accept(transport, line).await
    }

    async fn accept(
        &mut self,
        transport: &mut dyn Transport,
        line: Option<String>,
    ) -> Result<Option<String>, SessionError> {
        let Some(line) = line else {
            return Ok(None);
        };
        let line = line.trim().to_string();
        self.transcript.record_inbound(line.clone());

        if let Some(token) = ping_token(&line) {
            self.send(transport, Command::PONG(token.to_string())).await?;
        }
        Ok(Some(line))
    }

    async fn send(&mut self, transport: &mut dyn Transport, command: Command) -> Result<(), SessionError> {
        self.write(transport, &command, None).await
    }

    async fn send_redacted(
        &mut self,
        transport: &mut dyn Transport,
        command: Command,
        redacted: Command,
    ) -> Result<(), SessionError> {
        self.write(transport, &command, Some(&redacted)).await
    }

    /// Write one command, then record it. A failed write is not recorded.
    async fn write(
        &mut self,
        transport: &mut dyn Transport,
        command: &Command,
        redacted: Option<&Command>,
    ) -> Result<(), SessionError> {
        command.validate().map_err(TransportError::from)?;
        let line = command.to_string();
        if line.len() + 2 > MAX_LINE_LEN {
            return Err(TransportError::from(ProtocolError::MessageTooLong {
                actual: line.len() + 2,
                limit: MAX_LINE_LEN,
            })
            .into());
        }

        self.bounded(transport.write_line(&line)).await?;

        let recorded = redacted.map_or(line, ToString::to_string);
        debug!(line = %recorded, "sent");
        self.transcript.record_outbound(recorded);
        Ok(())
    }

    /// Bound an I/O step by the read timeout, blaming the current state.
    async fn bounded<T>(
        &self,
        step: impl Future<Output = Result<T, TransportError>>,
    ) -> Result<T, SessionError> {
        let after = self.config.read_timeout;
        match tokio::time::timeout(after, step).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(SessionError::Timeout {
                phase: self.state,
                after,
            }),
        }
    }
}

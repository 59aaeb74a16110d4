//! ircrelay - repository events to IRC.
//!
//! Each notification gets its own short-lived IRC connection: register,
//! optionally identify with NickServ, join, say a few lines, part, quit.
//! The session transcript is kept for operators with every password
//! replaced by `****`.
//!
//! - [`event`]: webhook payloads lowered into a closed [`event::Event`] type
//! - [`render`]: events to coloured, length-bounded lines
//! - [`session`]: the connection state machine
//! - [`relay`]: wiring for one delivery

pub mod config;
pub mod error;
pub mod event;
pub mod links;
pub mod relay;
pub mod render;
pub mod session;
pub mod transcript;
pub mod transport;
pub mod visibility;

pub use config::{Config, ConfigError, SessionConfig};
pub use error::{RenderError, SessionError, TransportError};
pub use event::{Event, EventKind, RepoRef};
pub use relay::{Delivery, Notification, Relay, RelayError};
pub use session::{IrcSession, SessionState};
pub use transcript::TranscriptRecorder;

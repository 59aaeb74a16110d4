//! # ircrelay-proto
//!
//! The client half of the IRC wire format, as much of it as a notification
//! relay needs: registering, joining, speaking and leaving.
//!
//! - [`Command`]: the outbound verbs and their serialization
//! - [`colors`]: mIRC formatting codes and stripping
//! - [`numeric`]: recognising numeric replies and `PING` in raw lines
//! - [`line::LineCodec`]: CRLF framing for tokio (feature `tokio`)
//!
//! ```rust
//! use ircrelay_proto::Command;
//!
//! let user = Command::USER("bot".into(), "8".into(), "mojombo/grit".into());
//! assert_eq!(user.to_string(), "USER bot 8 * :mojombo/grit");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod colors;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod numeric;

pub use self::colors::{Color, FormattedStringExt, Style};
pub use self::command::Command;
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::numeric::{has_numeric, is_from_nickserv, ping_token};

/// Maximum length of an outbound IRC line, CRLF included (RFC 1459).
pub const MAX_LINE_LEN: usize = 512;

/// Maximum length accepted for an inbound line. Servers that speak IRCv3
/// message tags can exceed [`MAX_LINE_LEN`].
pub const MAX_INBOUND_LINE_LEN: usize = 8191;

//! Outbound IRC commands and their wire serialization.

use std::fmt::{self, Write};

use crate::error::{ProtocolError, Result};

/// The commands a relay client sends.
///
/// Variant names follow the IRC verbs so call sites read like the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `PASS <password>`
    PASS(String),
    /// `NICK <nickname>`
    NICK(String),
    /// `USER <username> <mode> * :<realname>`
    USER(String, String, String),
    /// `JOIN <channel>`
    JOIN(String),
    /// `PART <channel> [:<message>]`
    PART(String, Option<String>),
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `NOTICE <target> :<text>`
    NOTICE(String, String),
    /// `PONG :<token>`
    PONG(String),
    /// `QUIT [:<message>]`
    QUIT(Option<String>),
}

impl Command {
    /// The IRC verb for this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::PASS(_) => "PASS",
            Command::NICK(_) => "NICK",
            Command::USER(..) => "USER",
            Command::JOIN(_) => "JOIN",
            Command::PART(..) => "PART",
            Command::PRIVMSG(..) => "PRIVMSG",
            Command::NOTICE(..) => "NOTICE",
            Command::PONG(_) => "PONG",
            Command::QUIT(_) => "QUIT",
        }
    }

    fn params(&self) -> Vec<&str> {
        match self {
            Command::PASS(p) | Command::NICK(p) | Command::JOIN(p) | Command::PONG(p) => vec![p.as_str()],
            Command::USER(u, m, r) => vec![u.as_str(), m.as_str(), r.as_str()],
            Command::PART(c, m) => std::iter::once(c.as_str()).chain(m.as_deref()).collect(),
            Command::PRIVMSG(t, m) | Command::NOTICE(t, m) => vec![t.as_str(), m.as_str()],
            Command::QUIT(m) => m.as_deref().into_iter().collect(),
        }
    }

    /// Reject parameters that would let text escape its line.
    ///
    /// `Display` cannot report which command failed, so callers that write
    /// to the wire check here first.
    pub fn validate(&self) -> Result<()> {
        let injected = self
            .params()
            .iter()
            .any(|p| p.bytes().any(|b| b == b'\r' || b == b'\n' || b == 0));
        if injected {
            return Err(ProtocolError::InvalidParam {
                command: self.verb(),
            });
        }
        Ok(())
    }
}

/// Check if a string needs colon-prefixing as a trailing IRC argument.
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Write `cmd` and its arguments, colon-prefixing the last one only when
/// the grammar requires it.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    for (i, arg) in args.iter().enumerate() {
        f.write_char(' ')?;
        if i == args.len() - 1 && needs_colon_prefix(arg) {
            f.write_char(':')?;
        }
        f.write_str(arg)?;
    }
    Ok(())
}

/// Like [`write_cmd`], but the last argument is always colon-prefixed.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    for (i, arg) in args.iter().enumerate() {
        f.write_char(' ')?;
        if i == args.len() - 1 {
            f.write_char(':')?;
        }
        f.write_str(arg)?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            // The hostname slot is unused by servers; `*` fills it.
            Command::USER(u, m, r) => write_cmd_freeform(f, "USER", &[u, m, "*", r]),
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, Some(m)) => write_cmd_freeform(f, "PART", &[c, m]),
            Command::PART(c, None) => write_cmd(f, "PART", &[c]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::PONG(t) => write_cmd_freeform(f, "PONG", &[t]),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::QUIT(None) => write_cmd(f, "QUIT", &[]),
        }
    }
}

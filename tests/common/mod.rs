//! Integration test common infrastructure.
//!
//! Payload fixtures, stub collaborators and a scripted TCP server standing
//! in for both the IRC network and the repository API.

pub mod fixtures;
pub mod server;
pub mod stubs;

use std::sync::Arc;

use ircrelay::Relay;
use ircrelay::config::IrcConfig;
use ircrelay::transport::MemoryConnector;

#[allow(unused_imports)]
pub use server::ScriptedServer;
#[allow(unused_imports)]
pub use stubs::{StubResolver, StubShortener};

/// What the fake server sends: the welcome, then NickServ's confirmation.
#[allow(dead_code)]
pub const WELCOME_SCRIPT: [&str; 2] = [
    " 004 n ",
    ":NickServ!nickserv@network.net PRIVMSG n :Successfully authenticated as n.",
];

/// `[irc]` settings for nick `n` in room `r`, plus `extra` TOML lines.
#[allow(dead_code)]
pub fn irc_config(extra: &str) -> IrcConfig {
    toml::from_str(&format!(
        "host = \"irc.test\"\nnick = \"n\"\nroom = \"r\"\nrealname_prefix = \"GitHub IRCBot\"\n{extra}"
    ))
    .expect("valid irc config")
}

/// A relay over an in-memory connection replaying [`WELCOME_SCRIPT`].
#[allow(dead_code)]
pub fn memory_relay(extra: &str) -> (Relay, MemoryConnector) {
    let connector = MemoryConnector::new(WELCOME_SCRIPT);
    let relay = Relay::new(
        irc_config(extra),
        Arc::new(connector.clone()),
        Arc::new(StubResolver::default()),
    )
    .with_shortener(Arc::new(StubShortener::default()));
    (relay, connector)
}

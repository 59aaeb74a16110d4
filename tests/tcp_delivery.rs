//! Deliveries over real sockets to a scripted server.

mod common;

use std::sync::Arc;

use common::{ScriptedServer, StubResolver, WELCOME_SCRIPT, fixtures, irc_config};
use ircrelay::transport::NetConnector;
use ircrelay::{EventKind, Notification, Relay};

fn relay(port: u16, extra: &str) -> Relay {
    let mut irc = irc_config(&format!("port = {port}\n{extra}"));
    irc.host = "127.0.0.1".into();
    Relay::new(irc, Arc::new(NetConnector::new()), Arc::new(StubResolver::default()))
}

#[tokio::test]
async fn test_push_over_tcp() {
    let server = ScriptedServer::spawn(&WELCOME_SCRIPT).await.unwrap();
    let relay = relay(server.port(), "nickserv_password = \"pass\"\nlong_url = true");

    let delivery = relay
        .deliver(&Notification::new(EventKind::Push, fixtures::push()))
        .await
        .unwrap();
    assert_eq!(delivery.messages, 4);
    assert!(delivery.welcomed);

    let received = server.received().await.unwrap();
    assert_eq!(received[0], "NICK n");
    assert_eq!(received[1], "USER n 8 * :GitHub IRCBot - mojombo/grit");
    assert_eq!(received[2], "PRIVMSG NICKSERV :IDENTIFY pass");
    assert_eq!(received[3], "JOIN #r");
    assert_eq!(received.len(), 10);
    assert_eq!(received[9], "QUIT");

    let outbound: Vec<_> = delivery.transcript.outbound().collect();
    assert_eq!(outbound.len(), received.len());
    assert_eq!(outbound[2], "PRIVMSG NICKSERV :IDENTIFY ****");
}

#[tokio::test]
async fn test_terse_server_without_welcome() {
    let server = ScriptedServer::spawn(&[]).await.unwrap();
    let relay = relay(server.port(), "branches = \"ticket\"");

    let delivery = relay
        .deliver(&Notification::new(EventKind::Push, fixtures::push()))
        .await
        .unwrap();
    assert_eq!(delivery.messages, 0);
    assert!(!delivery.welcomed);

    let received = server.received().await.unwrap();
    assert_eq!(
        received,
        ["NICK n", "USER n 8 * :GitHub IRCBot - mojombo/grit", "JOIN #r", "PART #r", "QUIT"]
    );
}

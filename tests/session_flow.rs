//! End-to-end deliveries over the in-memory transport.
//!
//! Each test runs a full relay: payload in, wire lines and transcript out.

mod common;

use std::sync::Arc;

use common::{StubResolver, StubShortener, WELCOME_SCRIPT, fixtures, irc_config, memory_relay};
use ircrelay::transport::MemoryConnector;
use ircrelay::{EventKind, Notification, Relay, RelayError};
use ircrelay_proto::FormattedStringExt;
use serde_json::Value;

fn matches_privmsg(line: &str) -> bool {
    line.starts_with("PRIVMSG #r :") && line.contains("grit")
}

/// Deliver and return the wire lines and the transcript snapshot.
async fn deliver(extra: &str, kind: EventKind, payload: Value) -> (Vec<String>, String) {
    let (relay, connector) = memory_relay(extra);
    let delivery = relay
        .deliver(&Notification::new(kind, payload))
        .await
        .expect("delivery succeeds");
    (connector.wire().written(), delivery.transcript.snapshot())
}

/// Assert the registration prefix and the part/quit suffix, returning the
/// message lines in between.
fn message_lines(written: &[String]) -> &[String] {
    assert_eq!(written[0], "NICK n");
    assert!(written[1].starts_with("USER n 8 * :"), "{:?}", written[1]);
    assert_eq!(written[2], "JOIN #r");
    let n = written.len();
    assert_eq!(written[n - 2], "PART #r");
    assert_eq!(written[n - 1], "QUIT");
    &written[3..n - 2]
}

/// Split a snapshot into (inbound, outbound) lines without markers.
fn split_transcript(snapshot: &str) -> (Vec<&str>, Vec<&str>) {
    let mut lines = snapshot.lines();
    assert_eq!(lines.next(), Some("IRC Log:"));
    let mut inbound = Vec::new();
    let mut outbound = Vec::new();
    for line in lines {
        if let Some(text) = line.strip_prefix("=> ") {
            inbound.push(text);
        } else if let Some(text) = line.strip_prefix(">> ") {
            outbound.push(text);
        } else {
            panic!("unmarked transcript line: {line:?}");
        }
    }
    (inbound, outbound)
}

#[tokio::test]
async fn test_push() {
    let (written, snapshot) = deliver("", EventKind::Push, fixtures::push()).await;
    let messages = message_lines(&written);
    assert_eq!(messages.len(), 4);
    assert!(messages.iter().all(|l| matches_privmsg(l)));

    let (inbound, outbound) = split_transcript(&snapshot);
    assert_eq!(inbound, ["004 n"]);
    assert_eq!(outbound, written);
}

#[tokio::test]
async fn test_push_with_password() {
    let (written, snapshot) = deliver("password = \"pass\"", EventKind::Push, fixtures::push()).await;
    assert_eq!(written[0], "PASS pass");
    assert_eq!(message_lines(&written[1..]).len(), 4);

    let (inbound, outbound) = split_transcript(&snapshot);
    assert_eq!(inbound, ["004 n"]);
    assert_eq!(outbound[0], "PASS ****");
    assert_eq!(outbound[1..], written[1..]);
    assert!(!snapshot.contains("pass"));
}

#[tokio::test]
async fn test_push_with_nickserv() {
    let (written, snapshot) =
        deliver("nickserv_password = \"pass\"", EventKind::Push, fixtures::push()).await;
    assert_eq!(written[0], "NICK n");
    assert!(written[1].starts_with("USER n"));
    assert_eq!(written[2], "PRIVMSG NICKSERV :IDENTIFY pass");
    assert_eq!(written[3], "JOIN #r");
    assert_eq!(written.len(), 4 + 4 + 2);

    let (inbound, outbound) = split_transcript(&snapshot);
    assert_eq!(inbound, WELCOME_SCRIPT.map(str::trim));
    assert_eq!(outbound[2], "PRIVMSG NICKSERV :IDENTIFY ****");
    assert!(!snapshot.contains("pass"));
}

#[tokio::test]
async fn test_push_with_empty_branches() {
    let (written, _) = deliver("branches = \"\"", EventKind::Push, fixtures::push()).await;
    assert_eq!(message_lines(&written).len(), 4);
}

#[tokio::test]
async fn test_push_with_single_matching_branches() {
    let (written, _) = deliver("branches = \"master\"", EventKind::Push, fixtures::push()).await;
    assert_eq!(message_lines(&written).len(), 4);
}

#[tokio::test]
async fn test_push_with_multiple_branches() {
    let (written, _) =
        deliver("branches = \"master,ticket\"", EventKind::Push, fixtures::push()).await;
    assert_eq!(message_lines(&written).len(), 4);
}

#[tokio::test]
async fn test_push_with_non_matching_branches() {
    let (written, _) = deliver("branches = \"ticket\"", EventKind::Push, fixtures::push()).await;
    assert!(message_lines(&written).is_empty());
    assert_eq!(written, ["NICK n", "USER n 8 * :GitHub IRCBot - mojombo/grit", "JOIN #r", "PART #r", "QUIT"]);
}

#[tokio::test]
async fn test_single_line_events() {
    let cases = [
        (EventKind::CommitComment, fixtures::commit_comment()),
        (EventKind::PullRequest, fixtures::pull_request()),
        (EventKind::Issues, fixtures::issues()),
        (EventKind::IssueComment, fixtures::issue_comment()),
    ];
    for (kind, payload) in cases {
        let (written, _) = deliver("", kind, payload).await;
        let messages = message_lines(&written);
        assert_eq!(messages.len(), 1, "{kind}: {written:?}");
        assert!(matches_privmsg(&messages[0]), "{kind}: {:?}", messages[0]);
    }
}

#[tokio::test]
async fn test_pull_request_review_comment() {
    let (written, _) = deliver(
        "",
        EventKind::PullRequestReviewComment,
        fixtures::pull_request_review_comment(),
    )
    .await;
    let messages = message_lines(&written);
    assert_eq!(messages.len(), 1);
    assert!(matches_privmsg(&messages[0]));
    assert!(messages[0].contains("pull request #5 "), "{:?}", messages[0]);
}

#[tokio::test]
async fn test_gollum() {
    let (written, _) = deliver("", EventKind::Gollum, fixtures::gollum()).await;
    let messages = message_lines(&written);
    assert_eq!(messages.len(), 1);
    let plain = messages[0].as_str().strip_formatting();
    assert!(
        plain.starts_with("PRIVMSG #r :[grit] defunkt created wiki page Foo"),
        "{plain:?}"
    );
}

#[tokio::test]
async fn test_line_breaks_in_titles_stay_in_one_message() {
    let mut payload = fixtures::issues();
    payload["issue"]["title"] = "Crash on start\nsee logs".into();
    let (written, _) = deliver("", EventKind::Issues, payload).await;
    let messages = message_lines(&written);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Crash on start see logs"), "{:?}", messages[0]);
}

#[tokio::test]
async fn test_no_colors() {
    let (written, _) = deliver("", EventKind::PullRequest, fixtures::pull_request()).await;
    let privmsg = &written[3];
    assert!(matches_privmsg(privmsg));
    assert!(privmsg.contains('\x03'));

    let (written, _) = deliver("no_colors = true", EventKind::PullRequest, fixtures::pull_request()).await;
    let privmsg = &written[3];
    assert!(matches_privmsg(privmsg));
    assert!(!privmsg.contains('\x03'));
}

#[tokio::test]
async fn test_public_repo_format_in_irc_realname() {
    let (written, _) = deliver("", EventKind::Push, fixtures::push()).await;
    assert!(written.contains(&"USER n 8 * :GitHub IRCBot - mojombo/grit".to_string()));
}

#[tokio::test]
async fn test_private_repo_format_in_irc_realname() {
    let (written, _) = deliver("", EventKind::Push, fixtures::push_to("private")).await;
    assert!(written.contains(&"USER n 8 * :GitHub IRCBot - mojombo".to_string()));
}

#[tokio::test]
async fn test_links_are_shortened_unless_long_url() {
    let (written, _) = deliver("no_colors = true", EventKind::Issues, fixtures::issues()).await;
    assert!(written[3].ends_with(" short"), "{:?}", written[3]);

    let (written, _) =
        deliver("no_colors = true\nlong_url = true", EventKind::Issues, fixtures::issues()).await;
    assert!(
        written[3].ends_with(" https://github.com/mojombo/grit/issues/5"),
        "{:?}",
        written[3]
    );
}

#[tokio::test]
async fn test_notice_mode() {
    let (written, _) = deliver("notice = true", EventKind::Issues, fixtures::issues()).await;
    assert!(written[3].starts_with("NOTICE #r :"));
}

#[tokio::test]
async fn test_malformed_payload_still_joins_and_parts() {
    let payload = serde_json::json!({ "repository": { "name": "grit", "owner": { "login": "mojombo" } } });
    let (written, _) = deliver("", EventKind::Issues, payload).await;
    assert!(message_lines(&written).is_empty());
}

#[tokio::test]
async fn test_refused_connection_reports_transcript() {
    let relay = Relay::new(
        irc_config(""),
        Arc::new(MemoryConnector::refusing()),
        Arc::new(StubResolver::default()),
    )
    .with_shortener(Arc::new(StubShortener::default()));

    let err = relay
        .deliver(&Notification::new(EventKind::Push, fixtures::push()))
        .await
        .unwrap_err();
    match &err {
        RelayError::Session { source, transcript } => {
            assert_eq!(source.error_code(), "connection_refused");
            assert_eq!(transcript.snapshot(), "IRC Log:");
        }
        other => panic!("expected session error, got {other:?}"),
    }
}

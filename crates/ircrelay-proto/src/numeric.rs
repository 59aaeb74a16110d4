//! Recognising the few server lines a relay reacts to.
//!
//! Lines are matched loosely on purpose: the relay never parses replies, it
//! only looks for a numeric token or a `PING` to answer.

/// Returns true if any space-separated token of `line` is exactly `code`.
///
/// ```
/// use ircrelay_proto::has_numeric;
///
/// assert!(has_numeric(":irc.example 004 bot irc.example ircd-2.11", "004"));
/// assert!(has_numeric(" 004 n ", "004"));
/// assert!(!has_numeric(":irc.example 0042 bot", "004"));
/// ```
pub fn has_numeric(line: &str, code: &str) -> bool {
    line.split_ascii_whitespace().any(|token| token == code)
}

/// Extract the token of a `PING`, with or without a server prefix.
///
/// ```
/// use ircrelay_proto::ping_token;
///
/// assert_eq!(ping_token("PING :irc.example"), Some("irc.example"));
/// assert_eq!(ping_token(":hub PING :12345"), Some("12345"));
/// assert_eq!(ping_token("PRIVMSG #r :PING me"), None);
/// ```
pub fn ping_token(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    if rest.starts_with(':') {
        rest = rest.split_once(' ')?.1.trim_start();
    }
    let (verb, args) = rest.split_once(' ').unwrap_or((rest, ""));
    if !verb.eq_ignore_ascii_case("PING") {
        return None;
    }
    let token = args.trim();
    Some(token.strip_prefix(':').unwrap_or(token))
}

/// Returns true if the line was sent by the NickServ service bot.
pub fn is_from_nickserv(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(':')
        .and_then(|prefix| prefix.split(['!', '@', ' ']).next())
        .is_some_and(|nick| nick.eq_ignore_ascii_case("nickserv"))
}

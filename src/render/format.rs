//! Colour conventions for announcement lines.

use ircrelay_proto::colors::{colorize, colorize_styled, stylize};
use ircrelay_proto::{Color, Style};

pub(super) fn repo(name: &str) -> String {
    colorize(Color::Pink, name)
}

pub(super) fn name(name: &str) -> String {
    colorize(Color::Grey, name)
}

pub(super) fn branch(branch: &str) -> String {
    colorize(Color::Purple, branch)
}

pub(super) fn tag(tag: &str) -> String {
    stylize(Style::Bold, tag)
}

/// Abbreviated commit id.
pub(super) fn hash(sha: &str) -> String {
    colorize(Color::Grey, short_sha(sha))
}

pub(super) fn number(n: usize) -> String {
    stylize(Style::Bold, n)
}

pub(super) fn url(url: &str) -> String {
    colorize_styled(Color::Blue, Style::Underline, url)
}

/// Red marker for destructive pushes.
pub(super) fn alert(word: &str) -> String {
    colorize(Color::Red, word)
}

pub(super) fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// First line of a message, with `...` when anything follows it.
pub(super) fn first_line(text: &str) -> String {
    let text = text.trim();
    match text.split_once(['\r', '\n']) {
        Some((first, _)) => format!("{}...", first.trim_end()),
        None => text.to_string(),
    }
}

/// `word` or `words`, by count.
pub(super) fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("fix bug"), "fix bug");
        assert_eq!(first_line("fix bug\r\n\nlong story"), "fix bug...");
        assert_eq!(first_line("  padded \n"), "padded");
        assert_eq!(first_line("old mac\rline"), "old mac...");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "commit"), "commit");
        assert_eq!(plural(0, "commit"), "commits");
        assert_eq!(plural(3, "page"), "pages");
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("06f63b43050935962f84fe54473a7c5de7977325"), "06f63b4");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_url_is_underlined_blue() {
        assert_eq!(url("u"), "\x0302\x1Fu\x0F");
    }
}

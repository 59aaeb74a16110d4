//! mIRC formatting codes: producing them and stripping them.
//!
//! # Codes
//! - 0x02 (^B): Bold
//! - 0x03 (^C): Color, followed by a two digit foreground number
//! - 0x0F (^O): Reset all formatting
//! - 0x16 (^V): Reverse
//! - 0x1F (^_): Underline

use std::borrow::Cow;
use std::fmt;

/// The color-introducer byte.
pub const COLOR: char = '\x03';
/// Ends every formatted run.
pub const RESET: char = '\x0F';

const FORMAT_CHARS: &[char] = &['\x02', COLOR, RESET, '\x16', '\x1F'];

/// The sixteen standard mIRC colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
    Blue,
    Green,
    Red,
    Brown,
    Purple,
    Orange,
    Yellow,
    Lime,
    Teal,
    Aqua,
    Royal,
    Pink,
    Grey,
    Silver,
}

impl Color {
    /// Numeric color code as sent after ^C.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Non-color text attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// ^B
    Bold,
    /// ^_
    Underline,
}

impl Style {
    fn control(self) -> char {
        match self {
            Style::Bold => '\x02',
            Style::Underline => '\x1F',
        }
    }
}

/// Wrap `text` in a color run, always using two digits so text that begins
/// with a digit is not swallowed into the code.
pub fn colorize(color: Color, text: impl fmt::Display) -> String {
    format!("{COLOR}{:02}{text}{RESET}", color.code())
}

/// Wrap `text` in a style run.
pub fn stylize(style: Style, text: impl fmt::Display) -> String {
    format!("{}{text}{RESET}", style.control())
}

/// Wrap `text` in a color run with an extra style, e.g. underlined blue links.
pub fn colorize_styled(color: Color, style: Style, text: impl fmt::Display) -> String {
    format!(
        "{COLOR}{:02}{}{text}{RESET}",
        color.code(),
        style.control()
    )
}

/// Extension trait for handling formatted IRC strings.
pub trait FormattedStringExt<'a> {
    /// Check if the string contains any IRC formatting codes.
    fn is_formatted(&self) -> bool;

    /// Strip all IRC formatting codes, including color numbers.
    ///
    /// Returns `Cow::Borrowed` if no formatting was present.
    fn strip_formatting(self) -> Cow<'a, str>;
}

impl<'a> FormattedStringExt<'a> for &'a str {
    fn is_formatted(&self) -> bool {
        self.contains(FORMAT_CHARS)
    }

    fn strip_formatting(self) -> Cow<'a, str> {
        if !self.is_formatted() {
            return Cow::Borrowed(self);
        }

        let mut parser = ColorParser::new();
        Cow::Owned(self.chars().filter(|&c| parser.consume(c)).collect())
    }
}

impl FormattedStringExt<'static> for String {
    fn is_formatted(&self) -> bool {
        self.as_str().is_formatted()
    }

    fn strip_formatting(mut self) -> Cow<'static, str> {
        if self.is_formatted() {
            let mut parser = ColorParser::new();
            self.retain(|c| parser.consume(c));
        }
        Cow::Owned(self)
    }
}

enum State {
    Text,
    /// Just saw ^C
    ColorStart,
    /// One foreground digit seen
    Foreground1(char),
    /// Two foreground digits seen
    Foreground2,
    /// Comma after foreground
    Comma,
    /// One background digit seen
    Background1(char),
}

struct ColorParser {
    state: State,
}

impl ColorParser {
    fn new() -> Self {
        Self { state: State::Text }
    }

    /// Returns true if `c` is visible text.
    fn consume(&mut self, c: char) -> bool {
        use State::*;

        match self.state {
            Text | Foreground1(_) | Foreground2 if c == COLOR => {
                self.state = ColorStart;
                false
            }
            Text => !FORMAT_CHARS.contains(&c),
            ColorStart if c.is_ascii_digit() => {
                self.state = Foreground1(c);
                false
            }
            Foreground1('0') if c.is_ascii_digit() => {
                self.state = Foreground2;
                false
            }
            Foreground1('1') if c.is_ascii_digit() && c < '6' => {
                self.state = Foreground2;
                false
            }
            Foreground1(_) | Foreground2 if c == ',' => {
                self.state = Comma;
                false
            }
            Comma if c.is_ascii_digit() => {
                self.state = Background1(c);
                false
            }
            Background1('0') if c.is_ascii_digit() => {
                self.state = Text;
                false
            }
            Background1('1') if c.is_ascii_digit() && c < '6' => {
                self.state = Text;
                false
            }
            _ => {
                self.state = Text;
                !FORMAT_CHARS.contains(&c)
            }
        }
    }
}

//! Chronological log of one session's traffic.
//!
//! The recorder stores exactly what it is given. Callers holding a secret
//! pass the already redacted line; nothing here inspects content.

use std::fmt;

/// Header line of every snapshot.
pub const HEADER: &str = "IRC Log:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn marker(self) -> &'static str {
        match self {
            Direction::Inbound => "=> ",
            Direction::Outbound => ">> ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub direction: Direction,
    pub text: String,
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.marker(), self.text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptRecorder {
    entries: Vec<TranscriptEntry>,
}

impl TranscriptRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_outbound(&mut self, text: impl Into<String>) {
        self.push(Direction::Outbound, text.into());
    }

    pub fn record_inbound(&mut self, text: impl Into<String>) {
        self.push(Direction::Inbound, text.into());
    }

    fn push(&mut self, direction: Direction, text: String) {
        self.entries.push(TranscriptEntry { direction, text });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Lines sent, in order, without markers.
    pub fn outbound(&self) -> impl Iterator<Item = &str> {
        self.lines(Direction::Outbound)
    }

    /// Lines received, in order, without markers.
    pub fn inbound(&self) -> impl Iterator<Item = &str> {
        self.lines(Direction::Inbound)
    }

    fn lines(&self, direction: Direction) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.direction == direction)
            .map(|e| e.text.as_str())
    }

    /// `IRC Log:` followed by one marked line per entry.
    pub fn snapshot(&self) -> String {
        let mut out = String::from(HEADER);
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.to_string());
        }
        out
    }
}

impl fmt::Display for TranscriptRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_is_header_only() {
        assert_eq!(TranscriptRecorder::new().snapshot(), "IRC Log:");
    }

    #[test]
    fn test_snapshot_interleaves_directions() {
        let mut t = TranscriptRecorder::new();
        t.record_outbound("NICK n");
        t.record_inbound("004 n");
        t.record_outbound("JOIN #r");
        assert_eq!(t.snapshot(), "IRC Log:\n>> NICK n\n=> 004 n\n>> JOIN #r");
        assert_eq!(t.outbound().collect::<Vec<_>>(), ["NICK n", "JOIN #r"]);
        assert_eq!(t.inbound().collect::<Vec<_>>(), ["004 n"]);
    }

    #[test]
    fn test_recorder_stores_text_verbatim() {
        let mut t = TranscriptRecorder::new();
        t.record_outbound("PASS ****");
        assert_eq!(t.entries()[0].to_string(), ">> PASS ****");
    }
}

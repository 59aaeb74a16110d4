//! Session lifecycle states.
//!
//! ```text
//! Idle → Connecting → [Authenticating] → Registering → AwaitingWelcome
//!      → [IdentifyingWithNickServ] → Joining → Sending → Parting → Quitting → Closed
//! ```
//!
//! The bracketed states are entered only when the matching password is
//! configured. Any failure jumps straight to `Closed`.

use std::fmt;

/// Where a session is in its one-shot lifecycle.
///
/// Ordered by lifecycle position, so "has the session moved past X" is a
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
    Idle,
    Connecting,
    Authenticating,
    Registering,
    AwaitingWelcome,
    IdentifyingWithNickServ,
    Joining,
    Sending,
    Parting,
    Quitting,
    Closed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Authenticating => "authenticating",
            Self::Registering => "registering",
            Self::AwaitingWelcome => "awaiting welcome",
            Self::IdentifyingWithNickServ => "identifying with nickserv",
            Self::Joining => "joining",
            Self::Sending => "sending",
            Self::Parting => "parting",
            Self::Quitting => "quitting",
            Self::Closed => "closed",
        }
    }

    /// Whether the session may move from `self` to `next`.
    pub fn can_advance_to(self, next: SessionState) -> bool {
        next > self
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only() {
        assert!(SessionState::Idle.can_advance_to(SessionState::Connecting));
        assert!(SessionState::Connecting.can_advance_to(SessionState::Closed));
        assert!(SessionState::Registering.can_advance_to(SessionState::Joining));
        assert!(!SessionState::Joining.can_advance_to(SessionState::Registering));
        assert!(!SessionState::Closed.can_advance_to(SessionState::Closed));
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::AwaitingWelcome.to_string(), "awaiting welcome");
        assert_eq!(
            SessionState::IdentifyingWithNickServ.to_string(),
            "identifying with nickserv"
        );
    }
}

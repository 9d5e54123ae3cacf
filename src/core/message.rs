//! # Messages
//!
//! A conversation is an append-only list of [`Message`]s. Messages are
//! immutable once created.

use chrono::{SecondsFormat, Utc};

/// Text shown when the backend could not produce a reply.
pub const GENERATION_ERROR_TEXT: &str =
    "Sorry, I encountered an error while generating a response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    pub error: bool,
}

/// Hands out message IDs derived from wall-clock milliseconds.
///
/// IDs never repeat and never go backwards: if the clock hasn't advanced
/// past the previous ID (same millisecond, or a clock step back), the
/// previous ID plus one is used instead.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next ID for a message created at `now_ms`.
    pub fn next_at(&mut self, now_ms: u64) -> u64 {
        let id = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        id
    }

    pub fn next(&mut self) -> u64 {
        self.next_at(now_millis())
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Message {
    pub fn new(id: u64, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: now_iso8601(),
            error: false,
        }
    }

    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, Sender::User, text)
    }

    pub fn ai(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, Sender::Ai, text)
    }

    /// The fixed user-facing notice for a failed generation.
    pub fn generation_error(id: u64) -> Self {
        Self {
            error: true,
            ..Self::new(id, Sender::System, GENERATION_ERROR_TEXT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_clock() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(1_005), 1_005);
    }

    #[test]
    fn test_same_millisecond_ids_are_distinct_and_ordered() {
        let mut ids = IdGenerator::new();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(1_000);
        assert_eq!((a, b, c), (1_000, 1_001, 1_002));
    }

    #[test]
    fn test_clock_step_back_still_increases() {
        let mut ids = IdGenerator::new();
        ids.next_at(5_000);
        assert_eq!(ids.next_at(4_000), 5_001);
        // Clock catches up past the bumped value
        assert_eq!(ids.next_at(6_000), 6_000);
    }

    #[test]
    fn test_generation_error_message() {
        let msg = Message::generation_error(7);
        assert_eq!(msg.sender, Sender::System);
        assert!(msg.error);
        assert_eq!(msg.text, GENERATION_ERROR_TEXT);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let msg = Message::user(1, "hi");
        assert!(!msg.error);
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
        assert!(msg.timestamp.ends_with('Z'));
    }
}

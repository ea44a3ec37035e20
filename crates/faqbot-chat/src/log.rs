//! Append-only conversation transcript.
//!
//! Entries are created with the current wall-clock time and never mutated
//! afterwards. The log only grows for the lifetime of its session; there is
//! no durable storage.

use chrono::{DateTime, Local};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "You"),
            Sender::Bot => write!(f, "Bot"),
        }
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone)]
pub struct ConversationEntry {
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Time-ordered record of the current session's exchange.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry stamped with the current wall-clock time.
    ///
    /// Message content is not validated; empty strings are permitted.
    pub fn append(&mut self, sender: Sender, message: impl Into<String>) {
        self.entries.push(ConversationEntry {
            sender,
            message: message.into(),
            timestamp: Local::now(),
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        log.append(Sender::User, "first");
        log.append(Sender::Bot, "second");
        log.append(Sender::User, "third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[0].sender, Sender::User);
        assert_eq!(entries[1].message, "second");
        assert_eq!(entries[1].sender, Sender::Bot);
        assert_eq!(entries[2].message, "third");
    }

    #[test]
    fn test_append_allows_empty_message() {
        let mut log = ConversationLog::new();
        log.append(Sender::User, "");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].message, "");
    }

    #[test]
    fn test_timestamps_are_monotonic_in_order() {
        let mut log = ConversationLog::new();
        log.append(Sender::User, "a");
        log.append(Sender::Bot, "b");
        let entries = log.entries();
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "You");
        assert_eq!(Sender::Bot.to_string(), "Bot");
    }

    #[test]
    fn test_entries_snapshot_reflects_growth() {
        let mut log = ConversationLog::new();
        assert!(log.entries().is_empty());
        log.append(Sender::Bot, "hello");
        assert_eq!(log.entries().len(), 1);
    }
}

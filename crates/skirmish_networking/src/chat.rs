//! Chat log: the last few lines, each visible for a limited time.

use std::collections::VecDeque;

use crate::{CHAT_EXPIRY_MS, MAX_CHAT_ENTRIES};

/// Author name shown for lines sent by the peer itself.
pub const SERVER_AUTHOR: &str = "Server";

/// One chat line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatEntry {
    /// Author display name, resolved when the line arrived.
    pub author: String,
    /// Text
    pub message: String,
    /// Time after which the line is hidden.
    pub expires_at_ms: u64,
}

/// Capped, time-expiring chat history. Oldest first.
#[derive(Clone, Debug)]
pub struct ChatLog {
    entries: VecDeque<ChatEntry>,
    capacity: usize,
    ttl_ms: u64,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(MAX_CHAT_ENTRIES, CHAT_EXPIRY_MS)
    }
}

impl ChatLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            ttl_ms,
        }
    }

    /// Appends a line, evicting the oldest once over capacity.
    pub fn push(&mut self, author: impl Into<String>, message: impl Into<String>, now_ms: u64) {
        self.entries.push_back(ChatEntry {
            author: author.into(),
            message: message.into(),
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Drops lines whose time is up.
    pub fn prune(&mut self, now_ms: u64) {
        self.entries.retain(|entry| entry.expires_at_ms > now_ms);
    }

    /// Visible lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    /// Number of lines held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_at_ten() {
        let mut log = ChatLog::default();
        for i in 0..12 {
            log.push("alice", format!("line {i}"), 0);
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.iter().next().unwrap().message, "line 2");
    }

    #[test]
    fn test_lines_expire() {
        let mut log = ChatLog::default();
        log.push(SERVER_AUTHOR, "welcome", 0);
        log.push("bob", "hi", 10_000);

        log.prune(14_999);
        assert_eq!(log.len(), 2);
        log.prune(15_000);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().author, "bob");
    }
}

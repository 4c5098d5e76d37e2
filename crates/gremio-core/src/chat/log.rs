//! Displayed message list with identifier-based deduplication.

use super::message::ChatMessage;
use crate::user::UserRole;
use std::collections::HashSet;

/// The message list a chat view renders.
///
/// A message is delivered once it appears on the realtime stream. The same
/// persisted message may arrive twice (local append after REST persist, then
/// the server echo), so entries are deduplicated by identifier before
/// appending. Messages without an identifier are always appended. Order is
/// arrival order.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
    seen: HashSet<i64>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message unless one with the same identifier is already listed.
    ///
    /// Returns `true` when the message was added.
    pub fn append(&mut self, message: ChatMessage) -> bool {
        if let Some(id) = message.id {
            if !self.seen.insert(id) {
                return false;
            }
        }
        self.messages.push(message);
        true
    }

    /// Replaces the list with fetched history.
    ///
    /// Messages that arrived live before the history request resolved and are
    /// absent from it are kept after the history entries.
    pub fn hydrate(&mut self, history: Vec<ChatMessage>) {
        let live = std::mem::take(&mut self.messages);
        self.seen.clear();
        for message in history {
            self.append(message);
        }
        for message in live {
            self.append(message);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.seen.contains(&id)
    }

    /// Number of unread messages written by `sender_role`.
    pub fn unread_from(&self, sender_role: UserRole) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender_role == sender_role && !m.read)
            .count()
    }

    /// Flags every message written by `sender_role` as read.
    pub fn mark_read_from(&mut self, sender_role: UserRole) {
        for message in self
            .messages
            .iter_mut()
            .filter(|m| m.sender_role == sender_role)
        {
            message.read = true;
        }
    }
}

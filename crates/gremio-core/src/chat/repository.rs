//! Chat ports: REST persistence and the realtime channel.

use super::message::ChatMessage;
use super::scope::ConversationScope;
use crate::error::Result;
use crate::user::UserRole;
use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

/// REST side of the messaging client.
///
/// These calls are independent of the realtime channel: they work whether or
/// not a connection is open.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Fetches the stored conversation for a scope, oldest first.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatMessage>)`: Stored messages (may be empty)
    /// - `Err(_)`: Transport or decoding failure
    async fn fetch_history(&self, scope: ConversationScope) -> Result<Vec<ChatMessage>>;

    /// Persists a drafted message.
    ///
    /// # Returns
    ///
    /// - `Ok(ChatMessage)`: The stored copy, with `id` and `created_at` set
    /// - `Err(_)`: Transport or decoding failure
    async fn persist(&self, message: &ChatMessage) -> Result<ChatMessage>;

    /// Marks the counterpart's messages in `scope` as read on behalf of `reader`.
    async fn mark_read(&self, scope: ConversationScope, reader: UserRole) -> Result<()>;
}

/// Realtime side of the messaging client.
///
/// Holds at most one channel at a time. Opening a new one closes the
/// previous one. Errors only flip the connection status; there is no
/// reconnect loop and no replay.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Closes any existing channel and opens a new one bound to `scope`.
    async fn connect(&self, scope: ConversationScope) -> Result<()>;

    /// Writes the message to the open channel.
    ///
    /// Returns `false` without writing when no channel is open. Never errors
    /// for a closed channel; the message is simply dropped.
    async fn send(&self, message: &ChatMessage) -> bool;

    /// Closes the channel, if any, and clears the handle.
    async fn disconnect(&self);

    /// Scope of the currently open channel.
    fn current_scope(&self) -> Option<ConversationScope>;

    /// Inbound message stream, shared by every subscriber.
    fn messages(&self) -> broadcast::Receiver<ChatMessage>;

    /// Connection status stream (`true` while open).
    fn connection_status(&self) -> watch::Receiver<bool>;

    fn is_connected(&self) -> bool {
        *self.connection_status().borrow()
    }
}

//! Conversation scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity a realtime channel and its messages are bound to.
///
/// A connection is bound to exactly one scope for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ConversationScope {
    Project(i64),
    Subtask(i64),
}

impl ConversationScope {
    pub fn id(self) -> i64 {
        match self {
            Self::Project(id) | Self::Subtask(id) => id,
        }
    }

    /// Path of the realtime endpoint relative to the websocket base URL.
    pub fn socket_path(self) -> String {
        match self {
            Self::Project(id) => format!("/chat/ws/{id}"),
            Self::Subtask(id) => format!("/chat/ws/subtarea/{id}"),
        }
    }

    /// Path of the message history endpoint relative to the API base URL.
    pub fn history_path(self) -> String {
        match self {
            Self::Project(id) => format!("/chat/mensajes/{id}"),
            Self::Subtask(id) => format!("/chat/subtarea/{id}/mensajes"),
        }
    }
}

impl fmt::Display for ConversationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project #{id}"),
            Self::Subtask(id) => write!(f, "sub-task #{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(ConversationScope::Project(4).socket_path(), "/chat/ws/4");
        assert_eq!(
            ConversationScope::Subtask(9).socket_path(),
            "/chat/ws/subtarea/9"
        );
        assert_eq!(
            ConversationScope::Subtask(9).history_path(),
            "/chat/subtarea/9/mensajes"
        );
    }
}

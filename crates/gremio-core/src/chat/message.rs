//! Chat message types.
//!
//! Messages are created client-side without an identifier, persisted via
//! REST (which assigns `id` and `created_at`), then echoed over the realtime
//! channel.

use super::scope::ConversationScope;
use crate::error::{GremioError, Result};
use crate::timestamp;
use crate::user::{UserIdentity, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message bound to a project or sub-task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageWire", into = "MessageWire")]
pub struct ChatMessage {
    /// Server-assigned identifier, `None` until persisted.
    pub id: Option<i64>,
    /// Project or sub-task the message belongs to.
    pub scope: ConversationScope,
    pub sender_id: i64,
    pub sender_role: UserRole,
    pub body: String,
    pub read: bool,
    /// Server-assigned creation time, `None` until persisted.
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// Builds an unsent message authored by `sender`.
    pub fn draft(scope: ConversationScope, sender: &UserIdentity, body: impl Into<String>) -> Self {
        Self {
            id: None,
            scope,
            sender_id: sender.id,
            sender_role: sender.role,
            body: body.into(),
            read: false,
            created_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Decodes a realtime payload.
    ///
    /// Payloads relayed by the server may omit the scope field; in that case
    /// the scope of the connection they arrived on is used.
    pub fn decode(text: &str, connection_scope: ConversationScope) -> Result<Self> {
        Self::with_scope_fallback(serde_json::from_str(text)?, connection_scope)
    }

    /// Same as [`decode`](Self::decode), for an already parsed JSON value.
    pub fn from_value(value: serde_json::Value, scope: ConversationScope) -> Result<Self> {
        Self::with_scope_fallback(serde_json::from_value(value)?, scope)
    }

    fn with_scope_fallback(
        mut wire: MessageWire,
        connection_scope: ConversationScope,
    ) -> Result<Self> {
        if wire.proyecto_id.is_none() && wire.subtarea_id.is_none() {
            match connection_scope {
                ConversationScope::Project(id) => wire.proyecto_id = Some(id),
                ConversationScope::Subtask(id) => wire.subtarea_id = Some(id),
            }
        }
        Self::try_from(wire)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JSON shape exchanged with the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proyecto_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtarea_id: Option<i64>,
    remitente_id: i64,
    remitente_tipo: UserRole,
    contenido: String,
    #[serde(default)]
    leido: bool,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<MessageWire> for ChatMessage {
    type Error = GremioError;

    fn try_from(wire: MessageWire) -> Result<Self> {
        let scope = match (wire.subtarea_id, wire.proyecto_id) {
            (Some(id), _) => ConversationScope::Subtask(id),
            (None, Some(id)) => ConversationScope::Project(id),
            (None, None) => {
                return Err(GremioError::Serialization {
                    format: "JSON".into(),
                    message: "message carries neither proyecto_id nor subtarea_id".into(),
                });
            }
        };
        Ok(Self {
            id: wire.id,
            scope,
            sender_id: wire.remitente_id,
            sender_role: wire.remitente_tipo,
            body: wire.contenido,
            read: wire.leido,
            created_at: wire.created_at,
        })
    }
}

impl From<ChatMessage> for MessageWire {
    fn from(message: ChatMessage) -> Self {
        let (proyecto_id, subtarea_id) = match message.scope {
            ConversationScope::Project(id) => (Some(id), None),
            ConversationScope::Subtask(id) => (None, Some(id)),
        };
        Self {
            id: message.id,
            proyecto_id,
            subtarea_id,
            remitente_id: message.sender_id,
            remitente_tipo: message.sender_role,
            contenido: message.body,
            leido: message.read,
            created_at: message.created_at,
        }
    }
}

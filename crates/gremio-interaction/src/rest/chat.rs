use crate::http::ApiClient;
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::chat::{ChatMessage, ChatRepository, ConversationScope};
use gremio_core::user::UserRole;
use serde::de::IgnoredAny;

#[derive(Debug, Clone)]
pub struct RestChatApi {
    api: ApiClient,
}

impl RestChatApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatRepository for RestChatApi {
    async fn fetch_history(&self, scope: ConversationScope) -> Result<Vec<ChatMessage>> {
        let raw: Vec<serde_json::Value> = self.api.get_json(&scope.history_path(), &[]).await?;
        raw.into_iter()
            .map(|value| ChatMessage::from_value(value, scope))
            .collect()
    }

    async fn persist(&self, message: &ChatMessage) -> Result<ChatMessage> {
        self.api.post_json("/chat/mensajes", message).await
    }

    async fn mark_read(&self, scope: ConversationScope, reader: UserRole) -> Result<()> {
        match scope {
            ConversationScope::Project(id) => {
                let _: IgnoredAny = self
                    .api
                    .put_query(
                        &format!("/chat/mensajes/{id}/marcar-leidos"),
                        &[("remitente_tipo", reader.as_wire().to_string())],
                    )
                    .await?;
            }
            // Sub-task conversations only expose a per-message endpoint.
            ConversationScope::Subtask(_) => {
                let unread: Vec<i64> = self
                    .fetch_history(scope)
                    .await?
                    .into_iter()
                    .filter(|m| m.sender_role == reader.counterpart() && !m.read)
                    .filter_map(|m| m.id)
                    .collect();
                for id in unread {
                    let _: IgnoredAny = self
                        .api
                        .put_query(&format!("/chat/mensajes/{id}/leido"), &[])
                        .await?;
                }
            }
        }
        Ok(())
    }
}

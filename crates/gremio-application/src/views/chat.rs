//! Project and sub-task conversation screen.

use crate::services::Services;
use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::chat::{ChatMessage, ChatRepository, ChatTransport, ConversationScope, MessageLog};
use gremio_core::file::{FileRepository, FileUpload, StoredFile};
use gremio_core::user::UserIdentity;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

/// Renderable state of a chat screen.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub log: MessageLog,
    pub files: Vec<StoredFile>,
    pub loading: bool,
    pub sending: bool,
    pub uploading: bool,
}

/// Controller for one conversation.
///
/// Lifetime: [`activate`](Self::activate) opens the realtime channel, loads
/// history and starts listening; [`deactivate`](Self::deactivate) stops
/// listening and closes the channel. Dropping an active view also stops
/// the listener.
pub struct ChatView {
    scope: ConversationScope,
    user: UserIdentity,
    chat: Arc<dyn ChatRepository>,
    transport: Arc<dyn ChatTransport>,
    files: Arc<dyn FileRepository>,
    state: Arc<RwLock<ChatState>>,
    /// Bumped whenever the log gains entries.
    changes: Arc<watch::Sender<()>>,
    listener: Option<JoinHandle<()>>,
}

/// Follows the entries added to a [`ChatView`]'s log from another task.
///
/// Every entry is yielded once, in log order, after the log's own
/// deduplication.
pub struct ChatFeed {
    state: Arc<RwLock<ChatState>>,
    changes: watch::Receiver<()>,
    cursor: usize,
}

impl ChatFeed {
    /// Entries added since the previous call, without waiting.
    pub async fn drain(&mut self) -> Vec<ChatMessage> {
        self.changes.borrow_and_update();
        let state = self.state.read().await;
        let fresh = state
            .log
            .messages()
            .get(self.cursor..)
            .map(<[ChatMessage]>::to_vec)
            .unwrap_or_default();
        self.cursor += fresh.len();
        fresh
    }

    /// Waits until the log gains entries and returns them.
    ///
    /// Returns `None` once the view is gone.
    pub async fn next(&mut self) -> Option<Vec<ChatMessage>> {
        loop {
            let fresh = self.drain().await;
            if !fresh.is_empty() {
                return Some(fresh);
            }
            self.changes.changed().await.ok()?;
        }
    }
}

impl ChatView {
    pub fn new(services: &Services, scope: ConversationScope) -> Result<Self> {
        let user = services.session.require_user()?;
        Ok(Self {
            scope,
            user,
            chat: services.chat.clone(),
            transport: services.transport.clone(),
            files: services.files.clone(),
            state: Arc::new(RwLock::new(ChatState::default())),
            changes: Arc::new(watch::channel(()).0),
            listener: None,
        })
    }

    pub fn scope(&self) -> ConversationScope {
        self.scope
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Starts following the log. Take it before [`activate`](Self::activate)
    /// to also receive the history.
    pub fn feed(&self) -> ChatFeed {
        ChatFeed {
            state: Arc::clone(&self.state),
            changes: self.changes.subscribe(),
            cursor: 0,
        }
    }

    pub async fn activate(&mut self) -> Result<()> {
        if let Some(previous) = self.listener.take() {
            previous.abort();
        }
        // Subscribe before connecting so nothing sent right after the open is missed.
        let mut inbound = self.transport.messages();
        let state = Arc::clone(&self.state);
        let changes = Arc::clone(&self.changes);
        let scope = self.scope;
        self.listener = Some(tokio::spawn(async move {
            loop {
                match inbound.recv().await {
                    Ok(message) if message.scope == scope => {
                        if state.write().await.log.append(message) {
                            changes.send_replace(());
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Chat view for {} skipped {} messages", scope, skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));

        if let Err(e) = self.transport.connect(self.scope).await {
            tracing::warn!("Realtime channel for {} unavailable: {}", self.scope, e);
        }

        self.state.write().await.loading = true;
        let history = self.chat.fetch_history(self.scope).await;
        {
            let mut state = self.state.write().await;
            state.loading = false;
            state.log.hydrate(history?);
        }
        self.changes.send_replace(());

        match self.chat.mark_read(self.scope, self.user.role).await {
            Ok(()) => self
                .state
                .write()
                .await
                .log
                .mark_read_from(self.user.role.counterpart()),
            Err(e) => tracing::warn!("Could not mark {} as read: {}", self.scope, e),
        }

        match self.files.list(self.scope).await {
            Ok(files) => self.state.write().await.files = files,
            Err(e) => tracing::warn!("Could not list files for {}: {}", self.scope, e),
        }
        Ok(())
    }

    /// Persists the message, shows it, then forwards it on the realtime channel.
    ///
    /// Returns whether the message was forwarded; a closed channel is not an
    /// error because the message is already stored.
    pub async fn send(&self, body: &str) -> Result<bool> {
        let body = body.trim();
        if body.is_empty() {
            return Err(GremioError::validation("message is empty").into());
        }

        self.state.write().await.sending = true;
        let draft = ChatMessage::draft(self.scope, &self.user, body);
        let stored = self.chat.persist(&draft).await;
        let stored = match stored {
            Ok(stored) => stored,
            Err(e) => {
                self.state.write().await.sending = false;
                return Err(e.into());
            }
        };

        {
            let mut state = self.state.write().await;
            state.sending = false;
            if state.log.append(stored.clone()) {
                self.changes.send_replace(());
            }
        }
        Ok(self.transport.send(&stored).await)
    }

    pub async fn upload(&self, upload: FileUpload) -> Result<StoredFile> {
        self.state.write().await.uploading = true;
        let result = self.files.upload(self.scope, &self.user, upload).await;
        let mut state = self.state.write().await;
        state.uploading = false;
        let stored = result?;
        state.files.insert(0, stored.clone());
        Ok(stored)
    }

    pub async fn delete_file(&self, file_id: i64) -> Result<()> {
        self.files.delete(self.scope, file_id, &self.user).await?;
        self.state.write().await.files.retain(|f| f.id != file_id);
        Ok(())
    }

    pub async fn snapshot(&self) -> ChatState {
        self.state.read().await.clone()
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.log.messages().to_vec()
    }

    pub async fn deactivate(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
        if self.transport.current_scope() == Some(self.scope) {
            self.transport.disconnect().await;
        }
    }
}

impl Drop for ChatView {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeWorld, client_identity, stored_message};
    use gremio_core::user::UserRole;
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_activate_connects_then_loads_history() {
        let world = FakeWorld::new(Some(client_identity()));
        world.chat.seed(vec![
            stored_message(1, ConversationScope::Project(3), UserRole::Vendor, "hola"),
            stored_message(2, ConversationScope::Project(3), UserRole::Client, "buenas"),
        ]);
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();

        view.activate().await.unwrap();

        assert_eq!(
            world.transport.current_scope(),
            Some(ConversationScope::Project(3))
        );
        let state = view.snapshot().await;
        assert_eq!(state.log.len(), 2);
        assert!(!state.loading);
        assert_eq!(state.log.unread_from(UserRole::Vendor), 0);
        assert_eq!(
            world.chat.mark_read_calls(),
            vec![(ConversationScope::Project(3), UserRole::Client)]
        );
    }

    #[tokio::test]
    async fn test_own_message_echo_is_shown_once() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();
        view.activate().await.unwrap();

        assert!(view.send("¿Cómo va el avance?").await.unwrap());
        settle().await;

        let messages = view.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "¿Cómo va el avance?");
        assert_eq!(messages[0].sender_role, UserRole::Client);
        assert!(messages[0].id.is_some());
    }

    #[tokio::test]
    async fn test_messages_for_other_scopes_are_ignored() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = ChatView::new(&world.services(), ConversationScope::Subtask(12)).unwrap();
        view.activate().await.unwrap();

        world.transport.push(stored_message(
            9,
            ConversationScope::Subtask(12),
            UserRole::Vendor,
            "listo",
        ));
        world.transport.push(stored_message(
            10,
            ConversationScope::Project(3),
            UserRole::Vendor,
            "otro chat",
        ));
        settle().await;

        let ids: Vec<_> = view.messages().await.iter().filter_map(|m| m.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[tokio::test]
    async fn test_send_while_disconnected_still_persists() {
        let world = FakeWorld::new(Some(client_identity()));
        let view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();

        let forwarded = view.send("sin conexión").await.unwrap();

        assert!(!forwarded);
        assert_eq!(world.chat.persisted().len(), 1);
        assert_eq!(view.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let world = FakeWorld::new(Some(client_identity()));
        let view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();

        assert!(view.send("   ").await.is_err());
        assert!(world.chat.persisted().is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_stops_listening_and_disconnects() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();
        view.activate().await.unwrap();

        view.deactivate().await;
        assert!(!view.is_active());
        assert!(!world.transport.is_connected());

        world.transport.push(stored_message(
            20,
            ConversationScope::Project(3),
            UserRole::Vendor,
            "tarde",
        ));
        settle().await;
        assert!(view.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_reactivating_leaves_no_listener_behind() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();
        view.activate().await.unwrap();
        view.activate().await.unwrap();
        view.deactivate().await;

        world.transport.push(stored_message(
            20,
            ConversationScope::Project(3),
            UserRole::Vendor,
            "tarde",
        ));
        settle().await;
        assert!(view.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_feed_yields_each_entry_once() {
        let world = FakeWorld::new(Some(client_identity()));
        world.chat.seed(vec![stored_message(
            1,
            ConversationScope::Project(3),
            UserRole::Vendor,
            "hola",
        )]);
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();
        let mut feed = view.feed();
        view.activate().await.unwrap();

        let history: Vec<_> = feed.drain().await.iter().filter_map(|m| m.id).collect();
        assert_eq!(history, vec![1]);

        view.send("gracias").await.unwrap();
        let sent = feed.next().await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "gracias");

        world.transport.push(stored_message(
            50,
            ConversationScope::Project(3),
            UserRole::Vendor,
            "de nada",
        ));
        let batch = tokio::time::timeout(Duration::from_secs(1), feed.next())
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<_> = batch.iter().filter_map(|m| m.id).collect();
        assert_eq!(ids, vec![50]);
        assert!(feed.drain().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_prepends_file() {
        let world = FakeWorld::new(Some(client_identity()));
        let mut view = ChatView::new(&world.services(), ConversationScope::Project(3)).unwrap();
        view.activate().await.unwrap();

        let stored = view
            .upload(FileUpload {
                file_name: "brief.pdf".into(),
                mime_type: "application/pdf".into(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        let state = view.snapshot().await;
        assert_eq!(state.files.first().map(|f| f.id), Some(stored.id));
        assert!(!state.uploading);

        view.delete_file(stored.id).await.unwrap();
        assert!(view.snapshot().await.files.is_empty());
    }

    #[test]
    fn test_requires_session() {
        let world = FakeWorld::new(None);
        assert!(ChatView::new(&world.services(), ConversationScope::Project(3)).is_err());
    }
}

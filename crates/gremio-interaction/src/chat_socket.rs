//! Realtime chat channel over WebSocket.
//!
//! One [`ChatSocket`] is shared by every chat view. It owns at most one
//! connection; opening a conversation replaces whatever was open before.

use async_trait::async_trait;
use futures::{Sink, SinkExt, Stream, StreamExt};
use gremio_core::chat::{ChatMessage, ChatTransport, ConversationScope};
use gremio_core::config::ClientConfig;
use gremio_core::{GremioError, Result};
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const INBOUND_CAPACITY: usize = 64;
const OUTBOUND_CAPACITY: usize = 32;

/// Handle to the live connection.
struct Connection {
    scope: ConversationScope,
    /// Frames queued here are written by the writer task.
    outbound: mpsc::Sender<Message>,
    reader: JoinHandle<()>,
}

impl Connection {
    async fn close(self) {
        let _ = self.outbound.send(Message::Close(None)).await;
        self.reader.abort();
        tracing::info!("Chat channel for {} closed", self.scope);
    }
}

/// WebSocket implementation of [`ChatTransport`].
pub struct ChatSocket {
    ws_base_url: String,
    connection: Mutex<Option<Connection>>,
    /// Bumped on every connect and disconnect so a stale reader cannot
    /// flip the status of its replacement.
    generation: Arc<AtomicU64>,
    inbound: broadcast::Sender<ChatMessage>,
    status: Arc<watch::Sender<bool>>,
}

impl ChatSocket {
    pub fn new(ws_base_url: impl Into<String>) -> Self {
        let (inbound, _) = broadcast::channel(INBOUND_CAPACITY);
        let (status, _) = watch::channel(false);
        Self {
            ws_base_url: ws_base_url.into().trim_end_matches('/').to_string(),
            connection: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
            inbound,
            status: Arc::new(status),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(config.ws_base_url()?))
    }

    pub fn url_for(&self, scope: ConversationScope) -> String {
        format!("{}{}", self.ws_base_url, scope.socket_path())
    }

    fn take_connection(&self) -> Option<Connection> {
        self.connection
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
    }

    fn outbound(&self) -> Option<mpsc::Sender<Message>> {
        self.connection
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|c| c.outbound.clone()))
    }
}

#[async_trait]
impl ChatTransport for ChatSocket {
    async fn connect(&self, scope: ConversationScope) -> Result<()> {
        if let Some(previous) = self.take_connection() {
            previous.close().await;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.status.send_replace(false);

        let url = self.url_for(scope);
        tracing::debug!("Opening chat channel {}", url);
        let (stream, _response) = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(url.as_str()))
            .await
            .map_err(|_| {
                GremioError::transport(format!(
                    "connecting to {url} timed out after {CONNECT_TIMEOUT:?}"
                ))
            })?
            .map_err(|e| GremioError::transport(format!("failed to connect to {url}: {e}")))?;

        let (write, read) = stream.split();
        let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        self.status.send_replace(true);

        tokio::spawn(write_loop(write, outbound_rx));
        let reader = tokio::spawn(read_loop(
            read,
            scope,
            self.inbound.clone(),
            Arc::clone(&self.status),
            Arc::clone(&self.generation),
            generation,
        ));

        let connection = Connection {
            scope,
            outbound,
            reader,
        };
        let stale = match self.connection.lock() {
            Ok(mut slot) => slot.replace(connection),
            Err(_) => {
                connection.reader.abort();
                return Err(GremioError::internal("chat connection slot poisoned"));
            }
        };
        if let Some(stale) = stale {
            stale.close().await;
        }
        tracing::info!("Chat channel for {} open", scope);
        Ok(())
    }

    async fn send(&self, message: &ChatMessage) -> bool {
        let Some(outbound) = self.outbound() else {
            tracing::warn!("Chat channel not open; message not sent");
            return false;
        };
        if !*self.status.borrow() {
            tracing::warn!("Chat channel closed; message not sent");
            return false;
        }
        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to encode chat message: {}", e);
                return false;
            }
        };
        outbound.send(Message::text(text)).await.is_ok()
    }

    async fn disconnect(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(connection) = self.take_connection() {
            connection.close().await;
        }
        self.status.send_replace(false);
    }

    fn current_scope(&self) -> Option<ConversationScope> {
        self.connection
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|c| c.scope))
    }

    fn messages(&self) -> broadcast::Receiver<ChatMessage> {
        self.inbound.subscribe()
    }

    fn connection_status(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }
}

async fn write_loop<S>(mut write: S, mut outbound: mpsc::Receiver<Message>)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(frame) = outbound.recv().await {
        let closing = matches!(frame, Message::Close(_));
        if let Err(e) = write.send(frame).await {
            tracing::warn!("Chat channel write failed: {}", e);
            break;
        }
        if closing {
            break;
        }
    }
}

async fn read_loop<S>(
    mut read: S,
    scope: ConversationScope,
    inbound: broadcast::Sender<ChatMessage>,
    status: Arc<watch::Sender<bool>>,
    current_generation: Arc<AtomicU64>,
    generation: u64,
) where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => match ChatMessage::decode(text.as_str(), scope) {
                Ok(message) => {
                    let _ = inbound.send(message);
                }
                Err(e) => tracing::warn!("Ignoring malformed chat frame on {}: {}", scope, e),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Chat channel for {} failed: {}", scope, e);
                break;
            }
        }
    }
    if current_generation.load(Ordering::SeqCst) == generation {
        status.send_replace(false);
        tracing::info!("Chat channel for {} ended", scope);
    }
}

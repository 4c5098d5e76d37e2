//! Chat domain module.
//!
//! Per-project and per-sub-task conversations between a client and a vendor.
//!
//! # Module Structure
//!
//! - `scope`: What a conversation is bound to (`ConversationScope`)
//! - `message`: Message type and its wire form (`ChatMessage`)
//! - `log`: The deduplicated list a view renders (`MessageLog`)
//! - `repository`: REST and realtime ports (`ChatRepository`, `ChatTransport`)

mod log;
mod message;
mod repository;
mod scope;

// Re-export public API
pub use log::MessageLog;
pub use message::ChatMessage;
pub use repository::{ChatRepository, ChatTransport};
pub use scope::ConversationScope;

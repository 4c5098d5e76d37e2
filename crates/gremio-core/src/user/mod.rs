//! User domain module.
//!
//! This module contains the session identity model and the session store.
//!
//! # Module Structure
//!
//! - `model`: Identity and role types
//! - `service`: Session store trait and the in-memory implementation
//!
//! # Usage
//!
//! ```ignore
//! use gremio_core::user::{UserIdentity, UserRole, SessionStore};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{UserIdentity, UserRole};
pub use service::{InMemorySessionStore, SessionStore};

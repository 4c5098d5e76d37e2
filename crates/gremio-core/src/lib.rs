//! Domain layer of the Gremio marketplace client.
//!
//! Models, ports and pure logic shared by every other crate. Nothing in here
//! performs I/O; storage and network adapters implement the traits declared
//! in each module.

pub mod analysis;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod file;
pub mod project;
pub mod requirement;
pub mod route;
pub mod solicitation;
pub mod subtask;
pub mod timestamp;
pub mod user;

// Re-export common error type
pub use error::{GremioError, Result};

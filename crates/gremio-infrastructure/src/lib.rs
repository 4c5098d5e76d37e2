//! Storage adapters for the Gremio client: paths, config file and the
//! persisted session.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::GremioPaths;
pub use crate::session_store::FileSessionStore;
pub use crate::storage::LocalStore;

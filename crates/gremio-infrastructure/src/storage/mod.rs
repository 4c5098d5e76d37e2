//! File-backed storage primitives.

mod atomic;
pub mod atomic_toml;
pub mod local_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use local_store::{LocalStore, LocalStoreError};

//! Session store for the current user identity.
//!
//! A single process-wide slot written at login, read by every guarded view,
//! cleared at logout. Changes are broadcast on a watch channel so views can
//! react to login/logout without polling.

use super::model::{UserIdentity, UserRole};
use crate::error::{GremioError, Result};
use tokio::sync::watch;

/// Holds and broadcasts the current identity.
///
/// Implementations decide where the identity is persisted; the in-memory
/// [`InMemorySessionStore`] keeps it for the lifetime of the process only.
pub trait SessionStore: Send + Sync {
    /// Stores the identity and emits it on the identity stream.
    ///
    /// `None` clears persisted state.
    fn set_current_user(&self, user: Option<UserIdentity>) -> Result<()>;

    /// Synchronous read of the last emitted value.
    fn current_user(&self) -> Option<UserIdentity>;

    /// Identity stream. The receiver starts at the current value.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;

    /// Clears the slot and emits `None`.
    fn clear(&self) -> Result<()> {
        self.set_current_user(None)
    }

    /// Replaces the display name of the stored identity, if any.
    fn rename_current_user(&self, name: &str) -> Result<()> {
        match self.current_user() {
            Some(mut user) if user.name != name => {
                user.name = name.to_string();
                self.set_current_user(Some(user))
            }
            _ => Ok(()),
        }
    }

    /// Returns the current user or [`GremioError::NotAuthenticated`].
    fn require_user(&self) -> Result<UserIdentity> {
        self.current_user().ok_or(GremioError::NotAuthenticated)
    }

    /// Returns the current user if it has the given role, otherwise
    /// [`GremioError::Forbidden`].
    fn require_role(&self, role: UserRole) -> Result<UserIdentity> {
        let user = self.require_user()?;
        if user.role == role {
            Ok(user)
        } else {
            Err(GremioError::forbidden(format!(
                "this action requires a {} session, current session is {}",
                role, user.role
            )))
        }
    }
}

/// Session store that never touches disk.
///
/// # Example
///
/// ```
/// use gremio_core::user::{InMemorySessionStore, SessionStore};
///
/// let store = InMemorySessionStore::default();
/// assert!(store.current_user().is_none());
/// ```
#[derive(Debug)]
pub struct InMemorySessionStore {
    sender: watch::Sender<Option<UserIdentity>>,
}

impl InMemorySessionStore {
    pub fn new(initial: Option<UserIdentity>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionStore for InMemorySessionStore {
    fn set_current_user(&self, user: Option<UserIdentity>) -> Result<()> {
        self.sender.send_replace(user);
        Ok(())
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.sender.subscribe()
    }
}

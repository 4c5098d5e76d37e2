//! Session store persisted in the local store.
//!
//! The identity lives under the `usuario` key, mirroring what the web
//! frontend keeps in `localStorage`. It is loaded once at construction and
//! rewritten on every change.

use crate::storage::LocalStore;
use gremio_core::Result;
use gremio_core::auth::PendingSpecialties;
use gremio_core::user::{SessionStore, UserIdentity};
use tokio::sync::watch;

pub const SESSION_KEY: &str = "usuario";
pub const PENDING_SPECIALTIES_KEY: &str = "registro_vendedor";

/// [`SessionStore`] backed by a [`LocalStore`].
///
/// # Example
///
/// ```no_run
/// use gremio_infrastructure::session_store::FileSessionStore;
/// use gremio_infrastructure::storage::LocalStore;
/// use gremio_core::user::SessionStore;
///
/// let store = FileSessionStore::open(LocalStore::new("/tmp/gremio/storage"));
/// println!("logged in: {}", store.current_user().is_some());
/// ```
#[derive(Debug)]
pub struct FileSessionStore {
    storage: LocalStore,
    sender: watch::Sender<Option<UserIdentity>>,
}

impl FileSessionStore {
    /// Opens the store and emits any previously saved identity.
    ///
    /// An unreadable or malformed record is logged and treated as logged out.
    pub fn open(storage: LocalStore) -> Self {
        let initial = match storage.get::<UserIdentity>(SESSION_KEY) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                None
            }
        };
        if let Some(user) = &initial {
            tracing::debug!("Restored session for {} ({})", user.email, user.role);
        }
        let (sender, _) = watch::channel(initial);
        Self { storage, sender }
    }

    pub fn storage(&self) -> &LocalStore {
        &self.storage
    }

    /// Specialty picks carried over to the vendor sign-up form.
    pub fn pending_specialties(&self) -> Result<PendingSpecialties> {
        Ok(self
            .storage
            .get(PENDING_SPECIALTIES_KEY)?
            .unwrap_or_default())
    }

    pub fn save_pending_specialties(&self, pending: &PendingSpecialties) -> Result<()> {
        if pending.is_empty() {
            self.storage.remove(PENDING_SPECIALTIES_KEY)?;
        } else {
            self.storage.set(PENDING_SPECIALTIES_KEY, pending)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn set_current_user(&self, user: Option<UserIdentity>) -> Result<()> {
        match &user {
            Some(identity) => self.storage.set(SESSION_KEY, identity)?,
            None => {
                self.storage.remove(SESSION_KEY)?;
            }
        }
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

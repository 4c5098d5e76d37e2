//! Profile screen for either role.

use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::auth::{Profile, ProfileRepository, ProfileUpdate};
use gremio_core::user::SessionStore;
use std::sync::Arc;

pub struct ProfileUseCase {
    profiles: Arc<dyn ProfileRepository>,
    session: Arc<dyn SessionStore>,
}

impl ProfileUseCase {
    pub fn new(profiles: Arc<dyn ProfileRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self { profiles, session }
    }

    pub async fn load(&self) -> Result<Profile> {
        let user = self.session.require_user()?;
        Ok(self.profiles.fetch(&user).await?)
    }

    /// Saves the profile and keeps the session's display name in sync.
    pub async fn save(&self, update: &ProfileUpdate) -> Result<Profile> {
        let user = self.session.require_user()?;
        if update.name.trim().is_empty() {
            return Err(GremioError::validation("name is required").into());
        }
        self.profiles.update(&user, update).await?;
        self.session.rename_current_user(update.name.trim())?;
        Ok(self.profiles.fetch(&user).await?)
    }
}

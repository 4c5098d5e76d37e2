//! Profile screen.

use crate::profile_usecase::ProfileUseCase;
use crate::services::Services;
use anyhow::Result;
use gremio_core::auth::{Profile, ProfileUpdate};

pub struct ProfileView {
    usecase: ProfileUseCase,
    pub profile: Option<Profile>,
    pub loading: bool,
    pub saving: bool,
}

impl ProfileView {
    pub fn new(services: &Services) -> Self {
        Self {
            usecase: ProfileUseCase::new(services.profiles.clone(), services.session.clone()),
            profile: None,
            loading: false,
            saving: false,
        }
    }

    pub async fn activate(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.usecase.load().await;
        self.loading = false;
        self.profile = Some(result?);
        Ok(())
    }

    pub async fn save(&mut self, update: &ProfileUpdate) -> Result<()> {
        self.saving = true;
        let result = self.usecase.save(update).await;
        self.saving = false;
        self.profile = Some(result?);
        Ok(())
    }
}

//! Project listing for the logged-in user.

use crate::services::Services;
use anyhow::Result;
use gremio_core::project::{Project, ProjectRepository};
use gremio_core::user::{UserIdentity, UserRole};
use std::sync::Arc;

pub struct ProjectsView {
    user: UserIdentity,
    projects: Arc<dyn ProjectRepository>,
    pub items: Vec<Project>,
    pub loading: bool,
}

impl ProjectsView {
    pub fn new(services: &Services) -> Result<Self> {
        Ok(Self {
            user: services.session.require_user()?,
            projects: services.projects.clone(),
            items: Vec::new(),
            loading: false,
        })
    }

    /// Loads the client's own projects, or the projects a vendor works on.
    pub async fn activate(&mut self) -> Result<()> {
        self.loading = true;
        let result = match self.user.role {
            UserRole::Client => self.projects.list_for_client(self.user.id).await,
            UserRole::Vendor => self.projects.list_for_vendor(self.user.id).await,
        };
        self.loading = false;
        self.items = result?;
        tracing::debug!("Loaded {} projects for {}", self.items.len(), self.user.name);
        Ok(())
    }

    pub fn active(&self) -> impl Iterator<Item = &Project> {
        self.items.iter().filter(|p| p.status.is_active())
    }

    pub fn finished(&self) -> impl Iterator<Item = &Project> {
        self.items.iter().filter(|p| !p.status.is_active())
    }

    /// Deletes one of the client's projects.
    pub async fn delete(&mut self, project_id: i64) -> Result<()> {
        self.projects.delete(project_id).await?;
        self.items.retain(|p| p.id != project_id);
        Ok(())
    }
}

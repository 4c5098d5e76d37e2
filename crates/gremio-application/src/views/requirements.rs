//! Requirement lists for both roles.
//!
//! Clients see and post their own requirements. Vendors browse the open
//! ones matching a specialty, take one (which creates its project) and move
//! taken ones through their states.

use crate::services::Services;
use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::requirement::{
    NewRequirement, Requirement, RequirementAssignment, RequirementRepository, RequirementStatus,
};
use gremio_core::user::{UserIdentity, UserRole};
use std::sync::Arc;

pub struct RequirementsView {
    user: UserIdentity,
    requirements: Arc<dyn RequirementRepository>,
    /// Client: own requirements. Vendor: requirements assigned to them.
    pub mine: Vec<Requirement>,
    /// Vendor only: open requirements.
    pub available: Vec<Requirement>,
    pub specialty: Option<String>,
    pub loading: bool,
}

impl RequirementsView {
    pub fn new(services: &Services) -> Result<Self> {
        Ok(Self {
            user: services.session.require_user()?,
            requirements: services.requirements.clone(),
            mine: Vec::new(),
            available: Vec::new(),
            specialty: None,
            loading: false,
        })
    }

    pub async fn activate(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.load().await;
        self.loading = false;
        result
    }

    async fn load(&mut self) -> Result<()> {
        match self.user.role {
            UserRole::Client => {
                self.mine = self.requirements.list_for_client(self.user.id).await?;
            }
            UserRole::Vendor => {
                self.mine = self.requirements.list_for_vendor(self.user.id).await?;
                self.available = self
                    .requirements
                    .list_available(self.specialty.as_deref())
                    .await?;
            }
        }
        Ok(())
    }

    /// Posts a new requirement for the logged-in client.
    pub async fn create(&mut self, message: &str) -> Result<Requirement> {
        self.expect_role(UserRole::Client)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(GremioError::validation("describe what you need").into());
        }
        let created = self
            .requirements
            .create(&NewRequirement {
                client_id: self.user.id,
                message: message.to_string(),
            })
            .await?;
        self.mine.insert(0, created.clone());
        Ok(created)
    }

    /// Takes an open requirement; the backend creates its project.
    pub async fn assign(&mut self, requirement_id: i64) -> Result<RequirementAssignment> {
        self.expect_role(UserRole::Vendor)?;
        let assignment = self.requirements.assign(requirement_id, self.user.id).await?;
        tracing::info!(
            "Requirement {} assigned, project {} created",
            requirement_id,
            assignment.project_id
        );
        self.load().await?;
        Ok(assignment)
    }

    pub async fn change_status(
        &mut self,
        requirement_id: i64,
        status: RequirementStatus,
    ) -> Result<Requirement> {
        self.expect_role(UserRole::Vendor)?;
        let updated = self
            .requirements
            .change_status(requirement_id, status)
            .await?;
        if let Some(slot) = self.mine.iter_mut().find(|r| r.id == requirement_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    fn expect_role(&self, role: UserRole) -> Result<()> {
        if self.user.role == role {
            Ok(())
        } else {
            Err(GremioError::validation(format!("only a {role} can do this")).into())
        }
    }
}

use super::model::{NewSolicitation, Solicitation, SolicitationDecision};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the backend's solicitation resource.
#[async_trait]
pub trait SolicitationRepository: Send + Sync {
    /// Vendor side: asks to be assigned a sub-task.
    async fn send(&self, solicitation: &NewSolicitation) -> Result<Solicitation>;

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Solicitation>>;

    /// Client side: pending solicitations across a project's sub-tasks.
    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Solicitation>>;

    async fn respond(&self, solicitation_id: i64, decision: &SolicitationDecision) -> Result<()>;
}

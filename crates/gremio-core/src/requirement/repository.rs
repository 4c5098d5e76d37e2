use super::model::{NewRequirement, Requirement, RequirementAssignment, RequirementStatus};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the backend's requirement resource.
#[async_trait]
pub trait RequirementRepository: Send + Sync {
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Requirement>>;

    async fn create(&self, requirement: &NewRequirement) -> Result<Requirement>;

    /// Unassigned requirements, optionally narrowed to one specialty.
    async fn list_available(&self, specialty: Option<&str>) -> Result<Vec<Requirement>>;

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Requirement>>;

    async fn assign(&self, requirement_id: i64, vendor_id: i64) -> Result<RequirementAssignment>;

    async fn change_status(
        &self,
        requirement_id: i64,
        status: RequirementStatus,
    ) -> Result<Requirement>;
}

//! Project repository trait.

use super::model::{Project, ProjectUpdate};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the backend's project resource.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Projects owned by a client.
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Project>>;

    /// Projects a vendor works on.
    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Project>>;

    async fn find_by_id(&self, project_id: i64) -> Result<Project>;

    /// Applies a partial update and returns the stored project.
    async fn update(&self, project_id: i64, update: &ProjectUpdate) -> Result<Project>;

    /// Deletes a project. Cancelling through [`ProjectRepository::update`] is usually preferred.
    async fn delete(&self, project_id: i64) -> Result<()>;
}

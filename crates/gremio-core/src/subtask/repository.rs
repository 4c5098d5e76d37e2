//! Sub-task repository trait.

use super::model::{ProjectSubtasks, Subtask, SubtaskDetail, SubtaskFilter, SubtaskStatus, VendorStats};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the backend's sub-task resource.
#[async_trait]
pub trait SubtaskRepository: Send + Sync {
    /// Sub-tasks of a project with per-status counts (client view).
    async fn list_for_project(&self, project_id: i64) -> Result<ProjectSubtasks>;

    /// Unassigned sub-tasks open to vendors.
    async fn list_available(&self, filter: &SubtaskFilter) -> Result<Vec<Subtask>>;

    /// Sub-tasks assigned to a vendor, optionally narrowed to one status.
    async fn list_for_vendor(
        &self,
        vendor_id: i64,
        status: Option<SubtaskStatus>,
    ) -> Result<Vec<Subtask>>;

    /// Assigns a sub-task to a vendor directly.
    async fn accept(&self, subtask_id: i64, vendor_id: i64) -> Result<()>;

    /// Moves an assigned sub-task forward (`EN_PROGRESO`, `COMPLETADO`).
    async fn update_progress(
        &self,
        subtask_id: i64,
        status: SubtaskStatus,
        notes: Option<String>,
    ) -> Result<()>;

    async fn vendor_stats(&self, vendor_id: i64) -> Result<VendorStats>;

    async fn find_by_id(&self, subtask_id: i64) -> Result<SubtaskDetail>;
}

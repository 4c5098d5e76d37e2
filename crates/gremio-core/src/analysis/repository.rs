use super::model::{AnalysisMessage, AnalysisTurn, PublishedProject, Specialty};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the requirement analysis assistant.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Opens a new analysis; the returned turn carries the draft project id.
    async fn start(&self, client_id: i64, initial_message: &str) -> Result<AnalysisTurn>;

    async fn reply(&self, project_id: i64, message: &str) -> Result<AnalysisTurn>;

    /// Makes an analyzed project's sub-tasks visible to vendors.
    async fn publish(&self, project_id: i64) -> Result<PublishedProject>;

    async fn history(&self, project_id: i64) -> Result<Vec<AnalysisMessage>>;

    async fn specialties(&self) -> Result<Vec<Specialty>>;
}

//! Client's view of one project: sub-task progress and vendor solicitations.

use crate::services::Services;
use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::project::{Project, ProjectRepository, ProjectUpdate};
use gremio_core::solicitation::{Solicitation, SolicitationDecision, SolicitationRepository};
use gremio_core::subtask::{ProjectSubtasks, Subtask, SubtaskRepository, SubtaskStatus};
use gremio_core::user::{SessionStore, UserRole};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

pub struct ProjectDetailView {
    project_id: i64,
    session: Arc<dyn SessionStore>,
    projects: Arc<dyn ProjectRepository>,
    subtasks: Arc<dyn SubtaskRepository>,
    solicitations: Arc<dyn SolicitationRepository>,
    pub project: Option<Project>,
    pub board: Option<ProjectSubtasks>,
    pub requests: Vec<Solicitation>,
    /// Sub-task status groups currently shown open. All start collapsed.
    pub expanded: HashSet<SubtaskStatus>,
    pub loading: bool,
    pub responding: bool,
}

impl ProjectDetailView {
    pub fn new(services: &Services, project_id: i64) -> Self {
        Self {
            project_id,
            session: services.session.clone(),
            projects: services.projects.clone(),
            subtasks: services.subtasks.clone(),
            solicitations: services.solicitations.clone(),
            project: None,
            board: None,
            requests: Vec::new(),
            expanded: HashSet::new(),
            loading: false,
            responding: false,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub async fn activate(&mut self) -> Result<()> {
        self.session.require_role(UserRole::Client)?;
        self.loading = true;
        let result = self.load().await;
        self.loading = false;
        result
    }

    async fn load(&mut self) -> Result<()> {
        self.project = Some(self.projects.find_by_id(self.project_id).await?);
        self.board = Some(self.subtasks.list_for_project(self.project_id).await?);
        self.requests = self.solicitations.list_for_project(self.project_id).await?;
        Ok(())
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &Solicitation> {
        self.requests.iter().filter(|s| s.is_pending())
    }

    /// Sub-tasks grouped by status, in lifecycle order.
    pub fn groups(&self) -> BTreeMap<SubtaskStatus, Vec<&Subtask>> {
        let mut groups: BTreeMap<SubtaskStatus, Vec<&Subtask>> = BTreeMap::new();
        for subtask in self.board.iter().flat_map(|b| b.subtasks.iter()) {
            groups.entry(subtask.status).or_default().push(subtask);
        }
        groups
    }

    pub fn toggle_group(&mut self, status: SubtaskStatus) {
        if !self.expanded.remove(&status) {
            self.expanded.insert(status);
        }
    }

    pub fn is_expanded(&self, status: SubtaskStatus) -> bool {
        self.expanded.contains(&status)
    }

    /// Applies a partial update (status, progress, payment, dates) to the project.
    pub async fn update_project(&mut self, update: &ProjectUpdate) -> Result<&Project> {
        if let Some(progress) = update.progress.filter(|p| *p > 100) {
            return Err(GremioError::validation(format!(
                "progress must be between 0 and 100, got {progress}"
            ))
            .into());
        }
        let project = self.projects.update(self.project_id, update).await?;
        tracing::info!("Updated project {}", self.project_id);
        Ok(&*self.project.insert(project))
    }

    /// Accepts or rejects a pending solicitation, then reloads the board.
    pub async fn respond(
        &mut self,
        solicitation_id: i64,
        decision: SolicitationDecision,
    ) -> Result<()> {
        let pending = self
            .requests
            .iter()
            .any(|s| s.id == solicitation_id && s.is_pending());
        if !pending {
            return Err(GremioError::validation(format!(
                "solicitation {solicitation_id} is not pending on this project"
            ))
            .into());
        }

        self.responding = true;
        let result = self.solicitations.respond(solicitation_id, &decision).await;
        self.responding = false;
        result?;
        tracing::info!("Answered solicitation {} with {:?}", solicitation_id, decision);
        self.load().await
    }
}

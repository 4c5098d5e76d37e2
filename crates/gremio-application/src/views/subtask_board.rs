//! Vendor work board: open sub-tasks, own sub-tasks and statistics.

use crate::services::Services;
use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::auth::ProfileRepository;
use gremio_core::solicitation::{NewSolicitation, Solicitation, SolicitationRepository};
use gremio_core::subtask::{Subtask, SubtaskFilter, SubtaskRepository, SubtaskStatus, VendorStats};
use gremio_core::user::{UserIdentity, UserRole};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Open sub-tasks of one project, as listed on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    pub project_id: Option<i64>,
    pub project_title: String,
    pub client_name: Option<String>,
    pub subtasks: Vec<Subtask>,
}

pub struct SubtaskBoardView {
    vendor: UserIdentity,
    subtasks: Arc<dyn SubtaskRepository>,
    solicitations: Arc<dyn SolicitationRepository>,
    profiles: Arc<dyn ProfileRepository>,
    pub filter: SubtaskFilter,
    /// Specialty codes from the vendor's profile.
    pub specialties: Vec<String>,
    pub available: Vec<Subtask>,
    pub mine: Vec<Subtask>,
    pub stats: VendorStats,
    pub requests: Vec<Solicitation>,
    /// Projects shown open on the board. All start collapsed.
    pub expanded: HashSet<Option<i64>>,
    pub loading: bool,
}

impl SubtaskBoardView {
    pub fn new(services: &Services) -> Result<Self> {
        Ok(Self {
            vendor: services.session.require_role(UserRole::Vendor)?,
            subtasks: services.subtasks.clone(),
            solicitations: services.solicitations.clone(),
            profiles: services.profiles.clone(),
            filter: SubtaskFilter::default(),
            specialties: Vec::new(),
            available: Vec::new(),
            mine: Vec::new(),
            stats: VendorStats::default(),
            requests: Vec::new(),
            expanded: HashSet::new(),
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
        match self.profiles.fetch(&self.vendor).await {
            Ok(profile) => self.specialties = profile.specialties,
            Err(e) => tracing::warn!("Vendor specialties unavailable: {}", e),
        }
        self.available = self.subtasks.list_available(&self.filter).await?;
        self.mine = self.subtasks.list_for_vendor(self.vendor.id, None).await?;
        self.stats = self.subtasks.vendor_stats(self.vendor.id).await?;
        self.requests = self.solicitations.list_for_vendor(self.vendor.id).await?;
        Ok(())
    }

    /// Replaces the filter and reloads the open sub-tasks only.
    pub async fn apply_filter(&mut self, filter: SubtaskFilter) -> Result<()> {
        self.filter = filter;
        self.available = self.subtasks.list_available(&self.filter).await?;
        Ok(())
    }

    /// Open sub-tasks grouped by project.
    pub fn groups(&self) -> Vec<ProjectGroup> {
        let mut groups: BTreeMap<Option<i64>, ProjectGroup> = BTreeMap::new();
        for subtask in &self.available {
            groups
                .entry(subtask.project_id)
                .or_insert_with(|| ProjectGroup {
                    project_id: subtask.project_id,
                    project_title: subtask
                        .project_title
                        .clone()
                        .unwrap_or_else(|| "Untitled project".to_string()),
                    client_name: subtask.client_name.clone(),
                    subtasks: Vec::new(),
                })
                .subtasks
                .push(subtask.clone());
        }
        groups.into_values().collect()
    }

    pub fn toggle_project(&mut self, project_id: Option<i64>) {
        if !self.expanded.remove(&project_id) {
            self.expanded.insert(project_id);
        }
    }

    /// Whether the vendor registered the sub-task's specialty.
    ///
    /// An empty specialty list means the profile could not be read; the
    /// backend remains the authority in that case.
    pub fn can_accept(&self, subtask: &Subtask) -> bool {
        self.specialties.is_empty() || self.specialties.iter().any(|s| s == &subtask.specialty)
    }

    /// Claims an open sub-task directly.
    pub async fn accept(&mut self, subtask_id: i64) -> Result<()> {
        let subtask = self
            .available
            .iter()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| GremioError::not_found("Subtask", subtask_id.to_string()))?;
        if !self.can_accept(subtask) {
            return Err(GremioError::validation(format!(
                "specialty {} is not among your registered specialties",
                subtask.specialty
            ))
            .into());
        }
        self.subtasks.accept(subtask_id, self.vendor.id).await?;
        tracing::info!("Accepted sub-task {}", subtask_id);
        self.activate().await
    }

    /// Asks the project's client to assign a sub-task.
    pub async fn request(&mut self, subtask_id: i64, message: Option<String>) -> Result<Solicitation> {
        let sent = self
            .solicitations
            .send(&NewSolicitation {
                subtask_id,
                vendor_id: self.vendor.id,
                message,
            })
            .await?;
        self.requests.push(sent.clone());
        Ok(sent)
    }

    /// Moves one of the vendor's sub-tasks to `EN_PROGRESO` or `COMPLETADO`.
    pub async fn update_progress(
        &mut self,
        subtask_id: i64,
        status: SubtaskStatus,
        notes: Option<String>,
    ) -> Result<()> {
        if !status.is_progress_target() {
            return Err(GremioError::validation(format!(
                "cannot move a sub-task to {status} from the board"
            ))
            .into());
        }
        if !self.mine.iter().any(|s| s.id == subtask_id) {
            return Err(GremioError::not_found("Subtask", subtask_id.to_string()).into());
        }
        self.subtasks
            .update_progress(subtask_id, status, notes)
            .await?;
        self.mine = self.subtasks.list_for_vendor(self.vendor.id, None).await?;
        self.stats = self.subtasks.vendor_stats(self.vendor.id).await?;
        Ok(())
    }

    /// Completed sub-tasks, for the vendor's history screen.
    pub fn history(&self) -> impl Iterator<Item = &Subtask> {
        self.mine
            .iter()
            .filter(|s| s.status == SubtaskStatus::Completado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeWorld, client_identity, subtask, vendor_identity};

    fn seeded() -> FakeWorld {
        let world = FakeWorld::new(Some(vendor_identity()));
        let mut other = subtask(5, SubtaskStatus::Pendiente);
        other.specialty = "CIBERSEGURIDAD".into();
        other.project_id = Some(4);
        world.subtasks.seed(vec![
            subtask(1, SubtaskStatus::Pendiente),
            subtask(2, SubtaskStatus::Pendiente),
            other,
        ]);
        world.profiles.set_specialties(vec!["DESARROLLO_WEB".into()]);
        world
    }

    #[tokio::test]
    async fn test_board_groups_by_project() {
        let world = seeded();
        let mut view = SubtaskBoardView::new(&world.services()).unwrap();
        view.activate().await.unwrap();

        let groups = view.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].subtasks.len(), 2);
        assert_eq!(view.specialties, vec!["DESARROLLO_WEB"]);
    }

    #[tokio::test]
    async fn test_accept_checks_specialty_before_calling_backend() {
        let world = seeded();
        let mut view = SubtaskBoardView::new(&world.services()).unwrap();
        view.activate().await.unwrap();

        assert!(view.accept(5).await.is_err());
        assert!(world.subtasks.accepted().is_empty());

        view.accept(1).await.unwrap();
        assert_eq!(world.subtasks.accepted(), vec![(1, 7)]);
        assert!(view.mine.iter().any(|s| s.id == 1));
    }

    #[tokio::test]
    async fn test_progress_only_allows_forward_states() {
        let world = seeded();
        let mut view = SubtaskBoardView::new(&world.services()).unwrap();
        view.activate().await.unwrap();
        view.accept(1).await.unwrap();

        assert!(
            view.update_progress(1, SubtaskStatus::Pendiente, None)
                .await
                .is_err()
        );
        view.update_progress(1, SubtaskStatus::Completado, Some("entregado".into()))
            .await
            .unwrap();
        assert_eq!(view.history().count(), 1);
        assert_eq!(view.stats.completed, 1);
    }

    #[tokio::test]
    async fn test_request_records_solicitation() {
        let world = seeded();
        let mut view = SubtaskBoardView::new(&world.services()).unwrap();
        view.activate().await.unwrap();

        let sent = view.request(2, Some("Tengo experiencia".into())).await.unwrap();
        assert!(sent.is_pending());
        assert_eq!(view.requests.len(), 1);
    }

    #[test]
    fn test_client_session_cannot_open_board() {
        let world = FakeWorld::new(Some(client_identity()));
        assert!(SubtaskBoardView::new(&world.services()).is_err());
    }
}

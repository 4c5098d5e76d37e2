//! Port bundle shared by use cases and views.

use gremio_core::analysis::AnalysisRepository;
use gremio_core::auth::{AuthApi, ProfileRepository};
use gremio_core::chat::{ChatRepository, ChatTransport};
use gremio_core::file::FileRepository;
use gremio_core::project::ProjectRepository;
use gremio_core::requirement::RequirementRepository;
use gremio_core::solicitation::SolicitationRepository;
use gremio_core::subtask::SubtaskRepository;
use gremio_core::user::SessionStore;
use gremio_interaction::Backend;
use std::sync::Arc;

/// Every port the application talks to.
///
/// Cloning is cheap; views receive their own copy.
#[derive(Clone)]
pub struct Services {
    pub session: Arc<dyn SessionStore>,
    pub auth: Arc<dyn AuthApi>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub subtasks: Arc<dyn SubtaskRepository>,
    pub requirements: Arc<dyn RequirementRepository>,
    pub solicitations: Arc<dyn SolicitationRepository>,
    pub files: Arc<dyn FileRepository>,
    pub analysis: Arc<dyn AnalysisRepository>,
    pub chat: Arc<dyn ChatRepository>,
    pub transport: Arc<dyn ChatTransport>,
}

impl Services {
    /// Wires the REST and WebSocket clients behind their ports.
    pub fn from_backend(backend: Backend, session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            auth: Arc::new(backend.auth),
            profiles: Arc::new(backend.profiles),
            projects: Arc::new(backend.projects),
            subtasks: Arc::new(backend.subtasks),
            requirements: Arc::new(backend.requirements),
            solicitations: Arc::new(backend.solicitations),
            files: Arc::new(backend.files),
            analysis: Arc::new(backend.analysis),
            chat: Arc::new(backend.chat),
            transport: Arc::new(backend.socket),
        }
    }
}

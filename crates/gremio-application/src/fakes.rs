//! In-memory implementations of every port, for view and use case tests.

use crate::services::Services;
use async_trait::async_trait;
use chrono::Utc;
use gremio_core::analysis::{
    AnalysisMessage, AnalysisRepository, AnalysisTurn, PublishedProject, Specialty,
};
use gremio_core::auth::{
    AuthApi, ClientRegistration, Credentials, Profile, ProfileRepository, ProfileUpdate,
    VendorRegistration,
};
use gremio_core::chat::{ChatMessage, ChatRepository, ChatTransport, ConversationScope};
use gremio_core::file::{FileRepository, FileUpload, StoredFile};
use gremio_core::project::{Project, ProjectRepository, ProjectStatus, ProjectUpdate};
use gremio_core::requirement::{
    NewRequirement, Requirement, RequirementAssignment, RequirementRepository, RequirementStatus,
};
use gremio_core::solicitation::{
    NewSolicitation, Solicitation, SolicitationDecision, SolicitationRepository,
    SolicitationStatus,
};
use gremio_core::subtask::{
    ProjectSubtasks, Subtask, SubtaskCounts, SubtaskDetail, SubtaskFilter, SubtaskRepository,
    SubtaskStatus, VendorStats,
};
use gremio_core::user::{InMemorySessionStore, UserIdentity, UserRole};
use gremio_core::{GremioError, Result};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};

pub fn client_identity() -> UserIdentity {
    UserIdentity {
        id: 2,
        name: "Ana Torres".into(),
        email: "ana@mail.pe".into(),
        role: UserRole::Client,
        specialties: None,
    }
}

pub fn vendor_identity() -> UserIdentity {
    UserIdentity {
        id: 7,
        name: "Estudio Vera".into(),
        email: "vera@estudio.pe".into(),
        role: UserRole::Vendor,
        specialties: Some("Desarrollo web".into()),
    }
}

pub fn stored_message(
    id: i64,
    scope: ConversationScope,
    role: UserRole,
    body: &str,
) -> ChatMessage {
    ChatMessage {
        id: Some(id),
        scope,
        sender_id: match role {
            UserRole::Client => 2,
            UserRole::Vendor => 7,
        },
        sender_role: role,
        body: body.to_string(),
        read: false,
        created_at: Some(Utc::now()),
    }
}

pub fn project(id: i64, status: ProjectStatus) -> Project {
    serde_json::from_value(json!({
        "id": id,
        "cliente_id": 2,
        "vendedor_id": 7,
        "titulo": format!("Proyecto {id}"),
        "especialidad": "DESARROLLO_WEB",
        "estado": status,
        "progreso": 40,
        "presupuesto": 1200.0,
        "pagado": 300.0
    }))
    .unwrap()
}

pub fn subtask(id: i64, status: SubtaskStatus) -> Subtask {
    serde_json::from_value(json!({
        "id": id,
        "proyecto_id": 3,
        "proyecto_titulo": "Proyecto 3",
        "cliente_nombre": "Ana Torres",
        "codigo": format!("P3-TASK-{id:03}"),
        "titulo": format!("Tarea {id}"),
        "especialidad": "DESARROLLO_WEB",
        "estado": status,
        "prioridad": "MEDIA",
        "presupuesto": 300.0,
        "estimacion_horas": 12
    }))
    .unwrap()
}

pub fn solicitation(id: i64, subtask_id: i64, status: SolicitationStatus) -> Solicitation {
    serde_json::from_value(json!({
        "id": id,
        "subtarea_id": subtask_id,
        "vendedor_id": 7,
        "estado": status,
        "mensaje": "Puedo empezar mañana"
    }))
    .unwrap()
}

pub fn requirement(id: i64, vendor_id: Option<i64>) -> Requirement {
    serde_json::from_value(json!({
        "id": id,
        "cliente_id": 2,
        "vendedor_id": vendor_id,
        "titulo": "Web corporativa",
        "mensaje": "Necesito una web",
        "especialidad": "DESARROLLO_WEB",
        "estado": "pendiente"
    }))
    .unwrap()
}

/// One fake per port, plus the session store.
pub struct FakeWorld {
    pub session: Arc<InMemorySessionStore>,
    pub auth: Arc<FakeAuth>,
    pub profiles: Arc<FakeProfiles>,
    pub projects: Arc<FakeProjects>,
    pub subtasks: Arc<FakeSubtasks>,
    pub requirements: Arc<FakeRequirements>,
    pub solicitations: Arc<FakeSolicitations>,
    pub files: Arc<FakeFiles>,
    pub analysis: Arc<FakeAnalysis>,
    pub chat: Arc<FakeChat>,
    pub transport: Arc<FakeTransport>,
}

impl FakeWorld {
    pub fn new(user: Option<UserIdentity>) -> Self {
        Self {
            session: Arc::new(InMemorySessionStore::new(user)),
            auth: Arc::new(FakeAuth::default()),
            profiles: Arc::new(FakeProfiles::default()),
            projects: Arc::new(FakeProjects::default()),
            subtasks: Arc::new(FakeSubtasks::default()),
            requirements: Arc::new(FakeRequirements::default()),
            solicitations: Arc::new(FakeSolicitations::default()),
            files: Arc::new(FakeFiles::default()),
            analysis: Arc::new(FakeAnalysis::default()),
            chat: Arc::new(FakeChat::default()),
            transport: Arc::new(FakeTransport::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            session: self.session.clone(),
            auth: self.auth.clone(),
            profiles: self.profiles.clone(),
            projects: self.projects.clone(),
            subtasks: self.subtasks.clone(),
            requirements: self.requirements.clone(),
            solicitations: self.solicitations.clone(),
            files: self.files.clone(),
            analysis: self.analysis.clone(),
            chat: self.chat.clone(),
            transport: self.transport.clone(),
        }
    }
}

// ---- auth ----

#[derive(Default)]
pub struct FakeAuth {
    client: Mutex<Option<UserIdentity>>,
    vendor: Mutex<Option<UserIdentity>>,
    offline: bool,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeAuth {
    pub fn accepting_client(user: UserIdentity) -> Self {
        let auth = Self::default();
        *auth.client.lock().unwrap() = Some(user);
        auth
    }

    pub fn accepting_vendor(user: UserIdentity) -> Self {
        let auth = Self::default();
        auth.set_vendor(user);
        auth
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn set_vendor(&self, user: UserIdentity) {
        *self.vendor.lock().unwrap() = Some(user);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn rejected() -> GremioError {
        GremioError::http(401, "Credenciales incorrectas")
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login_client(&self, _credentials: &Credentials) -> Result<UserIdentity> {
        self.calls.lock().unwrap().push("login_client");
        if self.offline {
            return Err(GremioError::transport("connection refused"));
        }
        self.client.lock().unwrap().clone().ok_or_else(Self::rejected)
    }

    async fn login_vendor(&self, _credentials: &Credentials) -> Result<UserIdentity> {
        self.calls.lock().unwrap().push("login_vendor");
        self.vendor.lock().unwrap().clone().ok_or_else(Self::rejected)
    }

    async fn register_client(&self, _registration: &ClientRegistration) -> Result<()> {
        self.calls.lock().unwrap().push("register_client");
        Ok(())
    }

    async fn register_vendor(&self, _registration: &VendorRegistration) -> Result<()> {
        self.calls.lock().unwrap().push("register_vendor");
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeProfiles {
    name: Mutex<Option<String>>,
    specialties: Mutex<Vec<String>>,
}

impl FakeProfiles {
    pub fn set_specialties(&self, codes: Vec<String>) {
        *self.specialties.lock().unwrap() = codes;
    }
}

#[async_trait]
impl ProfileRepository for FakeProfiles {
    async fn fetch(&self, user: &UserIdentity) -> Result<Profile> {
        Ok(Profile {
            id: user.id,
            name: self
                .name
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| user.name.clone()),
            email: user.email.clone(),
            specialties: self.specialties.lock().unwrap().clone(),
            ..Default::default()
        })
    }

    async fn update(&self, _user: &UserIdentity, update: &ProfileUpdate) -> Result<()> {
        *self.name.lock().unwrap() = Some(update.name.clone());
        Ok(())
    }
}

// ---- projects ----

#[derive(Default)]
pub struct FakeProjects {
    items: Mutex<Vec<Project>>,
    calls: Mutex<Vec<String>>,
}

impl FakeProjects {
    pub fn seed(&self, items: Vec<Project>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProjectRepository for FakeProjects {
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Project>> {
        self.record(format!("list_for_client({client_id})"));
        Ok(self.items.lock().unwrap().clone())
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Project>> {
        self.record(format!("list_for_vendor({vendor_id})"));
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, project_id: i64) -> Result<Project> {
        self.record(format!("find_by_id({project_id})"));
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| GremioError::http(404, "Proyecto no encontrado"))
    }

    async fn update(&self, project_id: i64, update: &ProjectUpdate) -> Result<Project> {
        self.record(format!("update({project_id})"));
        let mut items = self.items.lock().unwrap();
        let project = items
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| GremioError::http(404, "Proyecto no encontrado"))?;
        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(progress) = update.progress {
            project.progress = progress;
        }
        Ok(project.clone())
    }

    async fn delete(&self, project_id: i64) -> Result<()> {
        self.record(format!("delete({project_id})"));
        self.items.lock().unwrap().retain(|p| p.id != project_id);
        Ok(())
    }
}

// ---- sub-tasks ----

#[derive(Default)]
pub struct FakeSubtasks {
    items: Mutex<Vec<Subtask>>,
    accepted: Mutex<Vec<(i64, i64)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSubtasks {
    pub fn seed(&self, items: Vec<Subtask>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn accepted(&self) -> Vec<(i64, i64)> {
        self.accepted.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn count(items: &[Subtask], status: SubtaskStatus) -> u32 {
        items.iter().filter(|s| s.status == status).count() as u32
    }
}

#[async_trait]
impl SubtaskRepository for FakeSubtasks {
    async fn list_for_project(&self, project_id: i64) -> Result<ProjectSubtasks> {
        self.record(format!("list_for_project({project_id})"));
        let subtasks: Vec<Subtask> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.project_id == Some(project_id))
            .cloned()
            .collect();
        let completed = Self::count(&subtasks, SubtaskStatus::Completado);
        let total = subtasks.len() as u32;
        Ok(ProjectSubtasks {
            project_id,
            project_title: format!("Proyecto {project_id}"),
            counts: SubtaskCounts {
                total,
                pending: Self::count(&subtasks, SubtaskStatus::Pendiente),
                assigned: Self::count(&subtasks, SubtaskStatus::Asignada),
                in_progress: Self::count(&subtasks, SubtaskStatus::EnProgreso),
                completed,
                progress_percent: if total == 0 { 0 } else { completed * 100 / total },
            },
            subtasks,
        })
    }

    async fn list_available(&self, filter: &SubtaskFilter) -> Result<Vec<Subtask>> {
        self.record("list_available".into());
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == SubtaskStatus::Pendiente && s.vendor_id.is_none())
            .filter(|s| filter.specialty.as_ref().is_none_or(|sp| sp == &s.specialty))
            .filter(|s| filter.priority.is_none_or(|p| p == s.priority))
            .cloned()
            .collect())
    }

    async fn list_for_vendor(
        &self,
        vendor_id: i64,
        status: Option<SubtaskStatus>,
    ) -> Result<Vec<Subtask>> {
        self.record(format!("list_for_vendor({vendor_id})"));
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.vendor_id == Some(vendor_id))
            .filter(|s| status.is_none_or(|st| st == s.status))
            .cloned()
            .collect())
    }

    async fn accept(&self, subtask_id: i64, vendor_id: i64) -> Result<()> {
        self.record(format!("accept({subtask_id})"));
        let mut items = self.items.lock().unwrap();
        let subtask = items
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| GremioError::not_found("Subtask", subtask_id.to_string()))?;
        subtask.vendor_id = Some(vendor_id);
        subtask.status = SubtaskStatus::Asignada;
        self.accepted.lock().unwrap().push((subtask_id, vendor_id));
        Ok(())
    }

    async fn update_progress(
        &self,
        subtask_id: i64,
        status: SubtaskStatus,
        _notes: Option<String>,
    ) -> Result<()> {
        self.record(format!("update_progress({subtask_id})"));
        let mut items = self.items.lock().unwrap();
        let subtask = items
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| GremioError::not_found("Subtask", subtask_id.to_string()))?;
        subtask.status = status;
        Ok(())
    }

    async fn vendor_stats(&self, vendor_id: i64) -> Result<VendorStats> {
        self.record(format!("vendor_stats({vendor_id})"));
        let mine: Vec<Subtask> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.vendor_id == Some(vendor_id))
            .cloned()
            .collect();
        let total = mine.len() as u32;
        let completed = Self::count(&mine, SubtaskStatus::Completado);
        Ok(VendorStats {
            total,
            completed,
            in_progress: Self::count(&mine, SubtaskStatus::EnProgreso),
            assigned: Self::count(&mine, SubtaskStatus::Asignada),
            completion_rate: if total == 0 { 0 } else { completed * 100 / total },
        })
    }

    async fn find_by_id(&self, subtask_id: i64) -> Result<SubtaskDetail> {
        self.record(format!("find_by_id({subtask_id})"));
        let subtask = self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == subtask_id)
            .cloned()
            .ok_or_else(|| GremioError::not_found("Subtask", subtask_id.to_string()))?;
        Ok(serde_json::from_value(json!({
            "subtarea": subtask,
            "proyecto": {"id": 3, "titulo": "Proyecto 3"}
        }))?)
    }
}

// ---- requirements & solicitations ----

#[derive(Default)]
pub struct FakeRequirements {
    items: Mutex<Vec<Requirement>>,
}

impl FakeRequirements {
    pub fn seed(&self, items: Vec<Requirement>) {
        *self.items.lock().unwrap() = items;
    }
}

#[async_trait]
impl RequirementRepository for FakeRequirements {
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Requirement>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &NewRequirement) -> Result<Requirement> {
        let mut items = self.items.lock().unwrap();
        let mut created = requirement(items.len() as i64 + 1, None);
        created.client_id = new.client_id;
        created.message = new.message.clone();
        items.push(created.clone());
        Ok(created)
    }

    async fn list_available(&self, specialty: Option<&str>) -> Result<Vec<Requirement>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.vendor_id.is_none())
            .filter(|r| specialty.is_none_or(|s| s == r.specialty))
            .cloned()
            .collect())
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Requirement>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.vendor_id == Some(vendor_id))
            .cloned()
            .collect())
    }

    async fn assign(&self, requirement_id: i64, vendor_id: i64) -> Result<RequirementAssignment> {
        let mut items = self.items.lock().unwrap();
        let requirement = items
            .iter_mut()
            .find(|r| r.id == requirement_id)
            .ok_or_else(|| GremioError::http(404, "Requerimiento no encontrado"))?;
        requirement.vendor_id = Some(vendor_id);
        requirement.status = RequirementStatus::Asignado.to_string();
        Ok(RequirementAssignment {
            requirement: requirement.clone(),
            project_id: 11,
        })
    }

    async fn change_status(
        &self,
        requirement_id: i64,
        status: RequirementStatus,
    ) -> Result<Requirement> {
        let mut items = self.items.lock().unwrap();
        let requirement = items
            .iter_mut()
            .find(|r| r.id == requirement_id)
            .ok_or_else(|| GremioError::http(404, "Requerimiento no encontrado"))?;
        requirement.status = status.to_string();
        Ok(requirement.clone())
    }
}

#[derive(Default)]
pub struct FakeSolicitations {
    items: Mutex<Vec<Solicitation>>,
    responses: Mutex<Vec<(i64, SolicitationDecision)>>,
}

impl FakeSolicitations {
    pub fn seed(&self, items: Vec<Solicitation>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn responses(&self) -> Vec<(i64, SolicitationDecision)> {
        self.responses.lock().unwrap().clone()
    }
}

#[async_trait]
impl SolicitationRepository for FakeSolicitations {
    async fn send(&self, new: &NewSolicitation) -> Result<Solicitation> {
        let mut items = self.items.lock().unwrap();
        let mut sent = solicitation(100 + items.len() as i64, new.subtask_id, SolicitationStatus::Pendiente);
        sent.vendor_id = new.vendor_id;
        sent.message = new.message.clone();
        items.push(sent.clone());
        Ok(sent)
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Solicitation>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_for_project(&self, _project_id: i64) -> Result<Vec<Solicitation>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn respond(&self, solicitation_id: i64, decision: &SolicitationDecision) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|s| s.id == solicitation_id)
            .ok_or_else(|| GremioError::http(404, "Solicitud no encontrada"))?;
        item.status = match decision {
            SolicitationDecision::Accept => SolicitationStatus::Aceptada,
            SolicitationDecision::Reject { .. } => SolicitationStatus::Rechazada,
        };
        self.responses
            .lock()
            .unwrap()
            .push((solicitation_id, decision.clone()));
        Ok(())
    }
}

// ---- files & analysis ----

#[derive(Default)]
pub struct FakeFiles {
    items: Mutex<Vec<StoredFile>>,
}

#[async_trait]
impl FileRepository for FakeFiles {
    async fn list(&self, _scope: ConversationScope) -> Result<Vec<StoredFile>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn upload(
        &self,
        scope: ConversationScope,
        uploader: &UserIdentity,
        upload: FileUpload,
    ) -> Result<StoredFile> {
        let mut items = self.items.lock().unwrap();
        let (project_id, subtask_id) = match scope {
            ConversationScope::Project(id) => (Some(id), None),
            ConversationScope::Subtask(id) => (None, Some(id)),
        };
        let stored = StoredFile {
            id: 40 + items.len() as i64,
            project_id,
            subtask_id,
            original_name: upload.file_name,
            stored_name: None,
            size: upload.bytes.len() as u64,
            mime_type: Some(upload.mime_type),
            uploader_role: uploader.role,
            uploader_id: uploader.id,
            created_at: Some(Utc::now()),
        };
        items.insert(0, stored.clone());
        Ok(stored)
    }

    async fn download(&self, _file_id: i64) -> Result<Vec<u8>> {
        Ok(b"contenido".to_vec())
    }

    async fn delete(
        &self,
        _scope: ConversationScope,
        file_id: i64,
        _requester: &UserIdentity,
    ) -> Result<()> {
        self.items.lock().unwrap().retain(|f| f.id != file_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAnalysis {
    calls: Mutex<Vec<&'static str>>,
}

impl FakeAnalysis {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisRepository for FakeAnalysis {
    async fn start(&self, _client_id: i64, _initial_message: &str) -> Result<AnalysisTurn> {
        self.calls.lock().unwrap().push("start");
        Ok(serde_json::from_value(json!({
            "proyecto_id": 30,
            "respuesta_ia": "¿Qué métodos de pago necesitas?",
            "finalizado": false
        }))?)
    }

    async fn reply(&self, project_id: i64, _message: &str) -> Result<AnalysisTurn> {
        self.calls.lock().unwrap().push("reply");
        Ok(serde_json::from_value(json!({
            "proyecto_id": project_id,
            "respuesta_ia": "Listo, este es el plan.",
            "finalizado": true,
            "resumen": "Tienda online con pagos",
            "proyecto": {
                "titulo": "Tienda online",
                "presupuesto_estimado": "2500.00",
                "tiempo_estimado_dias": 30,
                "subtareas": [
                    {"titulo": "Catálogo", "especialidad": "DESARROLLO_WEB", "estimacion_horas": 20},
                    {"titulo": "Pasarela de pagos", "especialidad": "DESARROLLO_WEB", "estimacion_horas": 16}
                ]
            }
        }))?)
    }

    async fn publish(&self, project_id: i64) -> Result<PublishedProject> {
        self.calls.lock().unwrap().push("publish");
        Ok(PublishedProject {
            message: "Proyecto publicado exitosamente".into(),
            project_id,
            published_subtasks: 2,
        })
    }

    async fn history(&self, _project_id: i64) -> Result<Vec<AnalysisMessage>> {
        self.calls.lock().unwrap().push("history");
        Ok(serde_json::from_value(json!([
            {"id": 1, "emisor": "CLIENTE", "mensaje": "Quiero una tienda online"},
            {"id": 2, "emisor": "IA", "mensaje": "¿Qué métodos de pago necesitas?"}
        ]))?)
    }

    async fn specialties(&self) -> Result<Vec<Specialty>> {
        Ok(vec![Specialty {
            code: "DESARROLLO_WEB".into(),
            name: "Desarrollo web".into(),
        }])
    }
}

// ---- chat ----

#[derive(Default)]
pub struct FakeChat {
    stored: Mutex<Vec<ChatMessage>>,
    persisted: Mutex<Vec<ChatMessage>>,
    mark_read: Mutex<Vec<(ConversationScope, UserRole)>>,
}

impl FakeChat {
    pub fn seed(&self, messages: Vec<ChatMessage>) {
        *self.stored.lock().unwrap() = messages;
    }

    pub fn persisted(&self) -> Vec<ChatMessage> {
        self.persisted.lock().unwrap().clone()
    }

    pub fn mark_read_calls(&self) -> Vec<(ConversationScope, UserRole)> {
        self.mark_read.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRepository for FakeChat {
    async fn fetch_history(&self, scope: ConversationScope) -> Result<Vec<ChatMessage>> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.scope == scope)
            .cloned()
            .collect())
    }

    async fn persist(&self, message: &ChatMessage) -> Result<ChatMessage> {
        let mut stored = self.stored.lock().unwrap();
        let mut copy = message.clone();
        copy.id = Some(1000 + stored.len() as i64);
        copy.created_at = Some(Utc::now());
        stored.push(copy.clone());
        self.persisted.lock().unwrap().push(copy.clone());
        Ok(copy)
    }

    async fn mark_read(&self, scope: ConversationScope, reader: UserRole) -> Result<()> {
        self.mark_read.lock().unwrap().push((scope, reader));
        Ok(())
    }
}

/// Loopback transport: every sent message is echoed to subscribers.
pub struct FakeTransport {
    scope: Mutex<Option<ConversationScope>>,
    connects: Mutex<usize>,
    inbound: broadcast::Sender<ChatMessage>,
    status: watch::Sender<bool>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        let (inbound, _) = broadcast::channel(16);
        let (status, _) = watch::channel(false);
        Self {
            scope: Mutex::new(None),
            connects: Mutex::new(0),
            inbound,
            status,
        }
    }
}

impl FakeTransport {
    /// Delivers a message as if the server had relayed it.
    pub fn push(&self, message: ChatMessage) {
        let _ = self.inbound.send(message);
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock().unwrap()
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn connect(&self, scope: ConversationScope) -> Result<()> {
        *self.scope.lock().unwrap() = Some(scope);
        *self.connects.lock().unwrap() += 1;
        self.status.send_replace(true);
        Ok(())
    }

    async fn send(&self, message: &ChatMessage) -> bool {
        if !*self.status.borrow() {
            return false;
        }
        self.push(message.clone());
        true
    }

    async fn disconnect(&self) {
        *self.scope.lock().unwrap() = None;
        self.status.send_replace(false);
    }

    fn current_scope(&self) -> Option<ConversationScope> {
        *self.scope.lock().unwrap()
    }

    fn messages(&self) -> broadcast::Receiver<ChatMessage> {
        self.inbound.subscribe()
    }

    fn connection_status(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }
}

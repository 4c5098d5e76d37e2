//! Project domain model.
//!
//! A project is created when a client's requirement is analyzed and
//! published. Its sub-tasks are claimed by vendors individually.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectStatus {
    Asignado,
    EnProceso,
    Pausado,
    Completado,
    Cancelado,
}

impl ProjectStatus {
    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Asignado => "Assigned",
            Self::EnProceso => "In progress",
            Self::Pausado => "Paused",
            Self::Completado => "Completed",
            Self::Cancelado => "Cancelled",
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Asignado | Self::EnProceso)
    }
}

/// Name and contact of a project party, as embedded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, alias = "correo")]
    pub email: Option<String>,
}

/// A client project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(rename = "requerimiento_id", default)]
    pub requirement_id: Option<i64>,
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "vendedor_id", default)]
    pub vendor_id: Option<i64>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "estado")]
    pub status: ProjectStatus,
    /// 0-100
    #[serde(rename = "progreso", default)]
    pub progress: u8,
    #[serde(rename = "presupuesto", default)]
    pub budget: f64,
    #[serde(rename = "pagado", default)]
    pub paid: f64,
    #[serde(rename = "fecha_inicio", default, with = "timestamp::option")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_estimada", default, with = "timestamp::option")]
    pub estimated_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_completado", default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "total_subtareas", default)]
    pub total_subtasks: Option<u32>,
    #[serde(rename = "subtareas_completadas", default)]
    pub completed_subtasks: Option<u32>,
    #[serde(rename = "historia_usuario", default)]
    pub user_story: Option<String>,
    #[serde(rename = "cliente", default)]
    pub client: Option<PartyInfo>,
    #[serde(rename = "vendedor", default)]
    pub vendor: Option<PartyInfo>,
}

impl Project {
    /// Budget still owed to the vendor side.
    pub fn outstanding(&self) -> f64 {
        (self.budget - self.paid).max(0.0)
    }
}

/// Partial update sent with `PUT /proyectos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(rename = "progreso", skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(rename = "pagado", skip_serializing_if = "Option::is_none")]
    pub paid: Option<f64>,
    #[serde(
        rename = "fecha_estimada",
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option",
        default
    )]
    pub estimated_at: Option<DateTime<Utc>>,
    #[serde(rename = "presupuesto", skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_backend_payload() {
        let json = r#"{
            "id": 4,
            "requerimiento_id": null,
            "cliente_id": 2,
            "vendedor_id": null,
            "titulo": "Tienda online",
            "descripcion": null,
            "especialidad": "DESARROLLO_MEDIDA",
            "estado": "en_proceso",
            "progreso": 40,
            "presupuesto": 1500.0,
            "pagado": 500.0,
            "fecha_inicio": "2025-04-01T08:00:00",
            "fecha_estimada": null,
            "fecha_completado": null,
            "created_at": "2025-04-01T08:00:00",
            "updated_at": "2025-04-03T12:00:00",
            "cliente": {"id": 2, "nombre": "Ana", "email": null}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::EnProceso);
        assert_eq!(project.progress, 40);
        assert_eq!(project.outstanding(), 1000.0);
        assert_eq!(project.client.unwrap().name, "Ana");
    }

    #[test]
    fn test_update_only_sends_set_fields() {
        let update = ProjectUpdate {
            progress: Some(80),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"progreso": 80}));
    }
}

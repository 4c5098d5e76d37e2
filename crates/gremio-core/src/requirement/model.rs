//! Requirement domain model.
//!
//! A requirement is the free-text request a client posts before it is
//! analyzed into a project.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Known requirement states.
///
/// The backend stores the state as a free string, so [`Requirement::status`]
/// stays a `String` and this enum is only used for the values the client
/// itself sends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RequirementStatus {
    Pendiente,
    Asignado,
    EnProceso,
    Completado,
    Cancelado,
    Aceptado,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: i64,
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "cliente_nombre", default)]
    pub client_name: Option<String>,
    #[serde(rename = "vendedor_id", default)]
    pub vendor_id: Option<i64>,
    #[serde(rename = "vendedor_nombre", default)]
    pub vendor_name: Option<String>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fecha_creacion", default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Requirement {
    /// Parsed status, `None` for free-form values the backend may emit.
    pub fn known_status(&self) -> Option<RequirementStatus> {
        self.status.parse().ok()
    }

    pub fn is_assigned(&self) -> bool {
        self.vendor_id.is_some()
    }
}

/// Body of `POST /requerimientos/crear`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequirement {
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "mensaje")]
    pub message: String,
}

/// Response of `PUT /requerimientos/{id}/asignar`.
///
/// Assigning a requirement also creates its project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementAssignment {
    #[serde(rename = "requerimiento")]
    pub requirement: Requirement,
    #[serde(rename = "proyecto_id")]
    pub project_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_form_status_is_kept() {
        let json = r#"{
            "id": 3, "cliente_id": 2, "vendedor_id": null, "titulo": "Web",
            "mensaje": "Necesito una web", "descripcion": null,
            "especialidad": "DESARROLLO_MEDIDA",
            "estado": "Pendiente de revisión por vendedor especializado",
            "fecha_creacion": "2025-02-10T12:00:00"
        }"#;
        let req: Requirement = serde_json::from_str(json).unwrap();
        assert_eq!(req.known_status(), None);
        assert!(!req.is_assigned());

        let assigned = Requirement {
            status: "en_proceso".into(),
            vendor_id: Some(7),
            ..req
        };
        assert_eq!(assigned.known_status(), Some(RequirementStatus::EnProceso));
        assert!(assigned.is_assigned());
    }
}

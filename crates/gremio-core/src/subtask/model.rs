//! Sub-task domain model.

use crate::project::PartyInfo;
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Lifecycle state of a sub-task.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SubtaskStatus {
    Pendiente,
    Asignada,
    EnProgreso,
    Completado,
    Cancelado,
}

impl SubtaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pendiente => "Pending",
            Self::Asignada => "Assigned",
            Self::EnProgreso => "In progress",
            Self::Completado => "Completed",
            Self::Cancelado => "Cancelled",
        }
    }

    /// States a vendor may move an assigned sub-task into.
    pub fn is_progress_target(self) -> bool {
        matches!(self, Self::EnProgreso | Self::Completado)
    }
}

/// Priority assigned by the requirement analysis.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

/// A unit of work under a project, assignable to a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    /// Absent in the detail payload, where the project is embedded separately.
    #[serde(rename = "proyecto_id", default)]
    pub project_id: Option<i64>,
    #[serde(rename = "proyecto_titulo", default)]
    pub project_title: Option<String>,
    #[serde(rename = "cliente_nombre", default)]
    pub client_name: Option<String>,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "vendedor_id", default)]
    pub vendor_id: Option<i64>,
    #[serde(rename = "vendedor_nombre", default)]
    pub vendor_name: Option<String>,
    #[serde(rename = "estado")]
    pub status: SubtaskStatus,
    #[serde(rename = "prioridad")]
    pub priority: Priority,
    #[serde(rename = "presupuesto", default)]
    pub budget: f64,
    #[serde(rename = "pagado", default)]
    pub paid: f64,
    #[serde(rename = "estimacion_horas", default)]
    pub estimated_hours: Option<u32>,
    #[serde(rename = "fecha_asignacion", default, with = "timestamp::option")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_inicio", default, with = "timestamp::option")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_completado", default, with = "timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-status counts for a project's sub-tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtaskCounts {
    pub total: u32,
    #[serde(rename = "pendientes")]
    pub pending: u32,
    #[serde(rename = "asignadas")]
    pub assigned: u32,
    #[serde(rename = "en_progreso")]
    pub in_progress: u32,
    #[serde(rename = "completadas")]
    pub completed: u32,
    #[serde(rename = "progreso_porcentaje")]
    pub progress_percent: u32,
}

/// Response of `GET /subtareas/proyecto/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSubtasks {
    #[serde(rename = "proyecto_id")]
    pub project_id: i64,
    #[serde(rename = "proyecto_titulo", default)]
    pub project_title: String,
    #[serde(rename = "estadisticas")]
    pub counts: SubtaskCounts,
    #[serde(rename = "subtareas")]
    pub subtasks: Vec<Subtask>,
}

/// Aggregate numbers for one vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorStats {
    #[serde(rename = "total_subtareas")]
    pub total: u32,
    #[serde(rename = "completadas")]
    pub completed: u32,
    #[serde(rename = "en_progreso")]
    pub in_progress: u32,
    #[serde(rename = "asignadas")]
    pub assigned: u32,
    /// 0-100
    #[serde(rename = "tasa_completacion")]
    pub completion_rate: u32,
}

/// Minimal project view embedded in a sub-task detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "fase", default)]
    pub phase: Option<String>,
    #[serde(rename = "presupuesto", default)]
    pub budget: f64,
}

/// Response of `GET /subtareas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskDetail {
    #[serde(rename = "subtarea")]
    pub subtask: Subtask,
    #[serde(rename = "proyecto")]
    pub project: ProjectSummary,
    #[serde(rename = "cliente", default)]
    pub client: Option<PartyInfo>,
    #[serde(rename = "vendedor", default)]
    pub vendor: Option<PartyInfo>,
}

/// Query filters for the vendor's open sub-task board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskFilter {
    pub specialty: Option<String>,
    pub priority: Option<Priority>,
}

impl SubtaskFilter {
    /// Query-string pairs, omitting unset filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(specialty) = &self.specialty {
            pairs.push(("especialidad", specialty.clone()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("prioridad", priority.to_string()));
        }
        pairs
    }
}

//! Solicitation domain model.
//!
//! A vendor asks to be assigned a sub-task; the project's client accepts or
//! rejects. Accepting one solicitation rejects the other pending ones for the
//! same sub-task on the backend.

use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SolicitationStatus {
    Pendiente,
    Aceptada,
    Rechazada,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solicitation {
    pub id: i64,
    #[serde(rename = "subtarea_id")]
    pub subtask_id: i64,
    #[serde(rename = "vendedor_id")]
    pub vendor_id: i64,
    #[serde(rename = "estado")]
    pub status: SolicitationStatus,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(rename = "motivo_rechazo", default)]
    pub rejection_reason: Option<String>,
    #[serde(rename = "fecha_solicitud", default, with = "timestamp::option")]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_respuesta", default, with = "timestamp::option")]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(rename = "subtarea_codigo", default)]
    pub subtask_code: Option<String>,
    #[serde(rename = "subtarea_titulo", default)]
    pub subtask_title: Option<String>,
    #[serde(rename = "vendedor_nombre", default)]
    pub vendor_name: Option<String>,
    #[serde(rename = "vendedor_email", default)]
    pub vendor_email: Option<String>,
}

impl Solicitation {
    pub fn is_pending(&self) -> bool {
        self.status == SolicitationStatus::Pendiente
    }
}

/// Body of `POST /solicitudes/enviar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSolicitation {
    #[serde(rename = "subtarea_id")]
    pub subtask_id: i64,
    #[serde(rename = "vendedor_id")]
    pub vendor_id: i64,
    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The client's answer to a pending solicitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DecisionWire", from = "DecisionWire")]
pub enum SolicitationDecision {
    Accept,
    Reject { reason: Option<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DecisionWire {
    accion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    motivo_rechazo: Option<String>,
}

impl From<SolicitationDecision> for DecisionWire {
    fn from(decision: SolicitationDecision) -> Self {
        match decision {
            SolicitationDecision::Accept => Self {
                accion: "ACEPTAR".into(),
                motivo_rechazo: None,
            },
            SolicitationDecision::Reject { reason } => Self {
                accion: "RECHAZAR".into(),
                motivo_rechazo: reason,
            },
        }
    }
}

impl From<DecisionWire> for SolicitationDecision {
    fn from(wire: DecisionWire) -> Self {
        if wire.accion.eq_ignore_ascii_case("ACEPTAR") {
            Self::Accept
        } else {
            Self::Reject {
                reason: wire.motivo_rechazo,
            }
        }
    }
}

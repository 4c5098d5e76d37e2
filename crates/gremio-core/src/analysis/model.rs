//! Requirement analysis conversation model.
//!
//! A client describes what they need; the assistant asks follow-up questions
//! until it can propose a project broken into sub-tasks, which the client
//! then publishes to vendors.

use crate::subtask::Priority;
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One assistant reply, from either `iniciar` or `continuar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTurn {
    /// Always present when starting; present on the final turn when continuing.
    #[serde(rename = "proyecto_id", default)]
    pub project_id: Option<i64>,
    #[serde(rename = "respuesta_ia")]
    pub reply: String,
    /// `true` once the assistant has produced a project proposal.
    #[serde(rename = "finalizado", default)]
    pub finished: bool,
    #[serde(rename = "proyecto", default)]
    pub project: Option<AnalyzedProject>,
    #[serde(rename = "resumen", default)]
    pub summary: Option<String>,
    #[serde(rename = "tokens_usados", default)]
    pub tokens_used: Option<u32>,
}

/// The assistant's project proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedProject {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "historia_usuario", default)]
    pub user_story: String,
    #[serde(rename = "descripcion_completa", default)]
    pub description: String,
    #[serde(rename = "criterios_aceptacion", default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(
        rename = "presupuesto_estimado",
        default,
        deserialize_with = "number_or_string"
    )]
    pub estimated_budget: f64,
    #[serde(rename = "tiempo_estimado_dias", default)]
    pub estimated_days: u32,
    #[serde(rename = "subtareas", default)]
    pub subtasks: Vec<ProposedSubtask>,
}

impl AnalyzedProject {
    pub fn total_hours(&self) -> u32 {
        self.subtasks.iter().map(|s| s.estimated_hours).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedSubtask {
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "especialidad")]
    pub specialty: String,
    #[serde(rename = "prioridad", default = "default_priority")]
    pub priority: Priority,
    #[serde(rename = "estimacion_horas", default)]
    pub estimated_hours: u32,
    #[serde(rename = "dependencias", default)]
    pub dependencies: Vec<String>,
}

fn default_priority() -> Priority {
    Priority::Media
}

/// Response of `POST /chat-analisis/publicar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedProject {
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "proyecto_id")]
    pub project_id: i64,
    #[serde(rename = "subtareas_publicadas")]
    pub published_subtasks: u32,
}

/// Who wrote an analysis conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisSender {
    Cliente,
    Vendedor,
    Ia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMessage {
    pub id: i64,
    #[serde(rename = "emisor")]
    pub sender: AnalysisSender,
    #[serde(rename = "mensaje")]
    pub body: String,
    #[serde(default, with = "timestamp::option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "metadatos", default)]
    pub metadata: Option<serde_json::Value>,
}

/// A service specialty vendors register under and sub-tasks are tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Budgets sometimes arrive as decimal strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {text}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_turn_with_proposal() {
        let json = r#"{
            "exito": true,
            "respuesta_ia": "Listo, aquí está tu proyecto",
            "finalizado": true,
            "proyecto_id": 12,
            "proyecto": {
                "titulo": "Tienda online",
                "historia_usuario": "Como cliente quiero vender",
                "descripcion_completa": "Tienda con pagos",
                "criterios_aceptacion": ["Pagos con tarjeta"],
                "presupuesto_estimado": "1500.50",
                "tiempo_estimado_dias": 30,
                "subtareas": [
                    {"codigo": "T1", "titulo": "Backend", "descripcion": "API",
                     "especialidad": "DESARROLLO_MEDIDA", "prioridad": "ALTA",
                     "estimacion_horas": 40, "dependencias": []},
                    {"codigo": "T2", "titulo": "Hosting", "descripcion": "Deploy",
                     "especialidad": "HOSTING", "estimacion_horas": 8,
                     "dependencias": ["T1"]}
                ],
                "total_subtareas": 2
            },
            "resumen": "2 sub-tareas",
            "tokens_usados": 812
        }"#;
        let turn: AnalysisTurn = serde_json::from_str(json).unwrap();
        assert!(turn.finished);
        let project = turn.project.unwrap();
        assert_eq!(project.estimated_budget, 1500.5);
        assert_eq!(project.subtasks[1].priority, Priority::Media);
        assert_eq!(project.total_hours(), 48);
    }

    #[test]
    fn test_intermediate_turn() {
        let json = r#"{"exito": true, "respuesta_ia": "¿Qué presupuesto tienes?",
                       "finalizado": false, "tokens_usados": 120}"#;
        let turn: AnalysisTurn = serde_json::from_str(json).unwrap();
        assert!(!turn.finished);
        assert!(turn.project_id.is_none());
        assert!(turn.project.is_none());
    }
}

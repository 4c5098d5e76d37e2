use crate::http::{ApiClient, Envelope};
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::analysis::{
    AnalysisMessage, AnalysisRepository, AnalysisTurn, PublishedProject, Specialty,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RestAnalysisApi {
    api: ApiClient,
}

impl RestAnalysisApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct StartBody<'a> {
    cliente_id: i64,
    mensaje_inicial: &'a str,
}

#[derive(Serialize)]
struct ReplyBody<'a> {
    proyecto_id: i64,
    mensaje: &'a str,
}

#[derive(Serialize)]
struct PublishBody {
    proyecto_id: i64,
}

#[derive(Deserialize)]
struct HistoryBody {
    #[serde(default)]
    mensajes: Vec<AnalysisMessage>,
}

#[derive(Deserialize)]
struct SpecialtiesBody {
    #[serde(default)]
    especialidades: Vec<Specialty>,
}

#[async_trait]
impl AnalysisRepository for RestAnalysisApi {
    async fn start(&self, client_id: i64, initial_message: &str) -> Result<AnalysisTurn> {
        let body: Envelope<AnalysisTurn> = self
            .api
            .post_json(
                "/chat-analisis/iniciar",
                &StartBody {
                    cliente_id: client_id,
                    mensaje_inicial: initial_message,
                },
            )
            .await?;
        body.into_result()
    }

    async fn reply(&self, project_id: i64, message: &str) -> Result<AnalysisTurn> {
        let body: Envelope<AnalysisTurn> = self
            .api
            .post_json(
                "/chat-analisis/continuar",
                &ReplyBody {
                    proyecto_id: project_id,
                    mensaje: message,
                },
            )
            .await?;
        body.into_result()
    }

    async fn publish(&self, project_id: i64) -> Result<PublishedProject> {
        let body: Envelope<PublishedProject> = self
            .api
            .post_json(
                "/chat-analisis/publicar",
                &PublishBody {
                    proyecto_id: project_id,
                },
            )
            .await?;
        body.into_result()
    }

    async fn history(&self, project_id: i64) -> Result<Vec<AnalysisMessage>> {
        let body: Envelope<HistoryBody> = self
            .api
            .get_json(&format!("/chat-analisis/historial/{project_id}"), &[])
            .await?;
        Ok(body.into_result()?.mensajes)
    }

    async fn specialties(&self) -> Result<Vec<Specialty>> {
        let body: Envelope<SpecialtiesBody> = self
            .api
            .get_json("/chat-analisis/especialidades", &[])
            .await?;
        Ok(body.into_result()?.especialidades)
    }
}

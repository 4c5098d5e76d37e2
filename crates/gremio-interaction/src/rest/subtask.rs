use crate::http::{Ack, ApiClient, Envelope};
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::subtask::{
    ProjectSubtasks, Subtask, SubtaskDetail, SubtaskFilter, SubtaskRepository, SubtaskStatus,
    VendorStats,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RestSubtaskApi {
    api: ApiClient,
}

impl RestSubtaskApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Deserialize)]
struct SubtaskList {
    subtareas: Vec<Subtask>,
}

#[derive(Deserialize)]
struct StatsBody {
    estadisticas: VendorStats,
}

#[derive(Serialize)]
struct AcceptBody {
    subtarea_id: i64,
    vendedor_id: i64,
}

#[derive(Serialize)]
struct ProgressBody {
    subtarea_id: i64,
    estado: SubtaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notas: Option<String>,
}

#[async_trait]
impl SubtaskRepository for RestSubtaskApi {
    async fn list_for_project(&self, project_id: i64) -> Result<ProjectSubtasks> {
        let body: Envelope<ProjectSubtasks> = self
            .api
            .get_json(&format!("/subtareas/proyecto/{project_id}"), &[])
            .await?;
        body.into_result()
    }

    async fn list_available(&self, filter: &SubtaskFilter) -> Result<Vec<Subtask>> {
        self.api
            .get_json("/subtareas/disponibles", &filter.query_pairs())
            .await
    }

    async fn list_for_vendor(
        &self,
        vendor_id: i64,
        status: Option<SubtaskStatus>,
    ) -> Result<Vec<Subtask>> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("estado", s.to_string())])
            .unwrap_or_default();
        let body: Envelope<SubtaskList> = self
            .api
            .get_json(&format!("/subtareas/mis-subtareas/{vendor_id}"), &query)
            .await?;
        Ok(body.into_result()?.subtareas)
    }

    async fn accept(&self, subtask_id: i64, vendor_id: i64) -> Result<()> {
        let body: Envelope<Ack> = self
            .api
            .post_json(
                "/subtareas/aceptar",
                &AcceptBody {
                    subtarea_id: subtask_id,
                    vendedor_id: vendor_id,
                },
            )
            .await?;
        body.into_result().map(|_| ())
    }

    async fn update_progress(
        &self,
        subtask_id: i64,
        status: SubtaskStatus,
        notes: Option<String>,
    ) -> Result<()> {
        let body: Envelope<Ack> = self
            .api
            .put_json(
                "/subtareas/actualizar-progreso",
                &ProgressBody {
                    subtarea_id: subtask_id,
                    estado: status,
                    notas: notes,
                },
            )
            .await?;
        body.into_result().map(|_| ())
    }

    async fn vendor_stats(&self, vendor_id: i64) -> Result<VendorStats> {
        let body: Envelope<StatsBody> = self
            .api
            .get_json(&format!("/subtareas/estadisticas/vendedor/{vendor_id}"), &[])
            .await?;
        Ok(body.into_result()?.estadisticas)
    }

    async fn find_by_id(&self, subtask_id: i64) -> Result<SubtaskDetail> {
        let body: Envelope<SubtaskDetail> = self
            .api
            .get_json(&format!("/subtareas/{subtask_id}"), &[])
            .await?;
        body.into_result()
    }
}

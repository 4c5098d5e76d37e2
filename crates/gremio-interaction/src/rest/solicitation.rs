use crate::http::{Ack, ApiClient};
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::solicitation::{
    NewSolicitation, Solicitation, SolicitationDecision, SolicitationRepository,
};

#[derive(Debug, Clone)]
pub struct RestSolicitationApi {
    api: ApiClient,
}

impl RestSolicitationApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SolicitationRepository for RestSolicitationApi {
    async fn send(&self, solicitation: &NewSolicitation) -> Result<Solicitation> {
        self.api.post_json("/solicitudes/enviar", solicitation).await
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Solicitation>> {
        self.api
            .get_json(&format!("/solicitudes/vendedor/{vendor_id}"), &[])
            .await
    }

    async fn list_for_project(&self, project_id: i64) -> Result<Vec<Solicitation>> {
        self.api
            .get_json(&format!("/solicitudes/proyecto/{project_id}"), &[])
            .await
    }

    async fn respond(&self, solicitation_id: i64, decision: &SolicitationDecision) -> Result<()> {
        let _: Ack = self
            .api
            .put_json(&format!("/solicitudes/{solicitation_id}/responder"), decision)
            .await?;
        Ok(())
    }
}

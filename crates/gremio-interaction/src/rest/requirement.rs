use crate::http::ApiClient;
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::requirement::{
    NewRequirement, Requirement, RequirementAssignment, RequirementRepository, RequirementStatus,
};

#[derive(Debug, Clone)]
pub struct RestRequirementApi {
    api: ApiClient,
}

impl RestRequirementApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RequirementRepository for RestRequirementApi {
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Requirement>> {
        self.api
            .get_json(&format!("/requerimientos/cliente/{client_id}"), &[])
            .await
    }

    async fn create(&self, requirement: &NewRequirement) -> Result<Requirement> {
        self.api
            .post_json("/requerimientos/crear", requirement)
            .await
    }

    async fn list_available(&self, specialty: Option<&str>) -> Result<Vec<Requirement>> {
        let query: Vec<(&str, String)> = specialty
            .map(|s| vec![("especialidad", s.to_string())])
            .unwrap_or_default();
        self.api
            .get_json("/requerimientos/vendedor/disponibles", &query)
            .await
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Requirement>> {
        self.api
            .get_json(&format!("/requerimientos/vendedor/{vendor_id}"), &[])
            .await
    }

    async fn assign(&self, requirement_id: i64, vendor_id: i64) -> Result<RequirementAssignment> {
        self.api
            .put_query(
                &format!("/requerimientos/{requirement_id}/asignar"),
                &[("vendedor_id", vendor_id.to_string())],
            )
            .await
    }

    async fn change_status(
        &self,
        requirement_id: i64,
        status: RequirementStatus,
    ) -> Result<Requirement> {
        self.api
            .put_query(
                &format!("/requerimientos/{requirement_id}/estado"),
                &[("nuevo_estado", status.to_string())],
            )
            .await
    }
}

use crate::http::ApiClient;
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::project::{Project, ProjectRepository, ProjectUpdate};

#[derive(Debug, Clone)]
pub struct RestProjectApi {
    api: ApiClient,
}

impl RestProjectApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProjectRepository for RestProjectApi {
    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Project>> {
        self.api
            .get_json(&format!("/proyectos/cliente/{client_id}"), &[])
            .await
    }

    async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Project>> {
        self.api
            .get_json(&format!("/proyectos/vendedor/{vendor_id}"), &[])
            .await
    }

    async fn find_by_id(&self, project_id: i64) -> Result<Project> {
        self.api
            .get_json(&format!("/proyectos/{project_id}"), &[])
            .await
    }

    async fn update(&self, project_id: i64, update: &ProjectUpdate) -> Result<Project> {
        self.api
            .put_json(&format!("/proyectos/{project_id}"), update)
            .await
    }

    async fn delete(&self, project_id: i64) -> Result<()> {
        self.api
            .delete(&format!("/proyectos/{project_id}"), &[])
            .await
    }
}

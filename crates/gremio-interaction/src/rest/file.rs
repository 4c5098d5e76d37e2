use crate::http::ApiClient;
use async_trait::async_trait;
use gremio_core::chat::ConversationScope;
use gremio_core::file::{FileRepository, FileUpload, StoredFile};
use gremio_core::user::UserIdentity;
use gremio_core::{GremioError, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// Project files live under `/archivos`; sub-task files hang off the
/// sub-task chat routes.
#[derive(Debug, Clone)]
pub struct RestFileApi {
    api: ApiClient,
}

impl RestFileApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn file_part(upload: FileUpload) -> Result<Part> {
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.mime_type)
        .map_err(|e| GremioError::validation(format!("invalid MIME type: {e}")))
}

/// Reads a local file into an upload, guessing its MIME type from the extension.
pub fn read_upload(path: &Path) -> Result<FileUpload> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| GremioError::validation(format!("not a file path: {}", path.display())))?
        .to_string();
    let bytes = std::fs::read(path)?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(FileUpload {
        file_name,
        mime_type,
        bytes,
    })
}

#[async_trait]
impl FileRepository for RestFileApi {
    async fn list(&self, scope: ConversationScope) -> Result<Vec<StoredFile>> {
        let path = match scope {
            ConversationScope::Project(id) => format!("/archivos/proyecto/{id}"),
            ConversationScope::Subtask(id) => format!("/chat/subtarea/{id}/archivos"),
        };
        self.api.get_json(&path, &[]).await
    }

    async fn upload(
        &self,
        scope: ConversationScope,
        uploader: &UserIdentity,
        upload: FileUpload,
    ) -> Result<StoredFile> {
        tracing::info!(
            "Uploading {} ({} bytes) to {}",
            upload.file_name,
            upload.bytes.len(),
            scope
        );
        let part = file_part(upload)?;
        match scope {
            ConversationScope::Project(id) => {
                let form = Form::new()
                    .text("proyecto_id", id.to_string())
                    .text("subido_por_tipo", uploader.role.as_wire())
                    .text("subido_por_id", uploader.id.to_string())
                    .part("file", part);
                self.api.post_multipart("/archivos/upload", &[], form).await
            }
            ConversationScope::Subtask(id) => {
                let form = Form::new().part("archivo", part);
                let query = [
                    ("subido_por_id", uploader.id.to_string()),
                    ("subido_por_tipo", uploader.role.as_wire().to_string()),
                ];
                self.api
                    .post_multipart(&format!("/chat/subtarea/{id}/archivo"), &query, form)
                    .await
            }
        }
    }

    async fn download(&self, file_id: i64) -> Result<Vec<u8>> {
        self.api
            .get_bytes(&format!("/archivos/download/{file_id}"))
            .await
    }

    async fn delete(
        &self,
        scope: ConversationScope,
        file_id: i64,
        requester: &UserIdentity,
    ) -> Result<()> {
        match scope {
            ConversationScope::Project(_) => {
                self.api
                    .delete(&format!("/archivos/{file_id}"), &[])
                    .await
            }
            ConversationScope::Subtask(_) => {
                let query = [
                    ("usuario_id", requester.id.to_string()),
                    ("usuario_tipo", requester.role.as_wire().to_string()),
                ];
                self.api
                    .delete(&format!("/chat/archivo/{file_id}"), &query)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_upload_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.file_name, "brief.pdf");
        assert_eq!(upload.mime_type, "application/pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4");
    }
}

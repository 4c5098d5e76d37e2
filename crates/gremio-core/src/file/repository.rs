use super::model::{FileUpload, StoredFile};
use crate::chat::ConversationScope;
use crate::error::Result;
use crate::user::UserIdentity;
use async_trait::async_trait;

/// Access to project and sub-task attachments.
///
/// Files share the conversation scope of the chat they are shown next to.
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn list(&self, scope: ConversationScope) -> Result<Vec<StoredFile>>;

    async fn upload(
        &self,
        scope: ConversationScope,
        uploader: &UserIdentity,
        upload: FileUpload,
    ) -> Result<StoredFile>;

    /// Raw content of a project file.
    async fn download(&self, file_id: i64) -> Result<Vec<u8>>;

    async fn delete(
        &self,
        scope: ConversationScope,
        file_id: i64,
        requester: &UserIdentity,
    ) -> Result<()>;
}

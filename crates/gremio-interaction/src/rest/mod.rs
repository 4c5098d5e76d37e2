//! REST clients, one per backend resource.
//!
//! Each client wraps a shared [`ApiClient`](crate::http::ApiClient) and
//! implements the matching port from `gremio_core`.

mod analysis;
mod auth;
mod chat;
mod file;
mod project;
mod requirement;
mod solicitation;
mod subtask;

pub use analysis::RestAnalysisApi;
pub use auth::{RestAuthApi, RestProfileApi};
pub use chat::RestChatApi;
pub use file::{RestFileApi, read_upload};
pub use project::RestProjectApi;
pub use requirement::RestRequirementApi;
pub use solicitation::RestSolicitationApi;
pub use subtask::RestSubtaskApi;

//! View controllers.
//!
//! Each view reads the session and route parameters, fetches what it shows
//! on `activate`, and keeps plain flags (`loading`, `sending`, ...) for the
//! frontend to render.

mod analysis_chat;
mod chat;
mod profile;
mod project_detail;
mod projects;
mod requirements;
mod subtask_board;

pub use analysis_chat::{AnalysisChatView, TranscriptEntry};
pub use chat::{ChatFeed, ChatState, ChatView};
pub use profile::ProfileView;
pub use project_detail::ProjectDetailView;
pub use projects::ProjectsView;
pub use requirements::RequirementsView;
pub use subtask_board::{ProjectGroup, SubtaskBoardView};

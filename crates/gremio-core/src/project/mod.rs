//! Project domain module.

mod model;
mod repository;

pub use model::{PartyInfo, Project, ProjectStatus, ProjectUpdate};
pub use repository::ProjectRepository;

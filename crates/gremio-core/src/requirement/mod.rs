//! Requirement domain module.

mod model;
mod repository;

pub use model::{NewRequirement, Requirement, RequirementAssignment, RequirementStatus};
pub use repository::RequirementRepository;

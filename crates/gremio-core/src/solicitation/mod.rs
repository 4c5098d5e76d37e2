//! Solicitation domain module.

mod model;
mod repository;

pub use model::{NewSolicitation, Solicitation, SolicitationDecision, SolicitationStatus};
pub use repository::SolicitationRepository;

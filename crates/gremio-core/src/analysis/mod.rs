//! Requirement analysis assistant module.

mod model;
mod repository;

pub use model::{
    AnalysisMessage, AnalysisSender, AnalysisTurn, AnalyzedProject, ProposedSubtask,
    PublishedProject, Specialty,
};
pub use repository::AnalysisRepository;

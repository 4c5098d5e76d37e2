//! Sub-task domain module.

mod model;
mod repository;

pub use model::{
    Priority, ProjectSubtasks, ProjectSummary, Subtask, SubtaskCounts, SubtaskDetail,
    SubtaskFilter, SubtaskStatus, VendorStats,
};
pub use repository::SubtaskRepository;

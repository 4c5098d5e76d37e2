//! File attachment module.

mod model;
mod repository;

pub use model::{FileKind, FileUpload, StoredFile, format_size};
pub use repository::FileRepository;

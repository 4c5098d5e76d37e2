//! Stored file model and display helpers.

use crate::timestamp;
use crate::user::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::Display;

/// A file attached to a project or a sub-task conversation.
///
/// Project files and sub-task files come from different endpoints with
/// slightly different shapes; both decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    #[serde(rename = "proyecto_id", default)]
    pub project_id: Option<i64>,
    #[serde(rename = "subtarea_id", default)]
    pub subtask_id: Option<i64>,
    #[serde(rename = "nombre_original")]
    pub original_name: String,
    #[serde(rename = "nombre_guardado", default)]
    pub stored_name: Option<String>,
    /// Size in bytes.
    #[serde(rename = "tamanio", alias = "tamano", default)]
    pub size: u64,
    #[serde(rename = "tipo_mime", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "subido_por_tipo")]
    pub uploader_role: UserRole,
    #[serde(rename = "subido_por_id")]
    pub uploader_id: i64,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredFile {
    pub fn human_size(&self) -> String {
        format_size(self.size)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.original_name)
    }
}

/// Content to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Coarse file category, used for listing icons and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Document,
    Spreadsheet,
    Image,
    Archive,
    Text,
    Video,
    Audio,
    Other,
}

impl FileKind {
    /// Classifies by extension, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("doc" | "docx") => Self::Document,
            Some("xls" | "xlsx") => Self::Spreadsheet,
            Some("png" | "jpg" | "jpeg" | "gif") => Self::Image,
            Some("zip" | "rar") => Self::Archive,
            Some("txt") => Self::Text,
            Some("mp4") => Self::Video,
            Some("mp3") => Self::Audio,
            _ => Self::Other,
        }
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count with base-1024 units and at most two decimals.
///
/// ```
/// use gremio_core::file::format_size;
///
/// assert_eq!(format_size(0), "0 Bytes");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let bytes = bytes as f64;
    let exponent = (bytes.ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exponent])
}

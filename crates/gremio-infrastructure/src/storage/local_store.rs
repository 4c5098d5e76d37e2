//! Key/value store with one JSON document per key.

use super::atomic::write_atomic;
use gremio_core::GremioError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed value under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<LocalStoreError> for GremioError {
    fn from(err: LocalStoreError) -> Self {
        match err {
            LocalStoreError::InvalidKey(_) => GremioError::validation(err.to_string()),
            LocalStoreError::Io { .. } => GremioError::io(err.to_string()),
            LocalStoreError::Malformed { .. } => GremioError::Serialization {
                format: "JSON".into(),
                message: err.to_string(),
            },
        }
    }
}

/// Persistent string-keyed storage under a single directory.
///
/// Values are stored as `<dir>/<key>.json` and replaced atomically. Keys are
/// restricted to `[A-Za-z0-9_-]` so they map to file names one-to-one.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LocalStoreError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| LocalStoreError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    /// The stored JSON text, unparsed.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LocalStoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), LocalStoreError> {
        let path = self.path_for(key)?;
        let text = serde_json::to_string_pretty(value).map_err(|source| {
            LocalStoreError::Malformed {
                key: key.to_string(),
                source,
            }
        })?;
        write_atomic(&path, text.as_bytes()).map_err(|source| LocalStoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    /// Returns whether a value was present.
    pub fn remove(&self, key: &str) -> Result<bool, LocalStoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(LocalStoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, LocalStoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LocalStoreError::Io {
                    key: String::new(),
                    source,
                });
            }
        };
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let key = name.strip_suffix(".json")?;
                is_valid_key(key).then(|| key.to_string())
            })
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LocalStoreError> {
        if !is_valid_key(key) {
            return Err(LocalStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

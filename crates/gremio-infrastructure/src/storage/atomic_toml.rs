//! TOML file with atomic replace and locked read-modify-write.

use super::atomic::{FileLock, write_atomic};
use gremio_core::GremioError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Rejected by the update closure.
    #[error("Update rejected: {0}")]
    Rejected(String),
}

impl From<AtomicTomlError> for GremioError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Rejected(message) => GremioError::config(message),
        }
    }
}

/// Handle to a TOML document on disk.
///
/// - saves go through a temp file, fsync and rename
/// - `update` holds an exclusive lock across load, modify and save
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let text = toml::to_string_pretty(data)?;
        write_atomic(&self.path, text.as_bytes())?;
        Ok(())
    }

    /// Loads (or starts from `default_value`), applies `f`, saves.
    ///
    /// Nothing is written if `f` fails.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Endpoint {
        url: String,
        retries: u32,
    }

    fn endpoint() -> Endpoint {
        Endpoint {
            url: "http://localhost:8000".into(),
            retries: 0,
        }
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Endpoint>::new(dir.path().join("config.toml"));
        assert!(file.load().unwrap().is_none());

        fs::write(file.path(), "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let file = AtomicTomlFile::new(path.clone());

        file.save(&endpoint()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested/.config.toml.tmp").exists());
        assert_eq!(file.load().unwrap(), Some(endpoint()));
    }

    #[test]
    fn test_update_accumulates_and_rejection_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::new(dir.path().join("config.toml"));

        file.update(endpoint(), |e| {
            e.retries += 2;
            Ok(())
        })
        .unwrap();
        let updated = file
            .update(endpoint(), |e| {
                e.retries += 3;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.retries, 5);

        let result = file.update(endpoint(), |e| {
            e.retries = 99;
            Err(AtomicTomlError::Rejected("no".into()))
        });
        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().retries, 5);
        assert!(!dir.path().join("config.lock").exists());
    }

    #[test]
    fn test_parse_error_maps_to_serialization() {
        let dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Endpoint>::new(dir.path().join("config.toml"));
        fs::write(file.path(), "url = ").unwrap();

        let err: GremioError = file.load().unwrap_err().into();
        assert!(err.is_serialization());
    }
}

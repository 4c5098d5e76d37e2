//! Path management for Gremio configuration and local storage.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/gremio/            # Config directory
//! └── config.toml              # Backend URLs and request options
//!
//! ~/.local/share/gremio/       # Data directory
//! └── storage/                 # LocalStore: one JSON file per key
//!     ├── usuario.json         # Current session identity
//!     └── registro_vendedor.json
//! ```
//!
//! Both roots can be replaced with a single directory (`--data-dir`), in
//! which case config and storage live side by side under it.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "gremio";

#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

impl From<PathError> for gremio_core::GremioError {
    fn from(err: PathError) -> Self {
        gremio_core::GremioError::config(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GremioPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl GremioPaths {
    /// Platform directories (XDG on Linux, the usual places elsewhere).
    pub fn platform() -> Result<Self, PathError> {
        let config_dir = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
        let data_dir = dirs::data_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self {
            config_dir: config_dir.join(APP_DIR),
            data_dir: data_dir.join(APP_DIR),
        })
    }

    /// Everything under one root.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }

    /// `rooted(dir)` when an override is given, platform directories otherwise.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, PathError> {
        match override_dir {
            Some(dir) => Ok(Self::rooted(dir)),
            None => Self::platform(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let paths = GremioPaths::rooted("/tmp/gremio-test");
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/gremio-test/config.toml")
        );
        assert_eq!(
            paths.storage_dir(),
            PathBuf::from("/tmp/gremio-test/storage")
        );
    }

    #[test]
    fn test_override_wins() {
        let paths = GremioPaths::resolve(Some(Path::new("/srv/gremio"))).unwrap();
        assert_eq!(paths.data_dir(), Path::new("/srv/gremio"));
    }
}

//! Loads and saves [`ClientConfig`] from `config.toml`.

use crate::paths::GremioPaths;
use crate::storage::AtomicTomlFile;
use gremio_core::Result;
use gremio_core::config::ClientConfig;

/// Configuration file access.
///
/// A missing file yields the defaults; nothing is written until `save` or
/// `update` is called.
pub struct ConfigService {
    file: AtomicTomlFile<ClientConfig>,
}

impl ConfigService {
    pub fn new(paths: &GremioPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.config_file()),
        }
    }

    /// Stored configuration, or defaults when the file is absent.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "Loaded config from {} (api: {})",
            self.file.path().display(),
            config.api_base_url
        );
        Ok(config)
    }

    /// Stored configuration with `GREMIO_*` environment overrides applied.
    pub fn load_effective(&self) -> Result<ClientConfig> {
        let config = self.load()?.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        self.file.save(config)?;
        Ok(())
    }

    pub fn update<F>(&self, f: F) -> Result<ClientConfig>
    where
        F: FnOnce(&mut ClientConfig),
    {
        let updated = self.file.update(ClientConfig::default(), |config| {
            f(config);
            Ok(())
        })?;
        Ok(updated)
    }
}

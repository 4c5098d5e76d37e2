//! Subcommand implementations.
//!
//! Every command builds a [`Context`] (paths, effective config, persisted
//! session and the backend ports), then drives the same use cases and views
//! a graphical frontend would.

pub mod auth;
pub mod chat;
pub mod files;
pub mod navigate;
pub mod projects;
pub mod requirements;
pub mod subtasks;

pub use auth::{ProfileAction, SpecialtiesAction};
pub use chat::{AnalysisAction, ChatAction};
pub use files::FilesAction;
pub use projects::{ProjectAction, SolicitationsAction};
pub use requirements::RequirementsAction;
pub use subtasks::SubtasksAction;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use gremio_application::{AppShell, Services};
use gremio_core::config::ClientConfig;
use gremio_infrastructure::{ConfigService, FileSessionStore, GremioPaths, LocalStore};
use gremio_interaction::Backend;
use std::path::Path;
use std::sync::Arc;

pub struct Context {
    pub paths: GremioPaths,
    pub config: ClientConfig,
    pub session: Arc<FileSessionStore>,
    pub services: Services,
}

impl Context {
    /// Resolves paths and config, restores the session and wires the backend.
    ///
    /// Flag values win over environment variables, which win over `config.toml`.
    pub fn init(data_dir: Option<&Path>, api_url: Option<&str>, ws_url: Option<&str>) -> Result<Self> {
        let paths = GremioPaths::resolve(data_dir)?;
        let mut config = ConfigService::new(&paths).load_effective()?;
        if let Some(url) = api_url {
            config.api_base_url = url.to_string();
        }
        if let Some(url) = ws_url {
            config.ws_base_url = Some(url.to_string());
        }
        config.validate()?;

        let session = Arc::new(FileSessionStore::open(LocalStore::new(paths.storage_dir())));
        let backend = Backend::new(&config)?;
        let services = Services::from_backend(backend, session.clone());
        tracing::debug!("Using backend {}", config.api_base_url());

        Ok(Self {
            paths,
            config,
            session,
            services,
        })
    }

    pub fn shell(&self) -> AppShell {
        AppShell::new(self.services.clone())
    }
}

pub(crate) fn format_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn format_money(amount: f64) -> String {
    format!("S/ {amount:.2}")
}

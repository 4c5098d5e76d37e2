//! Backend access for gremio.
//!
//! REST clients for every marketplace resource plus the realtime chat
//! channel. Each client implements a port from `gremio_core`, so the
//! application layer never sees `reqwest` or `tungstenite` types.

pub mod chat_socket;
pub mod http;
pub mod rest;

pub use chat_socket::ChatSocket;
pub use http::ApiClient;
pub use rest::*;

use gremio_core::Result;
use gremio_core::config::ClientConfig;

/// Every backend client, built from one configuration.
pub struct Backend {
    pub auth: RestAuthApi,
    pub profiles: RestProfileApi,
    pub projects: RestProjectApi,
    pub subtasks: RestSubtaskApi,
    pub requirements: RestRequirementApi,
    pub solicitations: RestSolicitationApi,
    pub files: RestFileApi,
    pub analysis: RestAnalysisApi,
    pub chat: RestChatApi,
    pub socket: ChatSocket,
}

impl Backend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        tracing::debug!("Backend at {}", api.base_url());
        Ok(Self {
            auth: RestAuthApi::new(api.clone()),
            profiles: RestProfileApi::new(api.clone()),
            projects: RestProjectApi::new(api.clone()),
            subtasks: RestSubtaskApi::new(api.clone()),
            requirements: RestRequirementApi::new(api.clone()),
            solicitations: RestSolicitationApi::new(api.clone()),
            files: RestFileApi::new(api.clone()),
            analysis: RestAnalysisApi::new(api.clone()),
            chat: RestChatApi::new(api),
            socket: ChatSocket::from_config(config)?,
        })
    }
}

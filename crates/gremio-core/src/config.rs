//! Client configuration.

use crate::error::{GremioError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const ENV_API_URL: &str = "GREMIO_API_URL";
pub const ENV_WS_URL: &str = "GREMIO_WS_URL";

/// Backend endpoints and request options, stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// REST base URL, without trailing slash.
    pub api_base_url: String,
    /// WebSocket base URL. Derived from `api_base_url` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_base_url: Option<String>,
    /// Per-request timeout. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_base_url: None,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Effective WebSocket base URL.
    pub fn ws_base_url(&self) -> Result<String> {
        match &self.ws_base_url {
            Some(url) => Ok(trim_slash(url)),
            None => derive_ws_url(&self.api_base_url),
        }
    }

    pub fn api_base_url(&self) -> String {
        trim_slash(&self.api_base_url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Applies `GREMIO_API_URL` / `GREMIO_WS_URL` from `lookup`.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_WS_URL).filter(|v| !v.trim().is_empty()) {
            self.ws_base_url = Some(url);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let api = self.api_base_url();
        if !(api.starts_with("http://") || api.starts_with("https://")) {
            return Err(GremioError::config(format!(
                "api_base_url must be an http(s) URL, got '{api}'"
            )));
        }
        let ws = self.ws_base_url()?;
        if !(ws.starts_with("ws://") || ws.starts_with("wss://")) {
            return Err(GremioError::config(format!(
                "ws_base_url must be a ws(s) URL, got '{ws}'"
            )));
        }
        Ok(())
    }
}

/// `http://` → `ws://`, `https://` → `wss://`.
pub fn derive_ws_url(api_base_url: &str) -> Result<String> {
    let api = trim_slash(api_base_url);
    if let Some(rest) = api.strip_prefix("https://") {
        Ok(format!("wss://{rest}"))
    } else if let Some(rest) = api.strip_prefix("http://") {
        Ok(format!("ws://{rest}"))
    } else {
        Err(GremioError::config(format!(
            "cannot derive a websocket URL from '{api}'"
        )))
    }
}

fn trim_slash(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

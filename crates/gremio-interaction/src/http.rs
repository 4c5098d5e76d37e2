//! Shared HTTP plumbing for the REST clients.

use gremio_core::config::ClientConfig;
use gremio_core::{GremioError, Result};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

/// Base URL plus a pooled `reqwest` client.
///
/// Cheap to clone; every resource client holds one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GremioError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_base_url(),
        })
    }

    /// Client for `base_url` with default options.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig {
            api_base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)).query(query);
        decode(self.send(request, "GET", path).await?).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        decode(self.send(request, "POST", path).await?).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        decode(self.send(request, "PUT", path).await?).await
    }

    /// `PUT` whose parameters travel in the query string, with an empty JSON body.
    pub(crate) async fn put_query<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self
            .client
            .put(self.url(path))
            .query(query)
            .json(&serde_json::json!({}));
        decode(self.send(request, "PUT", path).await?).await
    }

    pub(crate) async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        let request = self.client.delete(self.url(path)).query(query);
        self.send(request, "DELETE", path).await?;
        Ok(())
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let request = self.client.get(self.url(path));
        let response = self.send(request, "GET", path).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GremioError::transport(format!("failed to read {path}: {e}")))?;
        Ok(bytes.to_vec())
    }

    pub(crate) async fn post_multipart<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        form: Form,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).query(query).multipart(form);
        decode(self.send(request, "POST", path).await?).await
    }

    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Response> {
        tracing::debug!("{} {}", method, path);
        let response = request.send().await.map_err(|err| {
            GremioError::transport(format!("{method} {path} failed: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} {} -> {}", method, path, status);
            return Err(map_http_error(status, &body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response
        .text()
        .await
        .map_err(|e| GremioError::transport(format!("failed to read response body: {e}")))?;
    Ok(serde_json::from_str(&text)?)
}

/// FastAPI error body: `detail` is a string, or a list of validation issues.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Issues(Vec<Issue>),
}

#[derive(Deserialize)]
struct Issue {
    msg: String,
}

pub(crate) fn map_http_error(status: StatusCode, body: &str) -> GremioError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Detail::Text(text),
        }) => text,
        Ok(ErrorBody {
            detail: Detail::Issues(issues),
        }) => issues
            .into_iter()
            .map(|issue| issue.msg)
            .collect::<Vec<_>>()
            .join("; "),
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    GremioError::http(status.as_u16(), message)
}

/// `{"exito": bool, ...}` wrapper used by the sub-task and analysis routes.
///
/// The status is read before the payload, so a failure body that carries
/// only `exito` and `error` still surfaces the backend's message.
#[derive(Debug)]
pub(crate) enum Envelope<T> {
    Success(T),
    Failure(String),
}

#[derive(Deserialize)]
struct EnvelopeStatus {
    #[serde(default = "default_true")]
    exito: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_true() -> bool {
    true
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let status = EnvelopeStatus::deserialize(&value).map_err(D::Error::custom)?;
        if !status.exito {
            return Ok(Self::Failure(
                status
                    .error
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }
        T::deserialize(value)
            .map(Self::Success)
            .map_err(D::Error::custom)
    }
}

impl<T> Envelope<T> {
    pub(crate) fn into_result(self) -> Result<T> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(message) => Err(GremioError::http(200, message)),
        }
    }
}

/// Acknowledgement body whose fields the client does not use.
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {}

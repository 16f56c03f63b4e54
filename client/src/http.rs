//! Blocking HTTP implementation of [`BroadcastClient`].
//!
//! Routes:
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | create | `POST` | `/broadcast` |
//! | list | `GET` | `/broadcast` |
//! | get | `GET` | `/broadcast/{id}` |
//! | delete | `DELETE` | `/broadcast/{id}` |
//!
//! Non-success statuses are mapped with [`ApiError::from_status`], using the
//! `message` field of a JSON error body when the server sends one.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::BroadcastClient;
use crate::broadcast::Broadcast;
use crate::error::{ApiError, ErrorKind, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub no_proxy: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Some(DEFAULT_TIMEOUT),
            no_proxy: false,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Broadcast API client over blocking HTTP.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpClient {
    /// Builds a client.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Transport`] if the base URL is invalid or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ApiError::new(
                ErrorKind::Transport,
                format!("invalid API URL {:?}: {e}", config.base_url),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                ErrorKind::Transport,
                format!("invalid API URL {:?}", config.base_url),
            ));
        }
        let mut builder = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout);
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(|e| {
            ApiError::new(ErrorKind::Transport, format!("failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base,
            token: config.token.clone(),
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorized(request)
            .send()
            .map_err(map_transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|body| body.message);
        Err(ApiError::from_status(status.as_u16(), message))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json().map_err(|e| {
            ApiError::new(ErrorKind::Decode, format!("failed to decode response: {e}"))
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        format!("HTTP error: {error}")
    };
    ApiError::new(ErrorKind::Transport, message)
}

impl BroadcastClient for HttpClient {
    fn broadcast_create(&self, broadcast: &Broadcast) -> Result<()> {
        let url = self.endpoint(&["broadcast"]);
        self.send(self.client.post(url).json(broadcast))?;
        info!(title = %broadcast.title, level = %broadcast.level, "broadcast created");
        Ok(())
    }

    fn broadcast_get(&self, id: &str) -> Result<Broadcast> {
        let url = self.endpoint(&["broadcast", id]);
        Self::decode(self.send(self.client.get(url))?)
    }

    fn broadcast_delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["broadcast", id]);
        self.send(self.client.delete(url))?;
        info!(id, "broadcast deleted");
        Ok(())
    }

    fn broadcasts(&self) -> Result<Vec<Broadcast>> {
        let url = self.endpoint(&["broadcast"]);
        Self::decode(self.send(self.client.get(url))?)
    }
}

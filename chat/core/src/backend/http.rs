//! HTTP Backend Implementation
//!
//! Posts `{"message": ...}` as JSON to a single chat endpoint and reads
//! `{"reply": ...}` back.
//!
//! The client is built without a request timeout: a slow backend keeps the
//! pipeline busy until it answers or the connection drops.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::traits::{ChatBackend, DeliveryFailure};
use crate::config::WidgetConfig;
use crate::messages::{ChatReply, ChatRequest};

/// Longest body excerpt kept in a failure detail
const BODY_EXCERPT_LEN: usize = 200;

/// HTTP chat backend
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Full URL of the chat endpoint
    endpoint: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend posting to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a backend using a caller-built client
    ///
    /// Proxy, TLS and pooling settings come from `http_client`.
    pub fn with_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }

    /// Create from a loaded [`WidgetConfig`]
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// The endpoint this backend posts to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl From<reqwest::Error> for DeliveryFailure {
    fn from(e: reqwest::Error) -> Self {
        DeliveryFailure::new(e.to_string())
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryFailure> {
        debug!(endpoint = %self.endpoint, "Posting chat message");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, endpoint = %self.endpoint, "Backend returned non-success status");
            return Err(DeliveryFailure::new(format!(
                "backend returned {status}: {}",
                excerpt(&body)
            )));
        }

        serde_json::from_str::<ChatReply>(&body).map_err(|e| {
            warn!(error = %e, "Backend reply body could not be decoded");
            DeliveryFailure::new(format!("undecodable reply ({e}): {}", excerpt(&body)))
        })
    }
}

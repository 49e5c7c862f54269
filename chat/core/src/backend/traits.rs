//! Chat Backend Traits
//!
//! The seam between the send pipeline and whatever answers chat requests.
//! The pipeline only needs "give me a reply for this message, or tell me it
//! failed", so that is all the trait asks for. Production code talks HTTP
//! through [`HttpBackend`](super::HttpBackend); tests plug in doubles.

use async_trait::async_trait;

use crate::messages::{ChatReply, ChatRequest};

/// Any inability to obtain a reply from the backend
///
/// Network errors, non-success statuses and undecodable bodies all collapse
/// into this one kind. The detail is for diagnostics only; users are shown
/// [`DELIVERY_FAILURE_TEXT`](crate::messages::DELIVERY_FAILURE_TEXT).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("delivery failed: {detail}")]
pub struct DeliveryFailure {
    detail: String,
}

impl DeliveryFailure {
    /// Create a failure with a diagnostic detail
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Diagnostic detail (never shown in the conversation)
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Chat backend trait
///
/// Implement this to answer chat requests from a different source.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name for logs (e.g., "HTTP")
    fn name(&self) -> &str;

    /// Deliver one message and wait for the reply
    ///
    /// Called at most once per user message. Implementations must not retry.
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryFailure>;
}

//! Send Pipeline
//!
//! Turns user input into conversation records and backend requests, one
//! request at a time.
//!
//! # Lifecycle
//!
//! ```text
//!   send(text) ──► [empty?] ──yes──► Ignored(Empty)
//!                     │no
//!                  [busy?] ──yes──► Ignored(Busy)
//!                     │no
//!       append user record, spawn request, busy = true
//!                     │
//!          poll() / settle() observes the result
//!                     │
//!   append bot record (reply or fallback text), busy = false
//! ```
//!
//! The request runs on a spawned task and reports back over a oneshot
//! channel. The pipeline is busy exactly while that channel is held, so at
//! most one request is ever outstanding. A request resolves when `poll` or
//! `settle` observes its result, not when the response arrives on the wire.
//! Failures never reach the caller:
//! every [`DeliveryFailure`] becomes the fixed fallback bot message.
//!
//! Dropping the pipeline while a request is in flight discards the result.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::backend::{ChatBackend, DeliveryFailure};
use crate::conversation::Conversation;
use crate::messages::{ChatReply, ChatRequest, Message};

type PendingReply = oneshot::Receiver<Result<ChatReply, DeliveryFailure>>;

/// Why a send attempt did nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty or whitespace only
    Empty,
    /// A request is already in flight
    Busy,
}

/// Result of a [`SendPipeline::send`] call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// User record appended and request issued
    Dispatched,
    /// Nothing happened
    Ignored(IgnoreReason),
}

impl SendOutcome {
    /// Whether the message went out
    #[must_use]
    pub fn is_dispatched(self) -> bool {
        matches!(self, SendOutcome::Dispatched)
    }
}

/// Owns the conversation and the single in-flight request
pub struct SendPipeline<B: ChatBackend> {
    /// Backend answering requests
    backend: Arc<B>,
    /// Session message log
    conversation: Conversation,
    /// Reply channel of the outstanding request, if any
    pending: Option<PendingReply>,
}

impl<B: ChatBackend + 'static> SendPipeline<B> {
    /// Create a pipeline with an empty conversation
    pub fn new(backend: B) -> Self {
        Self::with_shared_backend(Arc::new(backend))
    }

    /// Create a pipeline sharing an existing backend handle
    pub fn with_shared_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            pending: None,
        }
    }

    /// Submit user input
    ///
    /// Must be called from within a tokio runtime. Returns immediately; the
    /// reply is observed later through [`poll`](Self::poll) or
    /// [`settle`](Self::settle).
    pub fn send(&mut self, text: impl Into<String>) -> SendOutcome {
        let text = text.into();

        if text.trim().is_empty() {
            debug!("Ignoring empty message");
            return SendOutcome::Ignored(IgnoreReason::Empty);
        }
        if self.is_busy() {
            debug!("Ignoring message while a reply is pending");
            return SendOutcome::Ignored(IgnoreReason::Busy);
        }

        let request = ChatRequest::new(text.clone());
        self.conversation.append(Message::user(text));

        let (tx, rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let result = backend.send(&request).await;
            // Receiver gone means the pipeline was dropped
            let _ = tx.send(result);
        });
        self.pending = Some(rx);

        debug!(backend = self.backend.name(), "Message dispatched");
        SendOutcome::Dispatched
    }

    /// Check for a reply without waiting
    ///
    /// Returns the appended bot message once the outstanding request has
    /// resolved, `None` while still waiting or when idle.
    pub fn poll(&mut self) -> Option<Message> {
        let rx = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(lost_request()),
        };
        Some(self.resolve(result))
    }

    /// Wait for the outstanding request to resolve
    ///
    /// Returns `None` immediately when idle. Cancel-safe: dropping the
    /// future before completion leaves the request pending.
    pub async fn settle(&mut self) -> Option<Message> {
        let rx = self.pending.as_mut()?;
        let result = rx.await.unwrap_or_else(|_| Err(lost_request()));
        Some(self.resolve(result))
    }

    /// Whether a request is outstanding
    ///
    /// A request counts as outstanding until its result is observed by
    /// [`poll`](Self::poll) or [`settle`](Self::settle). A reply that has
    /// arrived but not been observed yet still reads as busy, and the bot
    /// record is appended only at that observation.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The conversation so far
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The backend in use
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn resolve(&mut self, result: Result<ChatReply, DeliveryFailure>) -> Message {
        self.pending = None;

        let message = match result {
            Ok(reply) => Message::bot(reply.reply),
            Err(failure) => {
                warn!(
                    backend = self.backend.name(),
                    detail = failure.detail(),
                    "Reply not delivered"
                );
                Message::delivery_failure()
            }
        };
        self.conversation.append(message).clone()
    }
}

fn lost_request() -> DeliveryFailure {
    DeliveryFailure::new("request task ended without reporting a result")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::messages::{Role, DELIVERY_FAILURE_TEXT};

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        fn name(&self) -> &str {
            "Echo"
        }

        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryFailure> {
            Ok(ChatReply {
                reply: format!("echo: {}", request.message),
            })
        }
    }

    struct PanickingBackend;

    #[async_trait]
    impl ChatBackend for PanickingBackend {
        fn name(&self) -> &str {
            "Panicking"
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, DeliveryFailure> {
            panic!("backend blew up");
        }
    }

    #[tokio::test]
    async fn test_idle_pipeline() {
        let mut pipeline = SendPipeline::new(EchoBackend);
        assert!(!pipeline.is_busy());
        assert!(pipeline.poll().is_none());
        assert!(pipeline.settle().await.is_none());
        assert!(pipeline.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_send_then_settle() {
        let mut pipeline = SendPipeline::new(EchoBackend);

        assert_eq!(pipeline.send("hi"), SendOutcome::Dispatched);
        assert!(pipeline.is_busy());
        assert_eq!(pipeline.conversation().len(), 1);

        let reply = pipeline.settle().await.unwrap();
        assert_eq!(reply.role(), Role::Bot);
        assert_eq!(reply.text(), "echo: hi");
        assert!(!pipeline.is_busy());
        assert_eq!(pipeline.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_user_text_kept_verbatim() {
        let mut pipeline = SendPipeline::new(EchoBackend);
        pipeline.send("  padded  ");
        pipeline.settle().await;

        let first = &pipeline.conversation().messages()[0];
        assert_eq!(first.role(), Role::User);
        assert_eq!(first.text(), "  padded  ");
    }

    #[tokio::test]
    async fn test_poll_eventually_resolves() {
        let mut pipeline = SendPipeline::new(EchoBackend);
        pipeline.send("ping");

        let reply = loop {
            if let Some(reply) = pipeline.poll() {
                break reply;
            }
            tokio::task::yield_now().await;
        };
        assert_eq!(reply.text(), "echo: ping");
        assert!(pipeline.poll().is_none());
    }

    /// Replies immediately, signalling once the reply is handed back
    struct SignallingBackend {
        done: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl ChatBackend for SignallingBackend {
        fn name(&self) -> &str {
            "Signalling"
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, DeliveryFailure> {
            self.done.notify_one();
            Ok(ChatReply {
                reply: "ready".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_busy_until_reply_observed() {
        let done = Arc::new(tokio::sync::Notify::new());
        let mut pipeline = SendPipeline::new(SignallingBackend {
            done: Arc::clone(&done),
        });

        pipeline.send("hi");
        done.notified().await;

        // Backend has answered, nothing has observed it yet
        assert!(pipeline.is_busy());
        assert_eq!(pipeline.conversation().len(), 1);

        let reply = pipeline.poll().unwrap();
        assert_eq!(reply.text(), "ready");
        assert!(!pipeline.is_busy());
        assert_eq!(pipeline.conversation().len(), 2);
    }

    #[tokio::test]
    async fn test_lost_request_becomes_fallback() {
        let mut pipeline = SendPipeline::new(PanickingBackend);
        pipeline.send("hello");

        let reply = pipeline.settle().await.unwrap();
        assert_eq!(reply.text(), DELIVERY_FAILURE_TEXT);
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(SendOutcome::Dispatched.is_dispatched());
        assert!(!SendOutcome::Ignored(IgnoreReason::Busy).is_dispatched());
    }
}

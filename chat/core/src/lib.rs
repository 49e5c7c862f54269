//! Chat Core - Headless conversation state for the chat widget
//!
//! This crate holds everything the chat widget does that is not drawing:
//! the message log, the one-request-at-a-time send pipeline, the backend
//! that answers messages, and configuration. Any surface (the terminal UI,
//! a test harness) drives it the same way.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Surface (TUI, tests)            │
//! │    send(text) ▼               ▲ conversation │
//! └───────────────┼───────────────┼──────────────┘
//!                 │               │
//! ┌───────────────┼───────────────┼──────────────┐
//! │          SendPipeline         │              │
//! │  ┌──────────────┐   ┌─────────┴──────────┐   │
//! │  │ busy flag /  │   │  Conversation      │   │
//! │  │ pending reply│   │  (append-only)     │   │
//! │  └──────┬───────┘   └────────────────────┘   │
//! │         ▼                                    │
//! │   ChatBackend (HttpBackend: POST /chat)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SendPipeline`]: validates input, issues the request, appends replies
//! - [`Conversation`]: ordered, append-only message log
//! - [`Message`] / [`Role`]: immutable conversation records
//! - [`ChatBackend`] / [`HttpBackend`]: where messages are delivered
//! - [`DeliveryFailure`]: the single failure kind, shown as fallback text
//! - [`WidgetConfig`]: endpoint resolved from defaults, file, env and CLI
//!
//! # Quick Start
//!
//! ```ignore
//! use chat_core::{load_config, ConfigOverrides, HttpBackend, SendPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config(&ConfigOverrides::default())?;
//!     let mut pipeline = SendPipeline::new(HttpBackend::from_config(&config));
//!
//!     pipeline.send("What is in the sales table?");
//!     if let Some(reply) = pipeline.settle().await {
//!         println!("{}", reply.text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on any terminal or UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod conversation;
pub mod messages;
pub mod pipeline;

pub use backend::{ChatBackend, DeliveryFailure, HttpBackend};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, WidgetConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR,
};
pub use conversation::Conversation;
pub use messages::{ChatReply, ChatRequest, Message, Role, DELIVERY_FAILURE_TEXT};
pub use pipeline::{IgnoreReason, SendOutcome, SendPipeline};

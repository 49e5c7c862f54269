//! Chat Backend Integration
//!
//! Access to the service that answers chat messages, behind a common trait.
//!
//! # Available Backends
//!
//! - **HTTP**: JSON `POST` to a single endpoint (default)
//!
//! # Usage
//!
//! ```ignore
//! use chat_core::backend::{ChatBackend, HttpBackend};
//! use chat_core::messages::ChatRequest;
//!
//! let backend = HttpBackend::new("http://localhost:8000/chat");
//! let reply = backend.send(&ChatRequest::new("Hello!")).await?;
//! ```

mod http;
mod traits;

pub use http::HttpBackend;
pub use traits::{ChatBackend, DeliveryFailure};

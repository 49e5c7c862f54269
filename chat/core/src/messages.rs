//! Message Types
//!
//! The records that make up a conversation, and the JSON bodies exchanged
//! with the chat backend.
//!
//! A [`Message`] is immutable once built: its fields are private and only
//! readable through accessors, so a record appended to the
//! [`Conversation`](crate::conversation::Conversation) can never be edited.

use serde::{Deserialize, Serialize};

/// Bot text substituted for a reply that could not be delivered
pub const DELIVERY_FAILURE_TEXT: &str =
    "System Error: Unable to reach the backend. Is the server running?";

/// Who authored a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard
    User,
    /// Returned by the backend (or substituted on failure)
    Bot,
}

impl Role {
    /// Short label used when rendering this role
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

/// A single conversation record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }

    /// The bot message shown when a reply could not be obtained
    #[must_use]
    pub fn delivery_failure() -> Self {
        Self::bot(DELIVERY_FAILURE_TEXT)
    }

    /// Who authored this message
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The message text, exactly as appended
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Request body posted to the chat endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,
}

impl ChatRequest {
    /// Create a request for the given message text
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful response body from the chat endpoint
///
/// `reply` is markdown-flavoured rich text (bold, lists, tables).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The bot's answer
    pub reply: String,
}

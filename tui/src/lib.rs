//! Chat Widget TUI - Terminal surface for the chat widget
//!
//! A full-screen terminal client: type a message, press Enter, read the
//! bot's formatted reply. All conversation state lives in `chat-core`; this
//! crate only draws it and feeds it keystrokes.
//!
//! # Architecture
//!
//! - **App**: event loop driving the send pipeline
//! - **Display**: conversation records and the typing indicator as entries
//! - **Widgets**: scrollable text block, markdown rendering, typing animation
//! - **Terminal**: panic hook that restores the screen
//! - **Theme**: colors per role

pub mod app;
pub mod display;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use app::App;

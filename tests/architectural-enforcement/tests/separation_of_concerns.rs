//! Integration Test: Separation of Concerns
//!
//! **Policy**: `chat-core` is headless. Conversation state, the send pipeline
//! and the backend must not know about any terminal library, and must
//! propagate errors instead of panicking.

use architectural_enforcement::{assert_clean, rust_files, scan};

const UI_CRATES: [&str; 3] = ["ratatui", "crossterm", "chat_widget_tui"];

#[test]
fn test_core_has_no_ui_dependencies() {
    let violations = scan("chat/core/src", |code| {
        UI_CRATES.iter().any(|krate| code.contains(krate))
    });
    assert_clean("terminal crate referenced from chat/core", &violations);
}

#[test]
fn test_core_does_not_panic_on_errors() {
    let violations = scan("chat/core/src", |code| {
        code.contains(".unwrap()") || code.contains(".expect(")
    });
    assert_clean("unwrap/expect in chat/core production code", &violations);
}

#[test]
fn test_scanned_directories_exist() {
    assert!(!rust_files("chat/core/src").is_empty());
    assert!(!rust_files("tui/src").is_empty());
}

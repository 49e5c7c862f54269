//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The TUI animates
//! with `tokio::time::interval`, and the pipeline waits on the reply channel.
//!
//! **Exceptions**: test code.

use architectural_enforcement::{assert_clean, scan};

fn is_sleep(code: &str) -> bool {
    code.contains("thread::sleep") || code.contains("time::sleep") || code.contains("sleep(")
}

#[test]
fn test_no_sleep_in_core() {
    assert_clean("sleep in chat/core", &scan("chat/core/src", is_sleep));
}

#[test]
fn test_no_sleep_in_tui() {
    assert_clean("sleep in tui", &scan("tui/src", is_sleep));
}

//! Terminal Lifecycle
//!
//! The panic hook that takes the terminal out of raw mode and the alternate
//! screen before a panic message is printed.
//!
//! Only panics on the UI thread (the one that installed the hook, which runs
//! the event loop under `#[tokio::main]`) restore the terminal. Request tasks
//! run on runtime worker threads; tokio catches their panics and the send
//! pipeline turns them into the fallback reply, so the UI keeps running and
//! the screen must stay as it is.

use std::io;
use std::panic;
use std::thread;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use tracing::error;

/// Install a panic hook that calls `restore` for UI-thread panics
///
/// Panics on other threads are logged instead of printed, since stderr shares
/// the screen with the running UI.
pub fn install_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let ui_thread = thread::current().id();
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if thread::current().id() != ui_thread {
            error!(%panic_info, "Background task panicked");
            return;
        }
        restore();
        original_hook(panic_info);
    }));
}

/// Leave raw mode and the alternate screen, ignoring errors
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

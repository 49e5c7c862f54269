//! Typing Indicator
//!
//! Three dots that fill in one at a time while a reply is pending.

use std::time::Duration;

/// How long each frame stays on screen
pub const TYPING_FRAME: Duration = Duration::from_millis(350);

const FRAMES: [&str; 4] = ["·  ", "·· ", "···", "   "];

/// Animation state for the typing indicator
#[derive(Clone, Debug, Default)]
pub struct TypingIndicator {
    frame: usize,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next frame
    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Restart from the first frame
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    /// Text for the current frame (fixed width)
    pub fn text(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

//! Custom Widgets

mod markdown;
mod text_block;
mod typing;

pub use markdown::render_markdown;
pub use text_block::{wrap_line, TextBlock, TextBlockState};
pub use typing::{TypingIndicator, TYPING_FRAME};

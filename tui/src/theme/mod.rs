//! Theme and Colors
//!
//! The small palette the chat widget draws with.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Conversation Colors
// ============================================================================

/// User input green
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Bot label and accents
pub const BOT_MAGENTA: Color = Color::Magenta;

/// Fallback/error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Typing indicator - soft blue
pub const TYPING_BLUE: Color = Color::Rgb(150, 180, 255);

// ============================================================================
// Rich Text Colors
// ============================================================================

/// Inline and block code
pub const CODE_YELLOW: Color = Color::Rgb(230, 200, 120);

/// Table borders and list bullets
pub const RULE_GRAY: Color = Color::Rgb(120, 120, 120);

// ============================================================================
// UI Colors
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Style for the role label in front of a message
#[must_use]
pub fn label_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

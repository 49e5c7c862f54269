//! Display State Types
//!
//! What the conversation pane shows, derived from the send pipeline on every
//! frame.
//!
//! # Design Philosophy
//!
//! The TUI is a thin client: it keeps no copy of the conversation. Each
//! frame it asks the pipeline for the current records and busy flag and
//! turns them into [`DisplayEntry`] values:
//!
//! - `Rendered`: a conversation record (user text verbatim, bot text as markdown)
//! - `Typing`: the indicator shown after the last record while a reply is pending

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use chat_core::{Conversation, Role, DELIVERY_FAILURE_TEXT};

use crate::theme::{label_style, BOT_MAGENTA, ERROR_RED, TYPING_BLUE, USER_GREEN};
use crate::widgets::{render_markdown, TypingIndicator};

/// One item in the conversation pane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEntry<'a> {
    /// A reply is pending
    Typing,
    /// A conversation record
    Rendered {
        /// Who wrote it
        role: Role,
        /// Text exactly as stored
        text: &'a str,
    },
}

/// Entries for the current conversation, with `Typing` last while busy
pub fn display_entries(conversation: &Conversation, busy: bool) -> Vec<DisplayEntry<'_>> {
    let mut entries: Vec<DisplayEntry<'_>> = conversation
        .iter()
        .map(|msg| DisplayEntry::Rendered {
            role: msg.role(),
            text: msg.text(),
        })
        .collect();

    if busy {
        entries.push(DisplayEntry::Typing);
    }
    entries
}

/// Styled lines for one entry (unwrapped, without trailing spacing)
pub fn entry_lines(entry: DisplayEntry<'_>, typing: &TypingIndicator) -> Vec<Line<'static>> {
    match entry {
        DisplayEntry::Typing => vec![Line::from(vec![
            Span::styled(format!("{}: ", Role::Bot.label()), label_style(BOT_MAGENTA)),
            Span::styled(typing.text(), Style::default().fg(TYPING_BLUE)),
        ])],

        DisplayEntry::Rendered {
            role: Role::User,
            text,
        } => {
            let style = Style::default().fg(USER_GREEN);
            let mut lines: Vec<Line<'static>> = text
                .split('\n')
                .map(|line| Line::styled(line.to_string(), style))
                .collect();
            lines[0]
                .spans
                .insert(0, Span::styled(format!("{}: ", Role::User.label()), label_style(USER_GREEN)));
            lines
        }

        DisplayEntry::Rendered {
            role: Role::Bot,
            text,
        } => {
            let label = Line::from(Span::styled(
                format!("{}:", Role::Bot.label()),
                label_style(BOT_MAGENTA),
            ));
            // A failed delivery is stored as exactly this text and carries no
            // other marker, so a backend reply with the same text is drawn red too
            let body = if text == DELIVERY_FAILURE_TEXT {
                vec![Line::styled(text.to_string(), Style::default().fg(ERROR_RED))]
            } else {
                render_markdown(text, Style::default())
            };

            std::iter::once(label).chain(body).collect()
        }
    }
}

/// Lines for the whole conversation pane, one blank line between entries
pub fn conversation_lines(
    entries: &[DisplayEntry<'_>],
    typing: &TypingIndicator,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(entry_lines(*entry, typing));
    }
    lines
}

//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, frame ticks)
//! - SendPipeline holding the conversation and the in-flight request
//! - Rendering of the conversation, input and status regions
//!
//! # Event Loop
//!
//! One `tokio::select!` waits on whichever comes first:
//! 1. A terminal event (typing, Enter, scrolling, quit)
//! 2. The pending reply, only while the pipeline is busy
//! 3. A frame tick that animates the typing indicator
//!
//! All state changes happen in the loop body, so no locking is needed.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use chat_core::{ChatBackend, IgnoreReason, Message, SendOutcome, SendPipeline};

use crate::display::{conversation_lines, display_entries};
use crate::theme::{BOT_MAGENTA, DIM_GRAY, USER_GREEN};
use crate::widgets::{TextBlock, TextBlockState, TypingIndicator, TYPING_FRAME};

/// Input box height (lines) for text wrapping
const INPUT_HEIGHT: u16 = 5;

/// Lines moved per arrow-key scroll
const SCROLL_STEP: usize = 3;

/// Status shown when Enter is pressed while a reply is pending
const BUSY_NOTICE: &str = "Still waiting for the last reply";

/// Main application state
pub struct App<B: ChatBackend> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Conversation and in-flight request
    pipeline: SendPipeline<B>,
    /// Endpoint shown in the status bar
    endpoint: String,

    // === Input State ===
    /// User input buffer
    input_buffer: String,
    /// One-shot status message, cleared on the next key press
    notice: Option<&'static str>,

    // === Rendering State ===
    /// Conversation scroll position
    conversation_view: TextBlockState,
    /// Typing indicator animation
    typing: TypingIndicator,
}

impl<B: ChatBackend + 'static> App<B> {
    /// Create a new App talking to `backend`
    pub fn new(backend: B, endpoint: impl Into<String>) -> Self {
        Self {
            running: true,
            pipeline: SendPipeline::new(backend),
            endpoint: endpoint.into(),
            input_buffer: String::new(),
            notice: None,
            conversation_view: TextBlockState::default(),
            typing: TypingIndicator::new(),
        }
    }

    /// Main event loop
    pub async fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(TYPING_FRAME);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(endpoint = %self.endpoint, "Chat widget started");
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                reply = self.pipeline.settle(), if self.pipeline.is_busy() => {
                    if let Some(reply) = reply {
                        self.on_reply(&reply);
                    }
                }

                _ = ticker.tick() => {
                    if self.pipeline.is_busy() {
                        self.typing.advance();
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            // Layout is recomputed on every draw
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.notice = None;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            // Submit message
            KeyCode::Enter => self.submit(),

            // Typing
            KeyCode::Char(c) if !ctrl => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }

            // Conversation scrolling
            KeyCode::PageUp => {
                let page = self.page_size();
                self.conversation_view.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = self.page_size();
                self.conversation_view.scroll_down(page);
            }
            KeyCode::Up => self.conversation_view.scroll_up(SCROLL_STEP),
            KeyCode::Down => self.conversation_view.scroll_down(SCROLL_STEP),
            KeyCode::Home if ctrl => {
                let all = self.conversation_view.total_lines;
                self.conversation_view.scroll_up(all);
            }
            KeyCode::End if ctrl => self.conversation_view.scroll_to_bottom(),

            _ => {}
        }
    }

    /// Wait for the pending reply, if any, and apply it
    pub async fn settle_pending(&mut self) {
        if let Some(reply) = self.pipeline.settle().await {
            self.on_reply(&reply);
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current contents of the input line
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// The pipeline holding the conversation
    pub fn pipeline(&self) -> &SendPipeline<B> {
        &self.pipeline
    }

    fn submit(&mut self) {
        match self.pipeline.send(self.input_buffer.clone()) {
            SendOutcome::Dispatched => {
                self.input_buffer.clear();
                self.typing.reset();
                self.conversation_view.scroll_to_bottom();
            }
            SendOutcome::Ignored(IgnoreReason::Busy) => {
                // Keep the draft so it can be sent once the reply lands
                self.notice = Some(BUSY_NOTICE);
            }
            SendOutcome::Ignored(IgnoreReason::Empty) => self.input_buffer.clear(),
        }
    }

    fn on_reply(&mut self, reply: &Message) {
        debug!(chars = reply.text().len(), "Reply displayed");
        self.conversation_view.scroll_to_bottom();
    }

    fn page_size(&self) -> usize {
        (self.conversation_view.viewport_height / 2).max(1)
    }

    /// Render the UI into a frame
    pub fn render(&mut self, frame: &mut Frame) {
        let [conversation_area, input_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_conversation(frame, conversation_area);
        self.render_input(frame, input_area);
        self.render_status(frame, status_area);
    }

    /// Render conversation region
    fn render_conversation(&mut self, frame: &mut Frame, area: Rect) {
        // One column of padding on each side
        let area = Rect::new(
            area.x + 1,
            area.y,
            area.width.saturating_sub(2),
            area.height,
        );

        let entries = display_entries(self.pipeline.conversation(), self.pipeline.is_busy());
        let lines = if entries.is_empty() {
            vec![Line::styled(
                "Type a message and press Enter.",
                Style::default().fg(DIM_GRAY),
            )]
        } else {
            conversation_lines(&entries, &self.typing)
        };

        frame.render_stateful_widget(TextBlock::new(lines), area, &mut self.conversation_view);
    }

    /// Render input region
    fn render_input(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let buf = frame.buffer_mut();

        let separator = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &separator,
            Style::default().fg(Color::DarkGray),
        );

        let text_height = area.height.saturating_sub(1) as usize;
        let text_width = area.width.saturating_sub(1) as usize;

        if text_width < 5 || text_height < 1 {
            return;
        }

        let full_input = format!("You: {}_", self.input_buffer);
        let wrapped_lines: Vec<String> = textwrap::wrap(&full_input, text_width)
            .iter()
            .map(ToString::to_string)
            .collect();

        // Keep the cursor line visible
        let skip = wrapped_lines.len().saturating_sub(text_height);
        for (i, line) in wrapped_lines.iter().skip(skip).enumerate() {
            let y = area.y + 1 + i as u16;
            buf.set_string(area.x, y, line, Style::default().fg(USER_GREEN));
        }

        if skip > 0 {
            buf.set_string(
                area.x + area.width.saturating_sub(3),
                area.y,
                "^",
                Style::default().fg(Color::Yellow),
            );
        }
    }

    /// Render status bar
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let busy = self.pipeline.is_busy();

        let state_str = match (self.notice, busy) {
            (Some(notice), _) => notice,
            (None, true) => "Waiting for reply",
            (None, false) => "Ready",
        };
        let status_style = if busy || self.notice.is_some() {
            Style::default().fg(BOT_MAGENTA)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let scroll_info = if self.conversation_view.is_at_bottom() {
            String::new()
        } else {
            format!(
                " [^{} lines - Ctrl+End for latest]",
                self.conversation_view.scroll_offset
            )
        };

        let status = format!(
            " {} | {} | Enter send | PgUp/PgDn scroll | Esc quit{}",
            state_str, self.endpoint, scroll_info
        );

        frame
            .buffer_mut()
            .set_string(area.x, area.y, &status, status_style);
    }
}

//! Markdown Rendering
//!
//! Bot replies arrive as markdown. This turns them into styled terminal
//! lines: bold/italic/strikethrough, inline and block code, headings,
//! bulleted and numbered lists (nested), and tables with aligned columns.
//!
//! Output lines are unwrapped; the [`TextBlock`](super::TextBlock) wraps
//! them to the available width.

use pulldown_cmark::{Alignment, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme::{CODE_YELLOW, RULE_GRAY};

/// Indent applied to code block lines
const CODE_INDENT: &str = "  ";

/// Width of a horizontal rule
const RULE_WIDTH: usize = 24;

/// Render markdown to styled lines, using `base` for plain text
#[must_use]
pub fn render_markdown(source: &str, base: Style) -> Vec<Line<'static>> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut renderer = MarkdownRenderer::new(base);
    for event in Parser::new_ext(source, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

/// Rows collected for one table
#[derive(Default)]
struct TableBuilder {
    alignments: Vec<Alignment>,
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl TableBuilder {
    fn new(alignments: Vec<Alignment>) -> Self {
        Self {
            alignments,
            ..Self::default()
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                self.header
                    .iter()
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn pad(&self, cell: &str, col: usize, width: usize) -> String {
        let gap = width.saturating_sub(cell.width());
        match self.alignments.get(col) {
            Some(Alignment::Right) => format!("{}{cell}", " ".repeat(gap)),
            Some(Alignment::Center) => {
                let left = gap / 2;
                format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
            }
            _ => format!("{cell}{}", " ".repeat(gap)),
        }
    }

    fn row_line(&self, row: &[String], widths: &[usize], style: Style) -> Line<'static> {
        let rule = Style::default().fg(RULE_GRAY);
        let mut spans = Vec::with_capacity(widths.len() * 2);
        for (col, width) in widths.iter().enumerate() {
            if col > 0 {
                spans.push(Span::styled(" │ ", rule));
            }
            let cell = row.get(col).map_or("", String::as_str);
            spans.push(Span::styled(self.pad(cell, col, *width), style));
        }
        Line::from(spans)
    }

    fn into_lines(self, base: Style) -> Vec<Line<'static>> {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if let Some(ref header) = self.header {
            lines.push(self.row_line(header, &widths, base.add_modifier(Modifier::BOLD)));

            let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            lines.push(Line::styled(
                separator.join("─┼─"),
                Style::default().fg(RULE_GRAY),
            ));
        }
        for row in &self.rows {
            lines.push(self.row_line(row, &widths, base));
        }
        lines
    }
}

struct MarkdownRenderer {
    base: Style,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    /// Inline style stack (strong, emphasis, ...)
    styles: Vec<Style>,
    /// One entry per open list: next number for ordered lists
    lists: Vec<Option<u64>>,
    table: Option<TableBuilder>,
    in_code_block: bool,
}

impl MarkdownRenderer {
    fn new(base: Style) -> Self {
        Self {
            base,
            lines: Vec::new(),
            current: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            table: None,
            in_code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
        } else if !text.is_empty() {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    /// Separate blocks with one empty line (never leading, never doubled)
    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn start_item(&mut self) {
        self.flush_line();
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(next)) => {
                let marker = format!("{next}. ");
                *next += 1;
                marker
            }
            _ => "• ".to_string(),
        };
        self.current.push(Span::styled(
            format!("{}{marker}", "  ".repeat(depth)),
            Style::default().fg(RULE_GRAY),
        ));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    let style = Style::default().fg(CODE_YELLOW);
                    for line in text.lines() {
                        self.lines
                            .push(Line::styled(format!("{CODE_INDENT}{line}"), style));
                    }
                } else {
                    self.push_text(&text, self.style());
                }
            }
            Event::Code(code) => self.push_text(&code, Style::default().fg(CODE_YELLOW)),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_text(html.trim_end_matches('\n'), self.style());
            }
            Event::SoftBreak => self.push_text(" ", self.style()),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(RULE_GRAY),
                ));
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " }, self.style());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                let modifier = if level == HeadingLevel::H1 {
                    Modifier::BOLD | Modifier::UNDERLINED
                } else {
                    Modifier::BOLD
                };
                self.push_style(modifier);
            }
            Tag::Strong => self.push_style(Modifier::BOLD),
            Tag::Emphasis => self.push_style(Modifier::ITALIC),
            Tag::Strikethrough => self.push_style(Modifier::CROSSED_OUT),
            Tag::Link { .. } => self.push_style(Modifier::UNDERLINED),
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => self.start_item(),
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::Table(alignments) => {
                self.flush_line();
                self.table = Some(TableBuilder::new(alignments));
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.flush_line();
                }
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.blank_line();
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                self.styles.pop();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = Some(std::mem::take(&mut table.row));
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    let rendered = table.into_lines(self.base);
                    self.lines.extend(rendered);
                }
                self.blank_line();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

//! TextBlock Widget
//!
//! A borderless, scrollable region of styled lines. Lines are word-wrapped
//! to the area width at render time, keeping each span's style.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;
use textwrap::core::{break_words, Fragment, Word};
use textwrap::wrap_algorithms::wrap_first_fit;
use textwrap::WordSeparator;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines up from the bottom, 0 = latest)
    pub scroll_offset: usize,
    /// Total wrapped lines at the last render
    pub total_lines: usize,
    /// Visible height at the last render
    pub viewport_height: usize,
}

impl TextBlockState {
    /// Scroll towards older content
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_offset());
    }

    /// Scroll towards newer content
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Jump to the latest content
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Whether the latest line is visible
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> TextBlock<'a> {
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self { lines }
    }
}

impl<'a> StatefulWidget for TextBlock<'a> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = area.width as usize;
        let height = area.height as usize;

        let wrapped: Vec<Line<'static>> = self
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect();

        state.total_lines = wrapped.len();
        state.viewport_height = height;
        state.scroll_offset = state.scroll_offset.min(state.max_offset());

        // Visible window, counted up from the bottom
        let end = state.total_lines - state.scroll_offset;
        let start = end.saturating_sub(height);

        for (i, line) in wrapped[start..end].iter().enumerate() {
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

/// Word-wrap one styled line to `width` columns
///
/// Words longer than a full row are split by character. An empty line stays
/// one empty row so paragraph spacing survives.
pub fn wrap_line(line: &Line<'_>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return Vec::new();
    }

    let fragments: Vec<StyledWord<'_>> = line
        .spans
        .iter()
        .flat_map(|span| {
            let style = line.style.patch(span.style);
            let words = WordSeparator::AsciiSpace.find_words(&span.content);
            break_words(words, width)
                .into_iter()
                .map(move |word| StyledWord { word, style })
        })
        .collect();

    if fragments.is_empty() {
        return vec![Line::default()];
    }

    wrap_first_fit(&fragments, &[width as f64])
        .into_iter()
        .map(|row| {
            let last = row.len().saturating_sub(1);
            let spans: Vec<Span<'static>> = row
                .iter()
                .enumerate()
                .filter_map(|(i, fragment)| {
                    // Whitespace at the end of a row is dropped
                    let text = if i == last {
                        fragment.word.word.to_string()
                    } else {
                        format!("{}{}", fragment.word.word, fragment.word.whitespace)
                    };
                    (!text.is_empty()).then(|| Span::styled(text, fragment.style))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// A textwrap word carrying the style of the span it came from
#[derive(Debug)]
struct StyledWord<'a> {
    word: Word<'a>,
    style: Style,
}

impl Fragment for StyledWord<'_> {
    fn width(&self) -> f64 {
        self.word.width()
    }

    fn whitespace_width(&self) -> f64 {
        self.word.whitespace_width()
    }

    fn penalty_width(&self) -> f64 {
        self.word.penalty_width()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::style::{Color, Modifier};

    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rows(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|l| text_of(l).trim_end().to_string()).collect()
    }

    fn buffer_rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let wrapped = wrap_line(&Line::from("the quick brown fox"), 10);
        assert_eq!(rows(&wrapped), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let wrapped = wrap_line(&Line::from("abcdefghijkl"), 5);
        assert_eq!(rows(&wrapped), vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_keeps_word_split_across_spans_together() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::raw("aaaa "),
            Span::styled("bbbb", bold),
            Span::raw("cc"),
        ]);
        let wrapped = wrap_line(&line, 8);

        assert_eq!(rows(&wrapped), vec!["aaaa", "bbbbcc"]);
        assert_eq!(wrapped[1].spans[0].style, bold);
        assert_eq!(wrapped[1].spans[1].style, Style::default());
    }

    #[test]
    fn test_wrap_counts_wide_characters() {
        let wrapped = wrap_line(&Line::from("日本語 テキスト"), 8);
        assert_eq!(rows(&wrapped), vec!["日本語", "テキスト"]);
    }

    #[test]
    fn test_wrap_keeps_leading_indent() {
        let wrapped = wrap_line(&Line::from("  let x = 1;"), 40);
        assert_eq!(rows(&wrapped), vec!["  let x = 1;"]);
    }

    #[test]
    fn test_wrap_keeps_empty_line() {
        let wrapped = wrap_line(&Line::default(), 10);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(text_of(&wrapped[0]), "");
    }

    #[test]
    fn test_wrap_preserves_span_styles() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::raw("plain words "),
            Span::styled("bold words", bold),
        ]);
        let wrapped = wrap_line(&line, 12);

        assert_eq!(rows(&wrapped), vec!["plain words", "bold words"]);
        assert!(wrapped[1].spans.iter().all(|s| s.style == bold));
    }

    #[test]
    fn test_wrap_applies_line_style() {
        let line = Line::from("tinted").style(Style::default().fg(Color::Red));
        let wrapped = wrap_line(&line, 20);
        assert_eq!(wrapped[0].spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_render_shows_latest_lines() {
        let lines: Vec<Line> = (1..=5).map(|i| Line::from(format!("line {i}"))).collect();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(lines).render(area, &mut buf, &mut state);

        assert_eq!(buffer_rows(&buf), vec!["line 3", "line 4", "line 5"]);
        assert_eq!(state.total_lines, 5);
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_scroll_up_is_clamped() {
        let lines: Vec<Line> = (1..=5).map(|i| Line::from(format!("line {i}"))).collect();
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(lines.clone()).render(area, &mut buf, &mut state);
        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 2);

        let mut buf = Buffer::empty(area);
        TextBlock::new(lines).render(area, &mut buf, &mut state);
        assert_eq!(buffer_rows(&buf), vec!["line 1", "line 2", "line 3"]);

        state.scroll_down(1);
        assert_eq!(state.scroll_offset, 1);
        state.scroll_to_bottom();
        assert!(state.is_at_bottom());
    }

    #[test]
    fn test_short_content_starts_at_top() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new(vec![Line::from("only")]).render(area, &mut buf, &mut state);

        assert_eq!(buffer_rows(&buf), vec!["only", "", "", ""]);
    }
}

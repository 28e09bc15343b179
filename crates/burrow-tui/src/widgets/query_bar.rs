//! Search bar — free-text filter over the fetched rows.
//!
//! Every edit re-filters immediately; nothing is re-fetched. The right-hand
//! side shows how many rows match out of the total.

use crate::theme::Theme;
use crate::widgets::line_editor::LineEditor;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct QueryBar<'a> {
    editor: &'a LineEditor,
    matches: usize,
    total: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        editor: &'a LineEditor,
        matches: usize,
        total: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            editor,
            matches,
            total,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let x = (area.x + 1 + self.editor.cursor_chars()).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search logs")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(16)])
            .split(inner);

        let text = if self.editor.text.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.editor.text.as_str())
        };
        Paragraph::new(text).render(chunks[0], buf);

        let count = if self.editor.text.is_empty() {
            format!("{} rows", self.total)
        } else {
            format!("{} / {}", self.matches, self.total)
        };
        Paragraph::new(Line::from(count).right_aligned()).render(chunks[1], buf);
    }
}

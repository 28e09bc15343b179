//! Vim-style command bar — a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` outside the search bar. `Enter` parses and
//! executes the command; `Escape` cancels. See [`crate::commands`] for the
//! command list.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_editor::LineEditor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    pub editor: LineEditor,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.editor.clear();
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.editor.text
    }

    /// Apply an editing key. Any key dismisses a displayed error.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.editor.handle(event);
    }

    /// Absolute terminal column of the text cursor within `area`. The `:`
    /// glyph occupies column 0.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.editor.cursor_chars()).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar),
                Span::raw(self.state.input()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

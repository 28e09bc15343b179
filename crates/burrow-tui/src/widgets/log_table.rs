//! Log table — the current page of filtered rows.
//!
//! # Navigation (when focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move the row cursor up |
//! | `↓` / `j` | Move the row cursor down |
//!
//! Paging is handled by the app shell; the cursor resets to the first row
//! whenever the visible page changes.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use burrow_core::LogRow;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

pub const EMPTY_TEXT: &str = "No logs found";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LogTableState {
    /// Index into the visible page.
    pub cursor: usize,
    pub show_timestamps: bool,
    pub timestamp_format: String,
    /// Offset applied to displayed timestamps.
    pub utc_offset_minutes: i32,
}

impl Default for LogTableState {
    fn default() -> Self {
        Self {
            cursor: 0,
            show_timestamps: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl LogTableState {
    /// Move the cursor within a page of `page_len` rows.
    pub fn handle(&mut self, event: &AppEvent, page_len: usize) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < page_len {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    fn format_timestamp(&self, row: &LogRow) -> String {
        row.display_timestamp(self.utc_offset_minutes, &self.timestamp_format)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct LogTable<'a> {
    state: &'a LogTableState,
    rows: &'a [LogRow],
    focused: bool,
    theme: &'a Theme,
}

impl<'a> LogTable<'a> {
    pub fn new(state: &'a LogTableState, rows: &'a [LogRow], focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            rows,
            focused,
            theme,
        }
    }
}

impl Widget for LogTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Logs")
            .border_style(self.theme.border(self.focused));

        if self.rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::from(Span::styled(EMPTY_TEXT, self.theme.table_empty)).centered())
                .render(inner, buf);
            return;
        }

        let mut header = Vec::with_capacity(4);
        let mut widths = Vec::with_capacity(4);
        if self.state.show_timestamps {
            header.push("Timestamp");
            widths.push(Constraint::Length(20));
        }
        header.extend(["Source", "Host", "Message"]);
        widths.extend([
            Constraint::Length(24),
            Constraint::Length(16),
            Constraint::Fill(1),
        ]);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(4);
                if self.state.show_timestamps {
                    cells.push(Cell::from(self.state.format_timestamp(row)).style(self.theme.table_timestamp));
                }
                cells.push(Cell::from(row.source.clone()).style(self.theme.source_style(&row.source)));
                cells.push(
                    Cell::from(row.host.clone().unwrap_or_else(|| "-".to_string()))
                        .style(self.theme.table_host),
                );
                cells.push(Cell::from(row.message.clone()));
                Row::new(cells)
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(Row::new(header).style(self.theme.table_header))
            .block(block)
            .row_highlight_style(self.theme.table_selected);

        let mut table_state = TableState::default();
        if self.focused {
            table_state.select(Some(self.state.cursor.min(self.rows.len() - 1)));
        }
        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}

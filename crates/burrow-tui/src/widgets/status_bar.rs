//! Title line — app name, source, and a neutral fetch indicator.
//!
//! Fetch failures never appear here; fallback rows are shown without a banner.

use crate::theme::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Default, Clone)]
pub struct StatusState {
    pub source: String,
    pub fetching: bool,
    pub last_update: Option<DateTime<Local>>,
    /// One-shot feedback from the last command (e.g. an export).
    pub notice: Option<String>,
}

pub struct StatusBar<'a> {
    state: &'a StatusState,
    rows: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a StatusState, rows: usize, theme: &'a Theme) -> Self {
        Self { state, rows, theme }
    }

    fn right_text(&self) -> String {
        if self.state.fetching {
            return "fetching…".to_string();
        }
        if let Some(ref notice) = self.state.notice {
            return notice.clone();
        }
        match self.state.last_update {
            Some(at) => format!("{} rows · updated {}", self.rows, at.format("%H:%M:%S")),
            None => String::new(),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = Line::from(vec![
            Span::styled(" burrow ", Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)),
            Span::raw(" Logs  "),
            Span::styled(self.state.source.as_str(), self.theme.table_timestamp),
        ]);
        Paragraph::new(left).render(area, buf);

        let right = Line::from(Span::styled(self.right_text(), self.theme.chart_label)).right_aligned();
        Paragraph::new(right).render(area, buf);
    }
}

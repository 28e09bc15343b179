//! `Previous  Page X of Y  Next` — shown only when there is more than one page.
//! Each control is dimmed when it cannot be used.

use crate::theme::Theme;
use burrow_core::paginate::Pager;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct PagerLine<'a> {
    pager: &'a Pager,
    theme: &'a Theme,
}

impl<'a> PagerLine<'a> {
    pub fn new(pager: &'a Pager, theme: &'a Theme) -> Self {
        Self { pager, theme }
    }

    fn line(&self) -> Line<'static> {
        if !self.pager.is_paginated() {
            return Line::default();
        }
        let control = |label: &'static str, enabled: bool| {
            let style = if enabled {
                self.theme.pager_enabled
            } else {
                self.theme.pager_disabled
            };
            Span::styled(label, style)
        };
        Line::from(vec![
            control("◀ Previous", self.pager.has_prev()),
            Span::raw(format!("   {}   ", self.pager.label())),
            control("Next ▶", self.pager.has_next()),
        ])
        .centered()
    }
}

impl Widget for PagerLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

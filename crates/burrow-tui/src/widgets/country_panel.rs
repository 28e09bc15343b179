//! Top attacker countries, each coloured by its [`Heat`](burrow_core::chart::Heat) band.

use crate::theme::Theme;
use burrow_core::chart::CountryCount;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct CountryPanel<'a> {
    countries: &'a [CountryCount],
    theme: &'a Theme,
}

impl<'a> CountryPanel<'a> {
    pub fn new(countries: &'a [CountryCount], theme: &'a Theme) -> Self {
        Self { countries, theme }
    }
}

impl Widget for CountryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Top Countries")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.countries.is_empty() {
            Paragraph::new(Line::from("No geolocation data").centered())
                .style(self.theme.table_empty)
                .render(inner, buf);
            return;
        }

        let max = self.countries.iter().map(|c| c.count).max().unwrap_or(1).max(1);
        // code, space, bar, space, count
        let bar_room = inner.width.saturating_sub(4 + 1 + 1 + 6) as u64;

        let lines: Vec<Line> = self
            .countries
            .iter()
            .map(|c| {
                let style = self.theme.heat_style(c.heat());
                let len = (c.count * bar_room).div_ceil(max) as usize;
                Line::from(vec![
                    Span::styled(format!("{:<4} ", c.code), style),
                    Span::styled("█".repeat(len), style),
                    Span::raw(format!(" {}", c.count)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

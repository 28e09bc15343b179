//! "Log Entries Over Time" — one bar per minute bucket.
//!
//! When there are more buckets than fit across the pane, the most recent
//! ones are shown.

use crate::theme::Theme;
use burrow_core::chart::ChartPoint;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph, Widget},
};

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

pub struct TimeChart<'a> {
    points: &'a [ChartPoint],
    theme: &'a Theme,
}

impl<'a> TimeChart<'a> {
    pub fn new(points: &'a [ChartPoint], theme: &'a Theme) -> Self {
        Self { points, theme }
    }

    /// The trailing points that fit in `width` columns.
    fn visible(&self, width: u16) -> &'a [ChartPoint] {
        let fit = usize::from(width / (BAR_WIDTH + BAR_GAP)).max(1);
        &self.points[self.points.len().saturating_sub(fit)..]
    }
}

impl Widget for TimeChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Log Entries Over Time")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);

        if self.points.is_empty() {
            block.render(area, buf);
            Paragraph::new(Line::from("No data").centered())
                .style(self.theme.table_empty)
                .render(inner, buf);
            return;
        }

        let bars: Vec<Bar> = self
            .visible(inner.width)
            .iter()
            .map(|p| {
                Bar::default()
                    .value(p.count)
                    .label(Line::from(p.time.clone()))
            })
            .collect();

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP)
            .bar_style(self.theme.chart_bar)
            .value_style(self.theme.chart_value)
            .label_style(self.theme.chart_label)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn points(n: usize) -> Vec<ChartPoint> {
        (0..n)
            .map(|i| ChartPoint {
                time: format!("00:{i:02}"),
                count: 1,
            })
            .collect()
    }

    #[test]
    fn visible_keeps_the_latest_points() {
        let theme = Theme::load_default();
        let pts = points(20);
        let chart = TimeChart::new(&pts, &theme);
        let shown = chart.visible(30);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0].time, "00:15");
    }

    #[test]
    fn visible_shows_everything_when_it_fits() {
        let theme = Theme::load_default();
        let pts = points(3);
        assert_eq!(TimeChart::new(&pts, &theme).visible(200).len(), 3);
    }
}

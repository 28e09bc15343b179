//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: logs → search"),
    ("/", "Focus search bar"),
    ("Escape", "Leave search bar"),
    ("r", "Refresh logs"),
    ("n  →  PageDown", "Next page"),
    ("p  ←  PageUp", "Previous page"),
    ("g  /  G", "First / last page"),
    ("↑ k  /  ↓ j", "Move row cursor"),
    (":", "Command bar (:help for commands)"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":q", "Quit"),
    (":refresh", "Refresh logs"),
    (":page <n>", "Jump to page n"),
    (":clear", "Clear the search"),
    (":ts", "Toggle the timestamp column"),
    (":theme <name>", "Switch theme (default, gruvbox)"),
    (":export <path>", "Write filtered rows as JSON Lines"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 3) as u16;
        let popup = centered_rect(70, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" burrow — keybindings (? to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = BINDINGS.iter().map(entry).collect();
        lines.push(Line::default());
        lines.extend(COMMANDS.iter().map(entry));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn entry(&(key, desc): &(&'static str, &'static str)) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key:<20}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(desc),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

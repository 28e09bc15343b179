//! Colour theme for the burrow TUI.
//!
//! Themes are defined as TOML files. The built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.
//!
//! # Colour assignment for sources
//!
//! Source labels are hashed to a stable index into the palette so the same
//! attacker IP or service always gets the same colour within a session,
//! regardless of the order in which rows appear.

use burrow_core::chart::Heat;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by `:theme`.
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawHeat {
    none: RawStyle,
    low: RawStyle,
    moderate: RawStyle,
    high: RawStyle,
    severe: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawChart {
    bar: RawStyle,
    value: RawStyle,
    label: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    selected: RawStyle,
    timestamp: RawStyle,
    host: RawStyle,
    empty: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPager {
    enabled: RawStyle,
    disabled: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSources {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    heat: RawHeat,
    borders: RawBorders,
    search: RawSearch,
    chart: RawChart,
    table: RawTable,
    pager: RawPager,
    sources: RawSources,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub heat_none: Style,
    pub heat_low: Style,
    pub heat_moderate: Style,
    pub heat_high: Style,
    pub heat_severe: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Inline highlight applied to query matches in the log table.
    pub search_highlight: Style,

    pub chart_bar: Style,
    pub chart_value: Style,
    pub chart_label: Style,

    pub table_header: Style,
    pub table_selected: Style,
    pub table_timestamp: Style,
    pub table_host: Style,
    /// The "No logs found" placeholder.
    pub table_empty: Style,

    pub pager_enabled: Style,
    pub pager_disabled: Style,

    source_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up a built-in theme by name, as typed after `:theme`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            heat_none: raw.heat.none.into_style(),
            heat_low: raw.heat.low.into_style(),
            heat_moderate: raw.heat.moderate.into_style(),
            heat_high: raw.heat.high.into_style(),
            heat_severe: raw.heat.severe.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            chart_bar: raw.chart.bar.into_style(),
            chart_value: raw.chart.value.into_style(),
            chart_label: raw.chart.label.into_style(),
            table_header: raw.table.header.into_style(),
            table_selected: raw.table.selected.into_style(),
            table_timestamp: raw.table.timestamp.into_style(),
            table_host: raw.table.host.into_style(),
            table_empty: raw.table.empty.into_style(),
            pager_enabled: raw.pager.enabled.into_style(),
            pager_disabled: raw.pager.disabled.into_style(),
            source_palette: raw
                .sources
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    pub fn heat_style(&self, heat: Heat) -> Style {
        match heat {
            Heat::None => self.heat_none,
            Heat::Low => self.heat_low,
            Heat::Moderate => self.heat_moderate,
            Heat::High => self.heat_high,
            Heat::Severe => self.heat_severe,
        }
    }

    /// Return a stable [`Style`] for a source label.
    pub fn source_style(&self, source: &str) -> Style {
        if self.source_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(source) % self.source_palette.len();
        Style::default().fg(self.source_palette[idx])
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

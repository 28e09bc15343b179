//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event              |
//! |-------------------------|--------------------|
//! | `q`, `Ctrl+c`           | `Quit`             |
//! | `Tab`                   | `FocusNext`        |
//! | `/`                     | `QueryFocus`       |
//! | `r`                     | `Refresh`          |
//! | `n`, `→`, `PageDown`    | `NextPage`         |
//! | `p`, `←`, `PageUp`      | `PrevPage`         |
//! | `g`, `Home`             | `FirstPage`        |
//! | `G`, `End`              | `LastPage`         |
//! | `↑` / `k`               | `Nav(Up)`          |
//! | `↓` / `j`               | `Nav(Down)`        |
//! | printable char          | `Char(c)`          |
//! | `Backspace`             | `Backspace`        |
//! | `Enter`                 | `Enter`            |
//! | terminal resize         | `Resize(w, h)`     |
//!
//! `?` and `:` arrive as `Char` and are interpreted by the app shell.
//!
//! ## Insert mode
//!
//! While the search bar or command bar is focused the loop calls
//! [`to_app_event_insert`]: every printable key types its character, arrow
//! keys move the text cursor, and only `Ctrl+c`, `Escape`, `Enter`, `Tab`
//! and `Backspace` keep their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Transfer focus to the search bar.
    QueryFocus,
    /// Re-fetch from the configured source.
    Refresh,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Row cursor movement, or text cursor movement in insert mode.
    Nav(Direction),
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    /// Dismiss the active modal (search focus, help popup, command bar).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),
        Char('r') if key.modifiers == Mod::NONE => Some(AppEvent::Refresh),

        Char('n') | Right | PageDown if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        Char('p') | Left | PageUp if key.modifiers == Mod::NONE => Some(AppEvent::PrevPage),
        Char('g') | Home if key.modifiers == Mod::NONE => Some(AppEvent::FirstPage),
        // 'G' may or may not carry SHIFT depending on the terminal
        Char('G') | End => Some(AppEvent::LastPage),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

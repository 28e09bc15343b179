//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `r`, `refresh` | Re-fetch logs |
//! | `page <n>` | Jump to page `n` (clamped) |
//! | `clear` | Clear the search query |
//! | `ts`, `timestamps` | Toggle the timestamp column |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `export <path>` | Write the filtered rows to `path` as JSON Lines |

use crate::app::AppState;
use crate::theme::{Theme, THEME_NAMES};
use burrow_core::export::export_to_path;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Refresh,
    /// One-indexed page number.
    Page(usize),
    Clear,
    Timestamps,
    Theme(String),
    Export(PathBuf),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "q!" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "r" | "refresh" => Ok(Command::Refresh),
            "clear" => Ok(Command::Clear),
            "ts" | "timestamps" => Ok(Command::Timestamps),
            "page" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err("usage: page <n>, n >= 1".to_string()),
            },
            "theme" => {
                if rest.is_empty() {
                    Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "export" => {
                if rest.is_empty() {
                    Err("usage: export <path>".to_string())
                } else {
                    Ok(Command::Export(PathBuf::from(rest)))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state. An `Err`
/// is shown in the command bar, which stays open.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Refresh => s.refresh_requested = true,
        Command::Page(n) => {
            s.orch.store_mut().goto_page(n);
            s.table.reset_cursor();
        }
        Command::Clear => s.set_query(String::new()),
        Command::Timestamps => s.table.show_timestamps = !s.table.show_timestamps,
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| {
                format!("unknown theme {name:?} (try {})", THEME_NAMES.join(", "))
            })?;
        }
        Command::Export(path) => {
            let rows = s.orch.store().filtered();
            let written = export_to_path(rows, &path)
                .map_err(|e| format!("export to {} failed: {e}", path.display()))?;
            s.status.notice = Some(format!("exported {written} rows to {}", path.display()));
        }
    }
    Ok(())
}

//! Ratatui widgets for the burrow TUI.

pub mod command_bar;
pub mod country_panel;
pub mod help;
pub mod line_editor;
pub mod log_table;
pub mod pager;
pub mod query_bar;
pub mod status_bar;
pub mod time_chart;

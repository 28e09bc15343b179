//! burrow TUI — ratatui dashboard over a [`LogSource`].

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use burrow_core::{config::Config, LogSource};
use burrow_feeds::FileWatch;
use tokio::runtime::Handle;

/// Run the dashboard until the user quits. Fetches are spawned on `runtime`;
/// the terminal loop itself runs on the calling thread.
pub fn run<S>(config: Config, source: S, watch: Option<FileWatch>, runtime: Handle) -> anyhow::Result<()>
where
    S: LogSource + Clone + 'static,
{
    let theme = theme::Theme::load_default();
    let mut app = App::new(config, theme, source, runtime);
    if let Some(watch) = watch {
        app = app.with_watch(watch);
    }
    app.run()
}

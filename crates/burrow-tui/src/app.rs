//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Fetches run on the tokio runtime handed to [`App::new`]. Each one carries
//! the [`Ticket`] issued when it started and reports back over a channel that
//! the loop drains between frames; the orchestrator drops results whose
//! ticket has been superseded. Starting a refresh also cancels the previous
//! in-flight task.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        country_panel::CountryPanel,
        help::HelpPopup,
        line_editor::LineEditor,
        log_table::{LogTable, LogTableState},
        pager::PagerLine,
        query_bar::QueryBar,
        status_bar::{StatusBar, StatusState},
        time_chart::TimeChart,
    },
};
use burrow_core::{
    config::Config,
    fallback::builtin_records,
    orchestrator::fetch_with_timeout,
    FetchError, LogSource, LogStore, Orchestrator, RawLogRecord, Ticket,
};
use burrow_feeds::FileWatch;
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Width of the top-countries panel beside the chart.
const COUNTRY_PANEL_WIDTH: u16 = 30;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

/// A finished fetch on its way back to the UI thread.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: Ticket,
    pub result: Result<Vec<RawLogRecord>, FetchError>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub orch: Orchestrator,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub query: LineEditor,
    pub table: LogTableState,
    pub status: StatusState,
    pub command_bar: CommandBarState,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    /// Set by `r` / `:refresh`; the loop starts a fetch and clears it.
    pub refresh_requested: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, source: String) -> Self {
        let store = LogStore::new(config.display.page_size, config.display.utc_offset_minutes);
        let orch = Orchestrator::new(store, builtin_records()).with_timeout(config.backend.timeout());
        let table = LogTableState {
            show_timestamps: config.ui.show_timestamps,
            timestamp_format: config.ui.timestamp_format.clone(),
            utc_offset_minutes: config.display.utc_offset_minutes,
            ..Default::default()
        };
        Self {
            orch,
            focus: Focus::Table,
            prev_focus: Focus::Table,
            query: LineEditor::default(),
            table,
            status: StatusState {
                source,
                ..Default::default()
            },
            command_bar: CommandBarState::default(),
            theme,
            config,
            show_help: false,
            refresh_requested: false,
            quit: false,
        }
    }

    /// Enter `Fetching` and return the ticket for the new request.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.status.fetching = true;
        self.status.notice = None;
        self.orch.begin()
    }

    /// Install a finished fetch. Stale outcomes are ignored.
    pub fn install(&mut self, outcome: FetchOutcome) {
        if self.orch.complete(outcome.ticket, outcome.result).is_some() {
            self.status.fetching = false;
            self.status.last_update = Some(chrono::Local::now());
            self.table.reset_cursor();
        }
    }

    /// Replace the search query and re-filter.
    pub fn set_query(&mut self, query: String) {
        self.query.cursor = query.len();
        self.query.text = query.clone();
        self.orch.store_mut().set_query(query);
        self.table.reset_cursor();
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match self.focus {
            Focus::Command => self.handle_command(event),
            Focus::QueryBar => self.handle_query(event),
            Focus::Table => self.handle_table(event),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input().to_string();
                let outcome = Command::parse(&input).and_then(|cmd| {
                    tracing::debug!(command = ?cmd, "executing command");
                    execute_command(self, cmd)
                });
                match outcome {
                    Ok(()) => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    // Empty input, just close
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => self.command_bar.error = Some(msg),
                }
            }
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_query(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape | AppEvent::Enter | AppEvent::FocusNext => {
                tracing::debug!("focus: QueryBar -> Table");
                self.focus = Focus::Table;
            }
            AppEvent::Quit => self.quit = true,
            other => {
                if self.query.handle(&other) {
                    let query = self.query.text.clone();
                    self.orch.store_mut().set_query(query);
                    self.table.reset_cursor();
                }
            }
        }
    }

    fn handle_table(&mut self, event: AppEvent) {
        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FocusNext | AppEvent::QueryFocus => {
                tracing::debug!("focus: Table -> QueryBar");
                self.focus = Focus::QueryBar;
            }
            AppEvent::Refresh => self.refresh_requested = true,
            AppEvent::NextPage => self.page_moved(|store| {
                store.next_page();
            }),
            AppEvent::PrevPage => self.page_moved(|store| {
                store.prev_page();
            }),
            AppEvent::FirstPage => self.page_moved(|store| store.goto_page(1)),
            AppEvent::LastPage => self.page_moved(|store| store.goto_page(usize::MAX)),
            nav @ AppEvent::Nav(_) => {
                let page_len = self.orch.store().page().len();
                self.table.handle(&nav, page_len);
            }
            // Terminal resize is handled automatically by ratatui
            _ => {}
        }
    }

    fn page_moved(&mut self, f: impl FnOnce(&mut LogStore)) {
        let before = self.orch.store().pager().current();
        f(self.orch.store_mut());
        let after = self.orch.store().pager().current();
        if before != after {
            tracing::debug!(from = before, to = after, "page changed");
            self.table.reset_cursor();
        }
    }
}

/// Returns true when the current focus is on a text-input widget.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<S> {
    state: AppState,
    source: S,
    runtime: Handle,
    results_tx: mpsc::UnboundedSender<FetchOutcome>,
    results_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    inflight: Option<CancellationToken>,
    watch: Option<FileWatch>,
}

impl<S> App<S>
where
    S: LogSource + Clone + 'static,
{
    pub fn new(config: Config, theme: Theme, source: S, runtime: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let state = AppState::new(config, theme, source.describe());
        Self {
            state,
            source,
            runtime,
            results_tx,
            results_rx,
            inflight: None,
            watch: None,
        }
    }

    /// Refresh whenever the watched file changes.
    pub fn with_watch(mut self, watch: FileWatch) -> Self {
        self.watch = Some(watch);
        self
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.start_fetch();
        let result = self.event_loop(&mut terminal);

        if let Some(token) = self.inflight.take() {
            token.cancel();
        }

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    /// Spawn a fetch, superseding any fetch still in flight.
    fn start_fetch(&mut self) {
        if let Some(previous) = self.inflight.take() {
            previous.cancel();
        }

        let ticket = self.state.begin_fetch();
        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        let source = self.source.clone();
        let timeout = self.state.orch.timeout();
        let tx = self.results_tx.clone();
        tracing::debug!(generation = ticket.generation(), source = %source.describe(), "fetch spawned");

        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => Err(FetchError::Cancelled),
                result = fetch_with_timeout(&source, timeout) => result,
            };
            // The receiver only goes away when the app is exiting.
            let _ = tx.send(FetchOutcome { ticket, result });
        });
    }

    fn pump_background(&mut self) {
        while let Ok(outcome) = self.results_rx.try_recv() {
            self.state.install(outcome);
        }
        if self.watch.as_mut().is_some_and(FileWatch::poll_changed) {
            tracing::debug!("watched file changed");
            self.state.refresh_requested = true;
        }
        if std::mem::take(&mut self.state.refresh_requested) {
            self.start_fetch();
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.pump_background();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let store = state.orch.store();

    // status | search | chart row | table | pager
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(state.config.ui.chart_height),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let chart_row = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(COUNTRY_PANEL_WIDTH)])
        .split(vert[2]);

    let points = store.chart();
    let countries = store.top_countries(state.config.display.top_countries);
    let query_bar = QueryBar::new(
        &state.query,
        store.filtered().len(),
        store.rows().len(),
        state.focus == Focus::QueryBar,
        &state.theme,
    );

    frame.render_widget(StatusBar::new(&state.status, store.rows().len(), &state.theme), vert[0]);
    frame.render_widget(query_bar, vert[1]);
    frame.render_widget(TimeChart::new(&points, &state.theme), chart_row[0]);
    frame.render_widget(CountryPanel::new(&countries, &state.theme), chart_row[1]);
    frame.render_widget(
        LogTable::new(&state.table, store.page(), state.focus == Focus::Table, &state.theme),
        vert[3],
    );
    frame.render_widget(PagerLine::new(store.pager(), &state.theme), vert[4]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, 0, 0, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

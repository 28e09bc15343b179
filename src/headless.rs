//! Headless mode — one fetch, printed to stdout, no terminal UI.
//!
//! Runs the same pipeline as the dashboard: fetch (falling back to the
//! built-in sample rows on failure), normalize, filter by `--query`, then
//! either print one page as a plain-text table or the whole filtered set as
//! JSON Lines.

use burrow_core::{
    chart::ChartPoint, config::Config, export::write_jsonl, fallback::builtin_records, LogRow,
    LogSource, LogStore, Orchestrator,
};
use std::io::Write;

/// Printed in place of the table when nothing matches.
pub const EMPTY_MESSAGE: &str = "No logs found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One page of rows plus the per-minute counts.
    #[default]
    Table,
    /// Every filtered row as one JSON object per line.
    Jsonl,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub query: Option<String>,
    /// One-indexed; clamped to the last page.
    pub page: Option<usize>,
    pub format: OutputFormat,
}

/// Fetch once from `source` and write the result to `out`.
pub async fn run<S, W>(config: &Config, source: &S, options: &HeadlessOptions, mut out: W) -> anyhow::Result<()>
where
    S: LogSource,
    W: Write,
{
    let store = LogStore::new(config.display.page_size, config.display.utc_offset_minutes);
    let mut orch = Orchestrator::new(store, builtin_records()).with_timeout(config.backend.timeout());

    let origin = orch.refresh(source).await;
    tracing::debug!(source = %source.describe(), origin = ?origin, "headless: fetch complete");

    let store = orch.store_mut();
    if let Some(query) = &options.query {
        store.set_query(query.as_str());
    }
    if let Some(page) = options.page {
        store.goto_page(page);
    }

    match options.format {
        OutputFormat::Jsonl => {
            write_jsonl(store.filtered(), &mut out)?;
        }
        OutputFormat::Table => write_table(config, store, &mut out)?,
    }
    Ok(())
}

fn write_table<W: Write>(config: &Config, store: &LogStore, out: &mut W) -> anyhow::Result<()> {
    if store.is_empty_view() {
        writeln!(out, "{EMPTY_MESSAGE}")?;
        return Ok(());
    }

    writeln!(out, "Log Entries Over Time")?;
    write_chart(&store.chart(), out)?;
    writeln!(out)?;

    for row in store.page() {
        writeln!(out, "{}", format_row(config, row))?;
    }

    let pager = store.pager();
    writeln!(out)?;
    writeln!(
        out,
        "{} ({} of {} rows)",
        pager.label(),
        pager.total_items(),
        store.rows().len()
    )?;
    out.flush()?;
    Ok(())
}

fn write_chart<W: Write>(points: &[ChartPoint], out: &mut W) -> anyhow::Result<()> {
    const MAX_BAR: u64 = 40;
    let peak = points.iter().map(|p| p.count).max().unwrap_or(0).max(1);
    for point in points {
        let width = (point.count * MAX_BAR).div_ceil(peak) as usize;
        writeln!(out, "{}  {:>4}  {}", point.time, point.count, "#".repeat(width))?;
    }
    Ok(())
}

fn format_row(config: &Config, row: &LogRow) -> String {
    let host = row.host.as_deref().unwrap_or("-");
    if config.ui.show_timestamps {
        format!(
            "{}  {:<12} {:<16} {}",
            row.display_timestamp(config.display.utc_offset_minutes, &config.ui.timestamp_format),
            row.source,
            host,
            row.message
        )
    } else {
        format!("{:<12} {:<16} {}", row.source, host, row.message)
    }
}

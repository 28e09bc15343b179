//! Export — normalised rows as JSON Lines.

use crate::types::LogRow;
use std::io::Write;

/// Write one JSON object per row, newline-terminated. Returns the row count.
pub fn write_jsonl<W: Write>(rows: &[LogRow], mut writer: W) -> anyhow::Result<usize> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Export `rows` to the file at `path`, creating or truncating it.
pub fn export_to_path(rows: &[LogRow], path: &std::path::Path) -> anyhow::Result<usize> {
    let file = std::fs::File::create(path)?;
    let written = write_jsonl(rows, std::io::BufWriter::new(file))?;
    tracing::debug!(rows = written, path = %path.display(), "export: wrote jsonl");
    Ok(written)
}

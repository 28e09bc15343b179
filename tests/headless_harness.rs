//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness runs `burrow` as a compiled binary via
//! [`std::process::Command`] and checks what a user or another CLI tool
//! would observe.
//!
//! - **Table output**: chart lines, one page of rows, the pager label.
//! - **Flags**: `--query`, `--page`, `--format jsonl`.
//! - **Empty state**: `No logs found.` on stdout, exit code 0.
//! - **Silent degrade**: an unreadable source still prints the fallback rows
//!   and exits 0; the failure only appears as a warning on stderr.
//! - **Bad flags** exit non-zero.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal; see the `TestBackend`
//!   tests in `burrow-tui`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the binary with an isolated config directory.
fn burrow(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_burrow"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run burrow")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dump.json"), contents).unwrap();
        Self { dir }
    }

    fn dump(&self) -> String {
        self.dir.path().join("dump.json").display().to_string()
    }

    fn run(&self, extra: &[&str]) -> Output {
        let dump = self.dump();
        let mut args = vec!["--headless", "--file", dump.as_str()];
        args.extend_from_slice(extra);
        burrow(self.dir.path(), &args)
    }
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[test]
fn prints_first_page_and_chart() {
    let fixture = Fixture::new(&envelope(&sequential_builders(15)).to_string());
    let output = fixture.run(&[]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Log Entries Over Time\n"));
    assert!(text.contains("23:50     1  "));
    assert!(text.contains("2025-03-18 23:50:00  sshd"));
    assert!(text.contains("event 10\n"));
    assert!(!text.contains("event 11\n"));
    assert!(text.trim_end().ends_with("Page 1 of 2 (15 of 15 rows)"));
}

#[test]
fn page_flag_selects_and_clamps() {
    let fixture = Fixture::new(&envelope(&sequential_builders(15)).to_string());
    let text = stdout(&fixture.run(&["--page", "9"]));
    assert!(text.contains("event 15\n"));
    assert!(!text.contains("event 10\n"));
    assert!(text.contains("Page 2 of 2"));
}

#[test]
fn query_flag_filters() {
    let fixture = Fixture::new(&envelope(&sequential_builders(15)).to_string());
    let text = stdout(&fixture.run(&["--query", "NGINX"]));
    assert!(text.contains("Page 1 of 1 (4 of 15 rows)"));
}

#[test]
fn unmatched_query_prints_empty_state() {
    let fixture = Fixture::new(ARRAY_BARE);
    let output = fixture.run(&["--query", "kerberos"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No logs found.\n");
}

// ---------------------------------------------------------------------------
// JSON Lines
// ---------------------------------------------------------------------------

#[test]
fn jsonl_emits_every_filtered_row() {
    let fixture = Fixture::new(&envelope(&sequential_builders(25)).to_string());
    let text = stdout(&fixture.run(&["--format", "jsonl", "--query", "sshd"]));
    let rows: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| r["source"] == "sshd"));
    assert_eq!(rows[0]["timestamp"], "2025-03-19T04:50:00Z");
}

// ---------------------------------------------------------------------------
// Degrade and errors
// ---------------------------------------------------------------------------

#[test]
fn unreadable_source_prints_fallback() {
    let fixture = Fixture::new(GARBAGE);
    let output = fixture.run(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Page 1 of 2 (20 of 20 rows)"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("fallback"));
}

#[test]
fn query_without_headless_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = burrow(dir.path(), &["--query", "x"]);
    assert!(!output.status.success());
}

#[test]
fn watch_without_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = burrow(dir.path(), &["--headless", "--watch"]);
    assert!(!output.status.success());
}

//! File source — replays a saved JSON log dump.
//!
//! The file may hold the proxy envelope, a bare record array or a raw
//! Elasticsearch response. [`FileSource::watch`] turns filesystem changes
//! into refresh signals so an updated dump shows up without pressing `r`.

use crate::decode::decode_any;
use burrow_core::{FetchError, LogSource, RawLogRecord};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start watching the file. Each create or modify event sends `()` on
    /// the returned receiver; dropping the [`FileWatch`] stops watching.
    ///
    /// The parent directory is watched rather than the file itself so that
    /// editors which replace the file on save are still seen.
    pub fn watch(&self) -> Result<FileWatch, notify::Error> {
        let (tx, rx) = mpsc::unbounded_channel();
        let file_name = self.path.file_name().map(|n| n.to_os_string());
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "file watch error");
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            let ours = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if ours {
                // Receiver gone means the app is shutting down.
                let _ = tx.send(());
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %self.path.display(), "file: watching");

        Ok(FileWatch {
            _watcher: watcher,
            changes: rx,
        })
    }
}

impl LogSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<RawLogRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| FetchError::Io {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        decode_any(&bytes)
    }
}

/// A live watch on a [`FileSource`].
pub struct FileWatch {
    _watcher: RecommendedWatcher,
    changes: mpsc::UnboundedReceiver<()>,
}

impl FileWatch {
    /// Wait for the next change. `None` once the watcher has shut down.
    pub async fn changed(&mut self) -> Option<()> {
        let first = self.changes.recv().await;
        // A single save usually produces several events.
        while self.changes.try_recv().is_ok() {}
        first
    }

    /// Non-blocking check for pending changes, for the TUI's poll loop.
    pub fn poll_changed(&mut self) -> bool {
        let mut changed = false;
        while self.changes.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

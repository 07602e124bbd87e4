//! Rolling history of past summarization runs, persisted as a JSON file.
//!
//! The file is the single source of truth: every operation reads it afresh
//! and [`HistoryStore::append`] rewrites it wholesale. Nothing is cached in
//! memory between calls. Only one writer is assumed; two processes appending
//! at the same time may lose an entry (last writer wins).
//!
//! Persistence is best-effort. Read and write failures are logged and
//! swallowed, so a broken history file never fails a summarization request:
//!
//! - missing file → empty history
//! - unreadable or malformed file → empty history
//! - failed write → entry dropped, previous file content left as it was
//!
//! File layout (pretty-printed, oldest entry first):
//!
//! ```text
//! [
//!   {
//!     "timestamp": "2026-03-14 09:26:53",
//!     "input": "Climate change continues to pose ...",
//!     "input_words": 153,
//!     "summary": "Rising global temperatures ...",
//!     "summary_words": 88
//!   }
//! ]
//! ```

use crate::error::HistoryError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Shown by [`HistoryStore::recent_formatted`] when there is nothing to list.
pub const EMPTY_HISTORY_MESSAGE: &str = "No previous summaries.";

/// Marker appended to previews that were cut short.
pub const TRUNCATION_MARKER: &str = "...";

// ── HistoryEntry ───────────────────────────────────────────────────

/// One persisted summarization run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Local creation time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    /// The original input, cut to a fixed number of characters.
    pub input: String,
    /// Word count of the full original input.
    pub input_words: usize,
    /// The full final summary.
    pub summary: String,
    /// Word count of the summary.
    pub summary_words: usize,
}

impl HistoryEntry {
    /// Build an entry stamped with the current local time.
    ///
    /// `input` is cut to `input_preview_chars` characters, with
    /// [`TRUNCATION_MARKER`] appended when anything was removed.
    pub fn new(
        input: &str,
        input_words: usize,
        summary: impl Into<String>,
        summary_words: usize,
        input_preview_chars: usize,
    ) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input: preview(input, input_preview_chars),
            input_words,
            summary: summary.into(),
            summary_words,
        }
    }
}

/// First `max_chars` characters of `text`, plus the truncation marker if cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str(TRUNCATION_MARKER);
        cut
    } else {
        text.to_string()
    }
}

// ── HistoryConfig ──────────────────────────────────────────────────

/// Retention and display settings for a [`HistoryStore`].
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Backing file. Default: `summary_history.json`.
    pub path: PathBuf,
    /// Entries kept on disk; older ones are dropped on append. Default: `50`.
    pub retention: usize,
    /// Entries shown by [`HistoryStore::recent`]. Default: `10`.
    pub display_limit: usize,
    /// Characters of the input kept in each entry. Default: `200`.
    pub input_preview_chars: usize,
    /// Characters of the summary shown in the formatted view. Default: `150`.
    pub summary_preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("summary_history.json"),
            retention: 50,
            display_limit: 10,
            input_preview_chars: 200,
            summary_preview_chars: 150,
        }
    }
}

impl HistoryConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }
}

// ── HistoryStore ───────────────────────────────────────────────────

/// Append-only, size-capped run log backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    config: HistoryConfig,
}

impl HistoryStore {
    pub fn new(config: HistoryConfig) -> Self {
        Self { config }
    }

    /// Store at `path` with default retention and display settings.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(HistoryConfig::default().with_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Append an entry and rewrite the file with the newest `retention` entries.
    pub fn append(&self, entry: HistoryEntry) {
        let mut log = self.load();
        log.push(entry);
        if log.len() > self.config.retention {
            let excess = log.len() - self.config.retention;
            log.drain(..excess);
        }
        match self.try_save(&log) {
            Ok(()) => debug!(
                "Saved history ({} entries) to {}",
                log.len(),
                self.config.path.display()
            ),
            Err(e) => warn!(
                "Failed to save history to {}: {e}",
                self.config.path.display()
            ),
        }
    }

    /// All persisted entries, oldest first. Empty when the file is missing or corrupt.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let path = &self.config.path;
        if !path.exists() {
            return Vec::new();
        }
        match self.try_load() {
            Ok(log) => log,
            Err(e) => {
                warn!("Ignoring unusable history at {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Delete the backing file. A missing file is not an error.
    pub fn clear(&self) {
        let path = &self.config.path;
        if !path.exists() {
            return;
        }
        match std::fs::remove_file(path) {
            Ok(()) => debug!("Cleared history at {}", path.display()),
            Err(e) => warn!("Failed to clear history at {}: {e}", path.display()),
        }
    }

    /// Up to `limit` most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        let mut log = self.load();
        let start = log.len().saturating_sub(limit);
        let mut recent = log.split_off(start);
        recent.reverse();
        recent
    }

    /// Markdown rendering of [`recent`](Self::recent) with the configured display limit.
    pub fn recent_formatted_default(&self) -> String {
        self.recent_formatted(self.config.display_limit)
    }

    /// Markdown rendering of the `limit` most recent entries, newest first.
    ///
    /// Returns [`EMPTY_HISTORY_MESSAGE`] when the log is empty.
    pub fn recent_formatted(&self, limit: usize) -> String {
        let recent = self.recent(limit);
        if recent.is_empty() {
            return EMPTY_HISTORY_MESSAGE.to_string();
        }

        let mut out = String::new();
        for (i, entry) in recent.iter().enumerate() {
            let summary: String = entry
                .summary
                .chars()
                .take(self.config.summary_preview_chars)
                .collect();
            let _ = writeln!(out, "**{}. {}**", i + 1, entry.timestamp);
            let _ = writeln!(
                out,
                "Input ({} words): {}",
                entry.input_words, entry.input
            );
            let _ = writeln!(
                out,
                "Summary ({} words): {summary}{TRUNCATION_MARKER}",
                entry.summary_words
            );
            out.push_str("---\n\n");
        }
        out
    }

    fn try_load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let json = std::fs::read_to_string(&self.config.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Atomic write: serialize to a temp file, then rename into place.
    fn try_save(&self, log: &[HistoryEntry]) -> Result<(), HistoryError> {
        let path = &self.config.path;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        let json = serde_json::to_string_pretty(log)?;
        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────────────

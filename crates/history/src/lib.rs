//! Persistent clipboard history: a bounded, deduplicated, newest-first list
//! of captured text snippets backed by a single JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum number of entries kept on disk.
pub const HISTORY_CAP: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not resolve the user home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// One captured clipboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipEntry {
    pub content: String,
    /// Capture time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Capture-time nanoseconds plus a positional disambiguator. Identity
    /// only; never derived from `content`.
    pub id: String,
}

impl ClipEntry {
    pub fn new(content: &str, disambiguator: usize) -> Self {
        let now = Utc::now();
        Self {
            content: content.to_string(),
            timestamp: now.timestamp(),
            id: entry_id(&now, disambiguator),
        }
    }
}

fn entry_id(now: &DateTime<Utc>, disambiguator: usize) -> String {
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());
    format!("{nanos}-{disambiguator}")
}

/// Read/write-through store over the history file.
///
/// The file is the single source of truth: every operation loads it fresh,
/// so concurrent writers (the clipboard watcher, a user-triggered clear)
/// never fight over a long-lived in-process list.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    cap: usize,
}

impl HistoryStore {
    /// Open a store at `path`, creating the parent directory if absent.
    ///
    /// This is the one startup-fatal failure in the system: without a
    /// writable history location there is nothing useful to run.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        Ok(Self {
            path,
            cap: HISTORY_CAP,
        })
    }

    /// Open the store at `<home>/.clipboard_history/history.json`.
    pub fn at_default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(HistoryError::NoHomeDir)?;
        Self::open(home.join(".clipboard_history").join("history.json"))
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history, newest first.
    ///
    /// A missing, unreadable, or malformed file reads as no history.
    pub fn load(&self) -> Vec<ClipEntry> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };
        if data.is_empty() {
            return Vec::new();
        }
        serde_json::from_slice(&data).unwrap_or_else(|e| {
            tracing::debug!("malformed history file, treating as empty: {e}");
            Vec::new()
        })
    }

    /// Record a newly captured text at the head of the history.
    ///
    /// Any prior entry with identical content is dropped first, so the most
    /// recent use of a text always sits on top. The list is then capped and
    /// persisted atomically. Persistence failures are logged and swallowed;
    /// history is best-effort.
    pub fn append(&self, content: &str) {
        if content.is_empty() {
            return;
        }
        let mut items = self.load();
        let entry = ClipEntry::new(content, items.len());
        items.retain(|e| e.content != content);
        items.insert(0, entry);
        items.truncate(self.cap);
        if let Err(e) = self.persist(&items) {
            tracing::warn!("failed to persist clipboard history: {e}");
        }
    }

    /// Replace the history with an empty list, unconditionally.
    pub fn clear(&self) {
        if let Err(e) = self.persist(&[]) {
            tracing::warn!("failed to clear clipboard history: {e}");
        }
    }

    // Write-to-temp then rename, so readers never observe a partial file.
    fn persist(&self, items: &[ClipEntry]) -> Result<()> {
        let data = serde_json::to_vec_pretty(items)?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_carries_capture_time() {
        let before = Utc::now().timestamp();
        let entry = ClipEntry::new("hello", 0);
        let after = Utc::now().timestamp();

        assert_eq!(entry.content, "hello");
        assert!(entry.timestamp >= before && entry.timestamp <= after);
    }

    #[test]
    fn entry_ids_are_distinct_for_distinct_disambiguators() {
        let a = ClipEntry::new("same", 0);
        let b = ClipEntry::new("same", 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn entry_id_is_time_then_disambiguator() {
        let entry = ClipEntry::new("x", 7);
        let (nanos, disambiguator) = entry.id.split_once('-').expect("id has two parts");
        assert!(nanos.parse::<i64>().is_ok());
        assert_eq!(disambiguator, "7");
    }
}

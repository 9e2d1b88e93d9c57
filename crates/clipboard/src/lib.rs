//! Clipboard access abstraction.
//!
//! The watcher and the menu only ever talk to the [`Clipboard`] trait, so
//! both can run against [`FakeClipboard`] in tests instead of the OS
//! clipboard.

use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Read/write access to the system clipboard's text content.
pub trait Clipboard: Send + Sync {
    /// Current clipboard text. `None` on failure or when the clipboard
    /// holds nothing readable as text.
    fn read_text(&self) -> Option<String>;

    /// Put `text` on the clipboard. Best-effort: callers log and move on.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

pub type ClipboardRef = Arc<dyn Clipboard>;

/// Clipboard implementation using arboard.
///
/// A fresh handle per call: `arboard::Clipboard` is not `Sync`, and on some
/// platforms a long-lived handle keeps the clipboard selection alive.
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Option<String> {
        arboard::Clipboard::new()
            .ok()
            .and_then(|mut cb| cb.get_text().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = arboard::Clipboard::new()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        cb.set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

#[derive(Default)]
struct FakeState {
    content: Option<String>,
    failing: bool,
    writes: Vec<String>,
}

/// In-memory clipboard for testing.
///
/// Content is returned verbatim (no trimming), reads can be made to fail,
/// and every write is recorded for inspection.
#[derive(Default)]
pub struct FakeClipboard {
    state: Mutex<FakeState>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let fake = Self::default();
        fake.set_text(text);
        fake
    }

    /// Simulate the user copying `text`.
    pub fn set_text(&self, text: &str) {
        self.lock().content = Some(text.to_string());
    }

    /// Make subsequent reads and writes fail until turned off again.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Every text written through the trait, in order.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }

    pub fn last_write(&self) -> Option<String> {
        self.lock().writes.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake clipboard mutex poisoned")
    }
}

impl Clipboard for FakeClipboard {
    fn read_text(&self) -> Option<String> {
        let state = self.lock();
        if state.failing {
            return None;
        }
        state.content.clone()
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.lock();
        if state.failing {
            return Err(ClipboardError::WriteFailed("simulated failure".into()));
        }
        state.writes.push(text.to_string());
        state.content = Some(text.to_string());
        Ok(())
    }
}

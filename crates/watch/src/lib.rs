//! Clipboard watcher - background task that detects newly copied text.

use clipstack_clipboard::ClipboardRef;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default polling interval for clipboard changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Callback invoked with each newly observed clipboard text.
pub type CaptureCallback = Arc<dyn Fn(&str) + Send + Sync + 'static>;

/// Background poller for clipboard changes.
///
/// The OS clipboard has no portable change notification, so the watcher
/// polls on a fixed cadence and forwards anything new to the callback.
pub struct ClipboardWatcher {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for ClipboardWatcher {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl ClipboardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling with the given clipboard and callback.
    pub fn start(&mut self, clipboard: ClipboardRef, callback: CaptureCallback) {
        self.start_with_interval(clipboard, callback, DEFAULT_POLL_INTERVAL);
    }

    /// Start polling with a custom interval.
    pub fn start_with_interval(
        &mut self,
        clipboard: ClipboardRef,
        callback: CaptureCallback,
        interval: Duration,
    ) {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("ClipboardWatcher already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!("ClipboardWatcher started with interval {:?}", interval);

            // Local to this loop, never derived from the history store:
            // clearing history must not re-capture whatever still sits on
            // the clipboard. Only an actual new copy does.
            let mut last_seen: Option<String> = None;

            while running.load(Ordering::SeqCst) {
                // A failed read leaves last_seen untouched for this tick.
                if let Some(text) = clipboard.read_text() {
                    if !text.is_empty() && last_seen.as_deref() != Some(text.as_str()) {
                        tracing::debug!(chars = text.chars().count(), "captured clipboard text");
                        callback(&text);
                        last_seen = Some(text);
                    }
                }

                std::thread::sleep(interval);
            }

            tracing::info!("ClipboardWatcher stopped");
        });

        self.handle = Some(handle);
    }

    /// Stop the watcher.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the watcher is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for ClipboardWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

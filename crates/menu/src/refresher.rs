//! Periodic menu refresh - background task that re-runs the controller's
//! reconciliation on a fixed cadence.

use crate::controller::MenuController;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default interval between menu refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Background refresher for the tray menu.
pub struct MenuRefresher {
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Default for MenuRefresher {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }
}

impl MenuRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start refreshing with the default interval.
    pub fn start(&mut self, controller: Arc<MenuController>) {
        self.start_with_interval(controller, DEFAULT_REFRESH_INTERVAL);
    }

    /// Start refreshing with a custom interval.
    ///
    /// The first refresh runs immediately, so the menu is rendered once at
    /// startup before the cadence kicks in.
    pub fn start_with_interval(&mut self, controller: Arc<MenuController>, interval: Duration) {
        if self.running.load(Ordering::SeqCst) {
            tracing::warn!("MenuRefresher already running");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let handle = std::thread::spawn(move || {
            tracing::info!("MenuRefresher started with interval {:?}", interval);

            while running.load(Ordering::SeqCst) {
                controller.refresh();
                std::thread::sleep(interval);
            }

            tracing::info!("MenuRefresher stopped");
        });

        self.handle = Some(handle);
    }

    /// Stop the refresher.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the refresher is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for MenuRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}

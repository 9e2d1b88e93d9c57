//! Process entry point: logging, storage setup, and the platform tray.

use anyhow::Context;
use clipstack_history::HistoryStore;
use tracing_subscriber::EnvFilter;

#[cfg(any(target_os = "macos", target_os = "windows"))]
mod tray;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,clipstack=debug")),
        )
        .init();

    // Failing to set up the history directory is the one fatal startup
    // error; everything after this point is best-effort.
    let store = HistoryStore::at_default_location()
        .context("failed to prepare the clipboard history directory")?;
    tracing::info!(path = %store.path().display(), "starting clipstack");

    run(store)
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
fn run(store: HistoryStore) -> anyhow::Result<()> {
    tray::run(store)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn run(_store: HistoryStore) -> anyhow::Result<()> {
    anyhow::bail!("clipstack requires a native tray; this platform is not supported yet")
}

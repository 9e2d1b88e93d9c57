//! Menu controller: the engine that reconciles the rendered menu with the
//! history store and services user interaction.

use crate::label::menu_label;
use crate::surface::MenuSurfaceRef;
use clipstack_clipboard::ClipboardRef;
use clipstack_history::{ClipEntry, HistoryStore};
use crossbeam_channel::Receiver;
use std::sync::Mutex;

/// Maximum number of entries shown in the menu (distinct from the storage
/// cap).
pub const DEFAULT_DISPLAY_CAP: usize = 25;

/// Title of the disabled slot shown when the history is empty.
pub const EMPTY_PLACEHOLDER: &str = "No clipboard history";

/// User interaction with the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// A history slot was activated.
    EntrySelected(usize),
    ClearHistory,
    Quit,
}

/// Owns the rendered snapshot of the history and the lock protecting it.
///
/// The snapshot mutex is shared between the periodic refresh and selection
/// handling: a re-render can never swap the list out from under an
/// in-progress selection lookup.
pub struct MenuController {
    store: HistoryStore,
    clipboard: ClipboardRef,
    surface: MenuSurfaceRef,
    display_cap: usize,
    entries: Mutex<Vec<ClipEntry>>,
}

impl MenuController {
    pub fn new(store: HistoryStore, clipboard: ClipboardRef, surface: MenuSurfaceRef) -> Self {
        Self {
            store,
            clipboard,
            surface,
            display_cap: DEFAULT_DISPLAY_CAP,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_display_cap(mut self, cap: usize) -> Self {
        self.display_cap = cap;
        self
    }

    pub fn display_cap(&self) -> usize {
        self.display_cap
    }

    /// Reconcile the menu with the store.
    ///
    /// Entries are compared by id sequence only; when nothing changed the
    /// render is skipped entirely and this returns `false`.
    pub fn refresh(&self) -> bool {
        self.sync(false)
    }

    /// Re-render unconditionally. Used after a clear, when the data is
    /// known to have changed.
    pub fn force_refresh(&self) {
        self.sync(true);
    }

    fn sync(&self, force: bool) -> bool {
        let mut entries = self.entries.lock().expect("menu snapshot mutex poisoned");
        let items = self.store.load();

        if !force && same_ids(&items, &entries) {
            return false;
        }

        *entries = items;
        self.render(&entries);
        true
    }

    fn render(&self, entries: &[ClipEntry]) {
        for slot in 0..self.display_cap {
            self.surface.hide_slot(slot);
        }

        if entries.is_empty() {
            self.surface.set_slot_title(0, EMPTY_PLACEHOLDER);
            self.surface.disable_slot(0);
            self.surface.show_slot(0);
            return;
        }

        for (slot, entry) in entries.iter().take(self.display_cap).enumerate() {
            let title = format!("{}. {}", slot + 1, menu_label(&entry.content));
            self.surface.set_slot_title(slot, &title);
            self.surface.enable_slot(slot);
            self.surface.show_slot(slot);
        }

        tracing::debug!(shown = entries.len().min(self.display_cap), "menu re-rendered");
    }

    /// Copy the selected entry's content back to the clipboard.
    pub fn select(&self, slot: usize) {
        let entries = self.entries.lock().expect("menu snapshot mutex poisoned");

        let Some(entry) = entries.get(slot) else {
            tracing::debug!(slot, "selection out of range");
            return;
        };

        if let Err(e) = self.clipboard.write_text(&entry.content) {
            tracing::warn!("failed to copy history entry back to clipboard: {e}");
        }
    }

    /// Clear the persisted history and re-render immediately.
    pub fn clear_history(&self) {
        self.store.clear();
        self.force_refresh();
    }

    /// Event-dispatch loop: consumes menu events until [`MenuEvent::Quit`]
    /// or the channel disconnects.
    pub fn run(&self, events: &Receiver<MenuEvent>) {
        for event in events.iter() {
            match event {
                MenuEvent::EntrySelected(slot) => self.select(slot),
                MenuEvent::ClearHistory => self.clear_history(),
                MenuEvent::Quit => {
                    tracing::info!("quit requested");
                    break;
                }
            }
        }
    }
}

fn same_ids(a: &[ClipEntry], b: &[ClipEntry]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str, id: &str) -> ClipEntry {
        ClipEntry {
            content: content.to_string(),
            timestamp: 0,
            id: id.to_string(),
        }
    }

    #[test]
    fn same_ids_compares_length_and_position() {
        let a = vec![entry("x", "1"), entry("y", "2")];
        let b = vec![entry("x", "1"), entry("y", "2")];
        let shorter = vec![entry("x", "1")];
        let reordered = vec![entry("y", "2"), entry("x", "1")];

        assert!(same_ids(&a, &b));
        assert!(!same_ids(&a, &shorter));
        assert!(!same_ids(&a, &reordered));
    }

    #[test]
    fn same_ids_ignores_content() {
        // Identity comparison only; content is never re-inspected.
        let a = vec![entry("old", "1")];
        let b = vec![entry("new", "1")];
        assert!(same_ids(&a, &b));
    }
}

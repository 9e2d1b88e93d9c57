//! Render-target abstraction for the tray menu.
//!
//! The controller drives a fixed pool of addressable slots through this
//! trait, which keeps the native widget toolkit (and its main-thread
//! affinity) out of the core.

use std::sync::{Arc, Mutex};

/// A fixed pool of menu slots the history is rendered into.
pub trait MenuSurface: Send + Sync {
    fn set_slot_title(&self, slot: usize, title: &str);
    fn show_slot(&self, slot: usize);
    fn hide_slot(&self, slot: usize);
    fn enable_slot(&self, slot: usize);
    fn disable_slot(&self, slot: usize);
}

pub type MenuSurfaceRef = Arc<dyn MenuSurface>;

/// One operation applied to the render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    SetTitle(usize, String),
    Show(usize),
    Hide(usize),
    Enable(usize),
    Disable(usize),
}

impl SurfaceCall {
    pub fn slot(&self) -> usize {
        match self {
            Self::SetTitle(slot, _)
            | Self::Show(slot)
            | Self::Hide(slot)
            | Self::Enable(slot)
            | Self::Disable(slot) => *slot,
        }
    }
}

/// In-memory surface for testing.
///
/// Captures every call for later inspection.
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured calls, in order.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Captured calls addressing a specific slot.
    pub fn calls_for_slot(&self, slot: usize) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.slot() == slot)
            .cloned()
            .collect()
    }

    /// The most recent title set on a slot, if any.
    pub fn title_of(&self, slot: usize) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|c| match c {
                SurfaceCall::SetTitle(s, title) if *s == slot => Some(title.clone()),
                _ => None,
            })
    }

    /// Clear all captured calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of captured calls.
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if no calls have been captured.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MenuSurface for RecordingSurface {
    fn set_slot_title(&self, slot: usize, title: &str) {
        self.record(SurfaceCall::SetTitle(slot, title.to_string()));
    }

    fn show_slot(&self, slot: usize) {
        self.record(SurfaceCall::Show(slot));
    }

    fn hide_slot(&self, slot: usize) {
        self.record(SurfaceCall::Hide(slot));
    }

    fn enable_slot(&self, slot: usize) {
        self.record(SurfaceCall::Enable(slot));
    }

    fn disable_slot(&self, slot: usize) {
        self.record(SurfaceCall::Disable(slot));
    }
}

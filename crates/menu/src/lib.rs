//! Tray menu core: keeps the rendered history list in sync with the store
//! and handles entry selection, clearing, and quit.

mod controller;
mod label;
mod refresher;
mod surface;

pub use controller::{MenuController, MenuEvent, DEFAULT_DISPLAY_CAP, EMPTY_PLACEHOLDER};
pub use label::{menu_label, LABEL_MAX_CHARS};
pub use refresher::{MenuRefresher, DEFAULT_REFRESH_INTERVAL};
pub use surface::{MenuSurface, MenuSurfaceRef, RecordingSurface, SurfaceCall};

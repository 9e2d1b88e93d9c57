//! Native tray glue: a tao event loop driving a tray-icon menu.
//!
//! Native menu handles are main-thread-bound, so the refresher and dispatch
//! threads never touch them directly: surface operations travel through the
//! event-loop proxy and are applied here, on the main thread, in order.

use anyhow::Context;
use clipstack_clipboard::SystemClipboard;
use clipstack_history::HistoryStore;
use clipstack_menu::{
    MenuController, MenuEvent, MenuRefresher, MenuSurface, SurfaceCall, DEFAULT_DISPLAY_CAP,
};
use clipstack_watch::{CaptureCallback, ClipboardWatcher};
use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tray_icon::menu::{Menu, MenuEvent as NativeMenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const TOOLTIP: &str = "clipstack - clipboard history";
const HEADER_TITLE: &str = "Recent History";

enum UserEvent {
    Surface(SurfaceCall),
    Quit,
}

/// Surface that forwards every operation to the main event loop.
struct ProxySurface {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl ProxySurface {
    fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }

    fn send(&self, call: SurfaceCall) {
        let proxy = self.proxy.lock().expect("event loop proxy mutex poisoned");
        if proxy.send_event(UserEvent::Surface(call)).is_err() {
            tracing::debug!("event loop is gone, dropping surface update");
        }
    }
}

impl MenuSurface for ProxySurface {
    fn set_slot_title(&self, slot: usize, title: &str) {
        self.send(SurfaceCall::SetTitle(slot, title.to_string()));
    }

    fn show_slot(&self, slot: usize) {
        self.send(SurfaceCall::Show(slot));
    }

    fn hide_slot(&self, slot: usize) {
        self.send(SurfaceCall::Hide(slot));
    }

    fn enable_slot(&self, slot: usize) {
        self.send(SurfaceCall::Enable(slot));
    }

    fn disable_slot(&self, slot: usize) {
        self.send(SurfaceCall::Disable(slot));
    }
}

/// The real menu: a pool of entry items between the header and the
/// separator. muda has no per-item hide, so hidden slots are removed from
/// the menu and shown ones inserted back at their position.
struct TrayMenu {
    menu: Menu,
    slots: Vec<MenuItem>,
    visible: Vec<bool>,
}

impl TrayMenu {
    fn new(display_cap: usize) -> anyhow::Result<Self> {
        let menu = Menu::new();

        let header = MenuItem::with_id("header", HEADER_TITLE, false, None);
        menu.append(&header).context("tray menu header")?;

        // Entry slots start hidden; the controller shows what it needs.
        let slots: Vec<MenuItem> = (0..display_cap)
            .map(|i| MenuItem::with_id(format!("slot-{i}"), "", true, None))
            .collect();

        menu.append(&PredefinedMenuItem::separator())
            .context("tray menu separator")?;
        menu.append(&MenuItem::with_id("clear", "Clear History", true, None))
            .context("tray menu clear item")?;
        menu.append(&MenuItem::with_id("quit", "Quit", true, None))
            .context("tray menu quit item")?;

        Ok(Self {
            menu,
            slots,
            visible: vec![false; display_cap],
        })
    }

    fn apply(&mut self, call: SurfaceCall) {
        match call {
            SurfaceCall::SetTitle(slot, title) => {
                if let Some(item) = self.slots.get(slot) {
                    item.set_text(title);
                }
            }
            SurfaceCall::Enable(slot) => {
                if let Some(item) = self.slots.get(slot) {
                    item.set_enabled(true);
                }
            }
            SurfaceCall::Disable(slot) => {
                if let Some(item) = self.slots.get(slot) {
                    item.set_enabled(false);
                }
            }
            SurfaceCall::Show(slot) => self.show(slot),
            SurfaceCall::Hide(slot) => self.hide(slot),
        }
    }

    fn show(&mut self, slot: usize) {
        if slot >= self.slots.len() || self.visible[slot] {
            return;
        }
        // Slot items sit right after the header, in slot order.
        let position = 1 + self.visible[..slot].iter().filter(|v| **v).count();
        if let Err(e) = self.menu.insert(&self.slots[slot], position) {
            tracing::warn!("failed to show menu slot {slot}: {e}");
            return;
        }
        self.visible[slot] = true;
    }

    fn hide(&mut self, slot: usize) {
        if slot >= self.slots.len() || !self.visible[slot] {
            return;
        }
        if let Err(e) = self.menu.remove(&self.slots[slot]) {
            tracing::warn!("failed to hide menu slot {slot}: {e}");
            return;
        }
        self.visible[slot] = false;
    }
}

/// Map native menu activations onto controller events.
fn forward_native_events(tx: Sender<MenuEvent>) {
    std::thread::spawn(move || {
        for event in NativeMenuEvent::receiver().iter() {
            let id = event.id().0.as_str();
            let mapped = match id {
                "clear" => Some(MenuEvent::ClearHistory),
                "quit" => Some(MenuEvent::Quit),
                _ => id
                    .strip_prefix("slot-")
                    .and_then(|s| s.parse().ok())
                    .map(MenuEvent::EntrySelected),
            };
            if let Some(event) = mapped {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
}

fn create_tray_icon() -> anyhow::Result<Icon> {
    // 22x22 fits the macOS menu bar; other platforms scale it.
    let size = 22u32;
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    let center = (size / 2) as i32;
    let radius = (size / 2 - 2) as i32;

    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let dx = x - center;
            let dy = y - center;
            if dx * dx + dy * dy <= radius * radius {
                let idx = ((y as u32 * size + x as u32) * 4) as usize;
                rgba[idx..idx + 4].copy_from_slice(&[0x3b, 0x82, 0xf6, 0xff]);
            }
        }
    }

    Icon::from_rgba(rgba, size, size).context("tray icon rgba")
}

pub fn run(store: HistoryStore) -> anyhow::Result<()> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let mut tray_menu = TrayMenu::new(DEFAULT_DISPLAY_CAP)?;
    let icon = create_tray_icon()?;

    let clipboard = Arc::new(SystemClipboard::new());
    let surface = Arc::new(ProxySurface::new(proxy.clone()));
    let controller = Arc::new(MenuController::new(
        store.clone(),
        clipboard.clone(),
        surface,
    ));

    let mut watcher = ClipboardWatcher::new();
    let capture: CaptureCallback = {
        let store = store.clone();
        Arc::new(move |text: &str| store.append(text))
    };
    watcher.start(clipboard, capture);

    let mut refresher = MenuRefresher::new();
    refresher.start(Arc::clone(&controller));

    let (tx, rx) = crossbeam_channel::unbounded();
    forward_native_events(tx);

    let _dispatch = {
        let controller = Arc::clone(&controller);
        let proxy = proxy.clone();
        std::thread::spawn(move || {
            controller.run(&rx);
            let _ = proxy.send_event(UserEvent::Quit);
        })
    };

    let mut tray: Option<TrayIcon> = None;
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            // The tray must be created after the event loop is live on
            // macOS.
            Event::NewEvents(StartCause::Init) => {
                match TrayIconBuilder::new()
                    .with_menu(Box::new(tray_menu.menu.clone()))
                    .with_tooltip(TOOLTIP)
                    .with_icon(icon.clone())
                    .build()
                {
                    Ok(t) => tray = Some(t),
                    Err(e) => {
                        tracing::error!("failed to create tray icon: {e}");
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::UserEvent(UserEvent::Surface(call)) => tray_menu.apply(call),
            Event::UserEvent(UserEvent::Quit) => *control_flow = ControlFlow::Exit,
            _ => {}
        }
    });
}

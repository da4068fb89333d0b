//! Mobile menu controller.
//!
//! Two states, `Closed` (initial) and `Open`. The state is mirrored into the
//! page on every transition: the sidebar `open` class, the toggle button and
//! overlay `active` classes, and a scroll lock on the body.

use std::time::{Duration, Instant};

use log::debug;

use super::debounce::Debounce;
use super::search::NAV_LINK_SELECTOR;
use crate::config::SiteSettings;
use crate::host::{Document, NodeId, Viewport};

/// Class set on the sidebar while the menu is open.
pub const PANEL_OPEN_CLASS: &str = "open";

/// Class set on the toggle button and overlay while the menu is open.
pub const ACTIVE_CLASS: &str = "active";

/// Open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggle(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

/// The side panel, its toggle and overlay, and the resize debounce.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    state: MenuState,
    toggle_button: NodeId,
    panel: NodeId,
    overlay: Option<NodeId>,
    nav_links: Vec<NodeId>,
    /// Widths at or below this are narrow
    breakpoint: u32,
    resize: Debounce,
}

impl MobileMenu {
    /// Bind to the page. Returns `None` (controller disabled) when the toggle
    /// button or the sidebar is missing; a missing overlay is fine.
    pub fn register<D: Document + ?Sized>(document: &D, settings: &SiteSettings) -> Option<Self> {
        let ids = &settings.elements;
        let (Some(toggle_button), Some(panel)) = (
            document.element_by_id(&ids.menu_toggle),
            document.element_by_id(&ids.sidebar),
        ) else {
            debug!("Mobile menu elements missing; controller disabled");
            return None;
        };

        let menu = Self {
            state: MenuState::Closed,
            toggle_button,
            panel,
            overlay: document.element_by_id(&ids.overlay),
            nav_links: document.select_all(NAV_LINK_SELECTOR),
            breakpoint: settings.breakpoint,
            resize: Debounce::new(Duration::from_millis(settings.resize_debounce_ms)),
        };
        debug!(
            "Mobile menu registered (overlay: {}, breakpoint: {})",
            menu.overlay.is_some(),
            menu.breakpoint
        );
        Some(menu)
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether `width` counts as a narrow viewport.
    pub fn is_narrow(&self, width: u32) -> bool {
        width <= self.breakpoint
    }

    /// The pending resize deadline, if any.
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Route a click. Returns `true` when the target belongs to the menu.
    pub fn on_click<D, V>(&mut self, document: &mut D, viewport: &V, target: NodeId) -> bool
    where
        D: Document + ?Sized,
        V: Viewport + ?Sized,
    {
        if target == self.toggle_button {
            self.toggle(document);
        } else if Some(target) == self.overlay {
            self.close(document);
        } else if self.nav_links.contains(&target) {
            if self.is_narrow(viewport.inner_width()) {
                self.close(document);
            }
        } else {
            return false;
        }
        true
    }

    /// Flip between open and closed.
    pub fn toggle<D: Document + ?Sized>(&mut self, document: &mut D) {
        self.transition(document, self.state.toggle());
    }

    /// Force the menu closed. Idempotent.
    pub fn close<D: Document + ?Sized>(&mut self, document: &mut D) {
        self.transition(document, MenuState::Closed);
    }

    /// Note a resize event; the check runs once the quiet period elapses.
    pub fn on_resize(&mut self, now: Instant) {
        self.resize.trigger(now);
    }

    /// Run the debounced resize check if it is due. Returns whether it ran.
    pub fn poll<D, V>(&mut self, document: &mut D, viewport: &V, now: Instant) -> bool
    where
        D: Document + ?Sized,
        V: Viewport + ?Sized,
    {
        if !self.resize.poll(now) {
            return false;
        }
        let width = viewport.inner_width();
        if !self.is_narrow(width) {
            debug!("Viewport widened to {}; closing menu", width);
            self.close(document);
        }
        true
    }

    fn transition<D: Document + ?Sized>(&mut self, document: &mut D, state: MenuState) {
        self.state = state;
        let open = state.is_open();

        document.set_class(self.panel, PANEL_OPEN_CLASS, open);
        document.set_class(self.toggle_button, ACTIVE_CLASS, open);
        if let Some(overlay) = self.overlay {
            document.set_class(overlay, ACTIVE_CLASS, open);
        }
        if let Some(body) = document.body() {
            document.set_style(body, "overflow", open.then_some("hidden"));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

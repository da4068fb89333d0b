//! Page lifecycle for plaindocs
//!
//! [`Page::bootstrap`] wires every controller into a page once it is ready,
//! then the host feeds it events through [`Page::dispatch`] and drives timers
//! through [`Page::poll_timers`]. A controller whose elements are missing is
//! left out; the rest keep working.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::{PreferenceStore, SiteSettings};
use crate::highlight::{highlight_code_blocks, Tokenizer};
use crate::host::{Clipboard, Document, HostSurface, NodeId, Viewport};
use crate::theme::ThemeController;
use crate::ui::{update_active_nav, CopyButtons, MobileMenu, NavFilter};

/// An event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The value of an input element changed
    Input(NodeId),
    /// An element was activated
    Click(NodeId),
    /// The viewport was resized
    Resize,
}

/// The controllers bound to one page.
#[derive(Debug)]
pub struct Page {
    settings: SiteSettings,
    theme: ThemeController,
    menu: Option<MobileMenu>,
    search: Option<NavFilter>,
    copy: Option<CopyButtons>,
    tokenizer: &'static Tokenizer,
}

impl Page {
    /// Bootstrap with the default settings.
    pub fn bootstrap<D, S, C, V>(host: &mut HostSurface<D, S, C, V>, current_path: &str) -> Self
    where
        D: Document,
        S: PreferenceStore,
        C: Clipboard,
        V: Viewport,
    {
        Self::bootstrap_with(host, SiteSettings::default(), current_path)
    }

    /// Run the page-ready sequence: theme, mobile menu, nav filter, active
    /// nav, code highlighting, copy buttons.
    pub fn bootstrap_with<D, S, C, V>(
        host: &mut HostSurface<D, S, C, V>,
        mut settings: SiteSettings,
        current_path: &str,
    ) -> Self
    where
        D: Document,
        S: PreferenceStore,
        C: Clipboard,
        V: Viewport,
    {
        settings.sanitize();

        let theme = ThemeController::init(&mut host.document, &host.preferences, &settings);
        let menu = MobileMenu::register(&host.document, &settings);
        let search = NavFilter::register(&host.document, &settings.elements);
        update_active_nav(&mut host.document, current_path);

        let tokenizer = Tokenizer::shared();
        highlight_code_blocks(&mut host.document, tokenizer);

        let copy = CopyButtons::register(
            &host.document,
            Duration::from_millis(settings.copy_feedback_ms),
        );

        info!(
            "Page ready (menu: {}, search: {}, copy buttons: {})",
            menu.is_some(),
            search.is_some(),
            copy.as_ref().map_or(0, CopyButtons::len)
        );

        Self {
            settings,
            theme,
            menu,
            search,
            copy,
            tokenizer,
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn search(&self) -> Option<&NavFilter> {
        self.search.as_ref()
    }

    pub fn copy_buttons(&self) -> Option<&CopyButtons> {
        self.copy.as_ref()
    }

    /// Route one event. Returns `true` when some controller handled it.
    pub fn dispatch<D, S, C, V>(
        &mut self,
        host: &mut HostSurface<D, S, C, V>,
        event: PageEvent,
        now: Instant,
    ) -> bool
    where
        D: Document,
        S: PreferenceStore,
        C: Clipboard,
        V: Viewport,
    {
        match event {
            PageEvent::Input(target) => match self.search {
                Some(ref search) if search.input() == target => {
                    search.on_input(&mut host.document);
                    true
                }
                _ => false,
            },
            PageEvent::Click(target) => self.on_click(host, target, now),
            PageEvent::Resize => match self.menu {
                Some(ref mut menu) => {
                    menu.on_resize(now);
                    true
                }
                None => false,
            },
        }
    }

    fn on_click<D, S, C, V>(
        &mut self,
        host: &mut HostSurface<D, S, C, V>,
        target: NodeId,
        now: Instant,
    ) -> bool
    where
        D: Document,
        S: PreferenceStore,
        C: Clipboard,
        V: Viewport,
    {
        if self.theme.handles(target) {
            self.theme.toggle(&mut host.document, &mut host.preferences);
            return true;
        }
        if let Some(ref search) = self.search {
            if search.clear_button() == Some(target) {
                search.clear(&mut host.document);
                return true;
            }
        }
        if let Some(ref mut copy) = self.copy {
            if copy.on_click(&mut host.document, &mut host.clipboard, target, now) {
                return true;
            }
        }
        match self.menu {
            Some(ref mut menu) => menu.on_click(&mut host.document, &host.viewport, target),
            None => false,
        }
    }

    /// Fire every timer due at `now`. Returns `true` if any fired.
    pub fn poll_timers<D, S, C, V>(&mut self, host: &mut HostSurface<D, S, C, V>, now: Instant) -> bool
    where
        D: Document,
        S: PreferenceStore,
        C: Clipboard,
        V: Viewport,
    {
        let resized = self
            .menu
            .as_mut()
            .is_some_and(|menu| menu.poll(&mut host.document, &host.viewport, now));
        let reverted = self
            .copy
            .as_mut()
            .map_or(0, |copy| copy.poll(&mut host.document, now));
        resized || reverted > 0
    }

    /// When the host should next call [`poll_timers`](Self::poll_timers).
    pub fn next_deadline(&self) -> Option<Instant> {
        let resize = self.menu.as_ref().and_then(MobileMenu::resize_deadline);
        let revert = self.copy.as_ref().and_then(CopyButtons::next_deadline);
        resize.into_iter().chain(revert).min()
    }

    /// Highlight code blocks added since bootstrap. Already highlighted
    /// blocks are skipped.
    pub fn rehighlight<D: Document + ?Sized>(&self, document: &mut D) -> usize {
        let processed = highlight_code_blocks(document, self.tokenizer);
        debug!("Rehighlight processed {} block(s)", processed);
        processed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::host::{MemoryDocument, MemoryHost};
    use crate::theme::THEME_ATTRIBUTE;

    #[test]
    fn test_bootstrap_empty_page() {
        let mut host = MemoryHost::with_document(MemoryDocument::new(), 1280);
        let page = Page::bootstrap(&mut host, "/");

        assert!(page.menu().is_none());
        assert!(page.search().is_none());
        assert!(page.copy_buttons().is_none());
        assert_eq!(page.theme().current_theme(), Theme::Dark);
        assert_eq!(
            host.document.attribute(MemoryDocument::ROOT, THEME_ATTRIBUTE).as_deref(),
            Some("dark")
        );
        assert!(page.next_deadline().is_none());
    }

    #[test]
    fn test_unknown_events_are_unhandled() {
        let mut host = MemoryHost::with_document(MemoryDocument::new(), 1280);
        let mut page = Page::bootstrap(&mut host, "/");
        let body = host.document.body().unwrap();
        let now = Instant::now();

        assert!(!page.dispatch(&mut host, PageEvent::Click(body), now));
        assert!(!page.dispatch(&mut host, PageEvent::Input(body), now));
        assert!(!page.dispatch(&mut host, PageEvent::Resize, now));
        assert!(!page.poll_timers(&mut host, now));
    }

    #[test]
    fn test_bootstrap_sanitizes_settings() {
        let mut host = MemoryHost::with_document(MemoryDocument::new(), 1280);
        let settings = SiteSettings {
            breakpoint: 10,
            ..SiteSettings::default()
        };
        let page = Page::bootstrap_with(&mut host, settings, "/");
        assert_eq!(page.settings().breakpoint, SiteSettings::MIN_BREAKPOINT);
    }
}

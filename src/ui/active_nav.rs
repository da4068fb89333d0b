//! Marks the navigation entry for the current page.

use log::debug;

use super::mobile_menu::ACTIVE_CLASS;
use super::search::NAV_LINK_SELECTOR;
use crate::host::Document;

/// Page name used for directory paths.
pub const INDEX_PAGE: &str = "index.html";

/// The page name for a location path: its last segment, or `index.html`
/// when the path is empty or names a directory.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => INDEX_PAGE,
    }
}

/// Whether a link with `href` points at `page`.
pub fn link_targets_page(href: &str, page: &str) -> bool {
    let target = href.split('#').next().unwrap_or_default();
    if target.is_empty() {
        // Pure fragment links belong to the index page
        return page == INDEX_PAGE;
    }
    target == page
}

/// Toggle the active class on every nav link. Returns how many are active.
pub fn update_active_nav<D: Document + ?Sized>(document: &mut D, path: &str) -> usize {
    let page = current_page(path);
    let mut active = 0;
    for link in document.select_all(NAV_LINK_SELECTOR) {
        let href = document.attribute(link, "href").unwrap_or_default();
        let is_current = link_targets_page(&href, page);
        document.set_class(link, ACTIVE_CLASS, is_current);
        active += usize::from(is_current);
    }
    debug!("Active nav for '{}': {} link(s)", page, active);
    active
}

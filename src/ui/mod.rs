//! Page controllers for plaindocs
//!
//! Each controller binds to the elements it needs at page-ready time and is
//! simply absent when they are missing.

mod active_nav;
mod copy;
mod debounce;
mod mobile_menu;
mod search;

pub use active_nav::{current_page, link_targets_page, update_active_nav, INDEX_PAGE};
pub use copy::{
    CopyButtons, CODE_CONTAINER_SELECTOR, COPIED_LABEL, COPY_BUTTON_SELECTOR, ERROR_LABEL,
};
pub use debounce::Debounce;
pub use mobile_menu::{MenuState, MobileMenu, ACTIVE_CLASS, PANEL_OPEN_CLASS};
pub use search::{
    entry_matches, normalize_query, NavEntry, NavFilter, NavGroup, NAV_GROUP_SELECTOR,
    NAV_LINK_SELECTOR,
};

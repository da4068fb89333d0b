//! Navigation filter for the sidebar search box.
//!
//! Every keystroke re-filters the whole navigation list. The list is bounded
//! by the size of the site's navigation, so there is no debouncing.

use log::debug;

use crate::config::ElementIds;
use crate::host::{Document, NodeId};

/// Selector for navigation entries.
pub const NAV_LINK_SELECTOR: &str = ".nav-link";

/// Selector for navigation groups.
pub const NAV_GROUP_SELECTOR: &str = ".nav-group";

/// Normalize raw input into a query: trimmed and lowercased.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether an entry labelled `label` stays visible for `query`.
///
/// `query` must already be normalized.
pub fn entry_matches(label: &str, query: &str) -> bool {
    query.is_empty() || label.to_lowercase().contains(query)
}

// ─────────────────────────────────────────────────────────────────────────────
// Nav Model
// ─────────────────────────────────────────────────────────────────────────────

/// A navigation entry and its derived visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub visible: bool,
}

/// An ordered cluster of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavGroup {
    pub entries: Vec<NavEntry>,
}

impl NavGroup {
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            entries: labels
                .into_iter()
                .map(|label| NavEntry {
                    label: label.into(),
                    visible: true,
                })
                .collect(),
        }
    }

    /// A group is visible iff any entry is; never stored separately.
    pub fn is_visible(&self) -> bool {
        self.entries.iter().any(|entry| entry.visible)
    }

    /// Re-derive every entry's visibility from `raw_query`.
    pub fn apply_query(&mut self, raw_query: &str) {
        let query = normalize_query(raw_query);
        for entry in &mut self.entries {
            entry.visible = entry_matches(&entry.label, &query);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nav Filter
// ─────────────────────────────────────────────────────────────────────────────

/// Filter state bound to a page's search input.
#[derive(Debug, Clone)]
pub struct NavFilter {
    /// The search input
    input: NodeId,
    /// The clear button, when present
    clear_button: Option<NodeId>,
    /// All navigation entries, in document order
    links: Vec<NodeId>,
    /// All navigation groups, in document order
    groups: Vec<NodeId>,
}

impl NavFilter {
    /// Bind to the page, or `None` when it has no search input.
    pub fn register<D: Document + ?Sized>(document: &D, ids: &ElementIds) -> Option<Self> {
        let Some(input) = document.element_by_id(&ids.search_input) else {
            debug!("No search input '{}'; nav filter disabled", ids.search_input);
            return None;
        };
        let filter = Self {
            input,
            clear_button: document.element_by_id(&ids.search_clear),
            links: document.select_all(NAV_LINK_SELECTOR),
            groups: document.select_all(NAV_GROUP_SELECTOR),
        };
        debug!(
            "Nav filter registered over {} links in {} groups",
            filter.links.len(),
            filter.groups.len()
        );
        Some(filter)
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn clear_button(&self) -> Option<NodeId> {
        self.clear_button
    }

    /// Re-filter after the input's value changed.
    pub fn on_input<D: Document + ?Sized>(&self, document: &mut D) {
        let raw = document.value(self.input);
        self.update_clear_button(document, &raw);

        let query = normalize_query(&raw);
        for &link in &self.links {
            let label = document.text_content(link);
            document.set_shown(link, entry_matches(&label, &query));
        }
        self.sync_groups(document);
    }

    /// Handle the clear button: empty the input, focus it, show everything.
    pub fn clear<D: Document + ?Sized>(&self, document: &mut D) {
        document.set_value(self.input, "");
        document.focus(self.input);
        self.update_clear_button(document, "");

        for &link in &self.links {
            document.set_shown(link, true);
        }
        for &group in &self.groups {
            document.set_shown(group, true);
        }
    }

    fn update_clear_button<D: Document + ?Sized>(&self, document: &mut D, raw: &str) {
        if let Some(button) = self.clear_button {
            let display = if raw.is_empty() { "none" } else { "flex" };
            document.set_style(button, "display", Some(display));
        }
    }

    fn sync_groups<D: Document + ?Sized>(&self, document: &mut D) {
        for &group in &self.groups {
            let any_visible = document
                .select_within(group, NAV_LINK_SELECTOR)
                .into_iter()
                .any(|link| document.is_shown(link));
            document.set_shown(group, any_visible);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

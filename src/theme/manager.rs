//! Theme Controller for plaindocs
//!
//! Centralizes theme handling for a page: reading the persisted preference,
//! applying it to the document element, and toggling between dark and light.
//!
//! # Usage
//!
//! ```
//! use plaindocs::config::{CookieJar, PreferenceStore, SiteSettings, Theme};
//! use plaindocs::host::MemoryDocument;
//! use plaindocs::theme::ThemeController;
//!
//! let mut doc = MemoryDocument::new();
//! let mut cookies = CookieJar::default();
//! let settings = SiteSettings::default();
//!
//! let mut controller = ThemeController::init(&mut doc, &cookies, &settings);
//! assert_eq!(controller.current_theme(), Theme::Dark);
//!
//! controller.toggle(&mut doc, &mut cookies);
//! assert_eq!(cookies.get("plain-theme").as_deref(), Some("light"));
//! ```

use log::{debug, info, warn};

use crate::config::{Preference, PreferenceStore, SiteSettings, Theme};
use crate::host::{Document, NodeId};

/// Attribute on the document element that selects the stylesheet palette.
pub const THEME_ATTRIBUTE: &str = "data-theme";

// ─────────────────────────────────────────────────────────────────────────────
// Theme Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the page's theme state.
#[derive(Debug, Clone)]
pub struct ThemeController {
    /// Theme most recently applied
    current_theme: Theme,
    /// Preference name to persist under
    preference_name: String,
    /// Lifetime of the persisted preference
    preference_days: u32,
    /// The toggle button, when the page has one
    toggle_button: Option<NodeId>,
}

impl ThemeController {
    /// Apply the persisted theme (or the default) and look up the toggle.
    ///
    /// The theme is applied even when the page has no toggle button.
    pub fn init<D, S>(document: &mut D, preferences: &S, settings: &SiteSettings) -> Self
    where
        D: Document,
        S: PreferenceStore + ?Sized,
    {
        let theme = match preferences.get(&settings.theme_preference) {
            Some(stored) => stored.parse().unwrap_or_else(|err| {
                warn!("Ignoring stored theme: {}", err);
                settings.default_theme
            }),
            None => settings.default_theme,
        };

        let toggle_button = document.element_by_id(&settings.elements.theme_toggle);
        if toggle_button.is_none() {
            debug!("No theme toggle on page; theme is fixed");
        }

        let controller = Self {
            current_theme: theme,
            preference_name: settings.theme_preference.clone(),
            preference_days: settings.theme_preference_days,
            toggle_button,
        };
        controller.apply(document);
        info!("ThemeController initialized with theme: {}", theme);
        controller
    }

    /// Get the current theme.
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    pub fn toggle_button(&self) -> Option<NodeId> {
        self.toggle_button
    }

    /// Whether a click on `target` should toggle the theme.
    pub fn handles(&self, target: NodeId) -> bool {
        self.toggle_button == Some(target)
    }

    /// Switch to the opposite of the theme currently applied to the document,
    /// apply it and persist it. Returns the new theme.
    ///
    /// A failed write is logged; the page keeps the new theme either way.
    pub fn toggle<D, S>(&mut self, document: &mut D, preferences: &mut S) -> Theme
    where
        D: Document,
        S: PreferenceStore + ?Sized,
    {
        let applied = document
            .attribute(document.root_element(), THEME_ATTRIBUTE)
            .and_then(|value| value.parse::<Theme>().ok())
            .unwrap_or(self.current_theme);
        let new_theme = applied.toggle();

        info!("Theme changed from {} to {}", applied, new_theme);
        self.current_theme = new_theme;
        self.apply(document);

        let preference = Preference::new(
            &self.preference_name,
            new_theme.as_str(),
            self.preference_days,
        );
        if let Err(err) = preferences.set(&preference) {
            warn!("Failed to persist theme: {}", err);
        }
        new_theme
    }

    fn apply<D: Document>(&self, document: &mut D) {
        let root = document.root_element();
        document.set_attribute(root, THEME_ATTRIBUTE, self.current_theme.as_str());
        debug!("Applied theme: {}", self.current_theme);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

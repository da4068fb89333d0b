//! Site settings for plaindocs
//!
//! This module defines the `SiteSettings` struct that holds everything a page
//! integration may want to tune: element ids, the responsive breakpoint,
//! timer delays and the theme preference key. All fields have defaults
//! matching the stock documentation template.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// The two page themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The opposite theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Value written to the `data-theme` attribute and the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored value is neither `dark` nor `light`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}'", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element Ids
// ─────────────────────────────────────────────────────────────────────────────

/// Ids of the interactive elements in the page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub search_input: String,
    pub search_clear: String,
    pub theme_toggle: String,
    pub menu_toggle: String,
    pub sidebar: String,
    pub overlay: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            search_input: String::from("docSearch"),
            search_clear: String::from("searchClear"),
            theme_toggle: String::from("themeToggle"),
            menu_toggle: String::from("mobileMenuToggle"),
            sidebar: String::from("sidebar"),
            overlay: String::from("sidebarOverlay"),
        }
    }
}

impl ElementIds {
    /// Replace blank ids with their defaults.
    fn sanitize(&mut self) {
        let defaults = Self::default();
        let pairs = [
            (&mut self.search_input, defaults.search_input),
            (&mut self.search_clear, defaults.search_clear),
            (&mut self.theme_toggle, defaults.theme_toggle),
            (&mut self.menu_toggle, defaults.menu_toggle),
            (&mut self.sidebar, defaults.sidebar),
            (&mut self.overlay, defaults.overlay),
        ];
        for (field, default) in pairs {
            if field.trim().is_empty() {
                *field = default;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Page integration settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Ids of the interactive elements
    pub elements: ElementIds,

    /// Viewport widths at or below this are "narrow" (mobile menu active)
    pub breakpoint: u32,

    /// Quiet period before a burst of resize events is acted on
    pub resize_debounce_ms: u64,

    /// How long a copy button shows its "Copied" label
    pub copy_feedback_ms: u64,

    /// Name of the persisted theme preference
    pub theme_preference: String,

    /// Lifetime of the persisted theme preference
    pub theme_preference_days: u32,

    /// Theme applied when nothing is persisted
    pub default_theme: Theme,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            breakpoint: 980,
            resize_debounce_ms: 250,
            copy_feedback_ms: 1500,
            theme_preference: String::from("plain-theme"),
            theme_preference_days: 3650,
            default_theme: Theme::Dark,
        }
    }
}

impl SiteSettings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed breakpoint.
    pub const MIN_BREAKPOINT: u32 = 320;

    /// Maximum allowed breakpoint.
    pub const MAX_BREAKPOINT: u32 = 4096;

    /// Maximum resize quiet period.
    pub const MAX_RESIZE_DEBOUNCE_MS: u64 = 5000;

    /// Minimum copy feedback duration.
    pub const MIN_COPY_FEEDBACK_MS: u64 = 100;

    /// Maximum copy feedback duration.
    pub const MAX_COPY_FEEDBACK_MS: u64 = 10_000;

    /// Maximum preference lifetime (ten years).
    pub const MAX_PREFERENCE_DAYS: u32 = 3650;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.elements.sanitize();

        self.breakpoint = self
            .breakpoint
            .clamp(Self::MIN_BREAKPOINT, Self::MAX_BREAKPOINT);

        self.resize_debounce_ms = self.resize_debounce_ms.min(Self::MAX_RESIZE_DEBOUNCE_MS);

        self.copy_feedback_ms = self
            .copy_feedback_ms
            .clamp(Self::MIN_COPY_FEEDBACK_MS, Self::MAX_COPY_FEEDBACK_MS);

        self.theme_preference_days = self
            .theme_preference_days
            .clamp(1, Self::MAX_PREFERENCE_DAYS);

        // Cookie names cannot be blank or contain separators
        let name = self.theme_preference.trim();
        if name.is_empty() || name.contains([';', '=', ',', ' ']) {
            self.theme_preference = Self::default().theme_preference;
        }
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

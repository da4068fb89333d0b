//! Host Surface
//!
//! Everything the page controllers need from their environment, expressed as
//! capability traits so the controllers run the same way against a browser
//! binding, a static pre-renderer, or the in-memory document used in tests.
//!
//! # Architecture
//!
//! - `document.rs` - [`Document`] trait: element lookup, classes, attributes, styles
//! - `memory.rs` - [`MemoryDocument`], an arena-backed implementation
//! - `selector.rs` - the small selector language both use for queries
//! - `clipboard.rs` - [`Clipboard`] trait, system and in-memory implementations
//!
//! Preferences live in [`crate::config::PreferenceStore`] alongside the rest
//! of the configuration code.

pub mod clipboard;
pub mod document;
pub mod memory;
pub mod selector;

pub use clipboard::{Clipboard, MemoryClipboard};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use document::{Document, NodeId};
pub use memory::MemoryDocument;
pub use selector::Selector;

use crate::config::PreferenceStore;

// ─────────────────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the current viewport width.
pub trait Viewport {
    /// Current inner width in CSS pixels.
    fn inner_width(&self) -> u32;
}

/// A viewport whose width is set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    pub width: u32,
}

impl FixedViewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self::new(1280)
    }
}

impl Viewport for FixedViewport {
    fn inner_width(&self) -> u32 {
        self.width
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Surface
// ─────────────────────────────────────────────────────────────────────────────

/// The bundle of capabilities handed to every controller call.
///
/// Fields are public so callers can borrow them independently, e.g. the
/// theme controller writes the document and the preference store at once.
#[derive(Debug, Default)]
pub struct HostSurface<D, S, C, V> {
    pub document: D,
    pub preferences: S,
    pub clipboard: C,
    pub viewport: V,
}

impl<D, S, C, V> HostSurface<D, S, C, V>
where
    D: Document,
    S: PreferenceStore,
    C: Clipboard,
    V: Viewport,
{
    pub fn new(document: D, preferences: S, clipboard: C, viewport: V) -> Self {
        Self {
            document,
            preferences,
            clipboard,
            viewport,
        }
    }
}

/// Fully in-memory host, used by tests and by pre-rendering.
pub type MemoryHost =
    HostSurface<MemoryDocument, crate::config::CookieJar, MemoryClipboard, FixedViewport>;

impl MemoryHost {
    /// In-memory host around `document` with an empty cookie jar, a working
    /// clipboard and a `width`-pixel viewport.
    pub fn with_document(document: MemoryDocument, width: u32) -> Self {
        HostSurface::new(
            document,
            crate::config::CookieJar::default(),
            MemoryClipboard::default(),
            FixedViewport::new(width),
        )
    }
}

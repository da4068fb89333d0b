//! Clipboard capability.
//!
//! Copy buttons only ever write plain text. The system implementation uses
//! the arboard crate; [`MemoryClipboard`] records writes and can be told to
//! fail, which is how the error label path is exercised.

use crate::error::{Error, Result};

/// Write-only access to a clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// System Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// The platform clipboard via arboard.
///
/// The handle is opened lazily on first write so constructing a host never
/// fails on machines without a display server.
#[cfg(feature = "system-clipboard")]
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "system-clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner {
            Some(ref mut clipboard) => clipboard,
            None => {
                let opened = arboard::Clipboard::new()
                    .map_err(|e| Error::Clipboard(format!("access failed: {}", e)))?;
                self.inner.insert(opened)
            }
        };

        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(format!("write failed: {}", e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// Clipboard that keeps its contents in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
    /// When set, every write fails with this message.
    pub deny: Option<String>,
}

impl MemoryClipboard {
    /// A clipboard on which every write fails, like a denied permission.
    pub fn denied(message: &str) -> Self {
        Self {
            contents: None,
            deny: Some(message.to_string()),
        }
    }

    /// The last successfully written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(ref message) = self.deny {
            return Err(Error::Clipboard(message.clone()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

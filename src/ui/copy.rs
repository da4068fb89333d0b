//! Copy-to-clipboard buttons on code blocks.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::host::{Clipboard, Document, NodeId};

/// Selector for copy buttons.
pub const COPY_BUTTON_SELECTOR: &str = ".copy-button";

/// Selector for the container a copy button belongs to.
pub const CODE_CONTAINER_SELECTOR: &str = ".code-block";

/// Label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied";

/// Label shown after a failed copy.
pub const ERROR_LABEL: &str = "Error";

#[derive(Debug, Clone)]
struct CopyButton {
    button: NodeId,
    /// The `code` element whose text is copied
    code: Option<NodeId>,
    /// Label to restore, and when
    revert: Option<(String, Instant)>,
}

/// All copy buttons on a page.
#[derive(Debug, Clone)]
pub struct CopyButtons {
    buttons: Vec<CopyButton>,
    feedback: Duration,
}

impl CopyButtons {
    /// Bind every copy button, or `None` when the page has none.
    pub fn register<D: Document + ?Sized>(document: &D, feedback: Duration) -> Option<Self> {
        let buttons: Vec<CopyButton> = document
            .select_all(COPY_BUTTON_SELECTOR)
            .into_iter()
            .map(|button| CopyButton {
                button,
                code: document
                    .closest(button, CODE_CONTAINER_SELECTOR)
                    .and_then(|container| document.select_within(container, "code").into_iter().next()),
                revert: None,
            })
            .collect();

        if buttons.is_empty() {
            return None;
        }
        debug!("Registered {} copy button(s)", buttons.len());
        Some(Self { buttons, feedback })
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Whether `target` is one of the copy buttons.
    pub fn handles(&self, target: NodeId) -> bool {
        self.buttons.iter().any(|b| b.button == target)
    }

    /// Earliest pending label revert.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.buttons.iter().filter_map(|b| b.revert.as_ref().map(|(_, at)| *at)).min()
    }

    /// Copy the code behind `target`. Returns `false` when `target` is not a
    /// copy button.
    pub fn on_click<D, C>(&mut self, document: &mut D, clipboard: &mut C, target: NodeId, now: Instant) -> bool
    where
        D: Document + ?Sized,
        C: Clipboard + ?Sized,
    {
        let feedback = self.feedback;
        let Some(entry) = self.buttons.iter_mut().find(|b| b.button == target) else {
            return false;
        };

        let text = entry.code.map(|code| document.text_content(code)).unwrap_or_default();
        match clipboard.write_text(&text) {
            Ok(()) => {
                // Keep the first label when clicked again before reverting
                let original = match entry.revert.take() {
                    Some((label, _)) => label,
                    None => document.text_content(entry.button),
                };
                document.set_text_content(entry.button, COPIED_LABEL);
                document.set_disabled(entry.button, true);
                entry.revert = Some((original, now + feedback));
                debug!("Copied {} bytes of code", text.len());
            }
            Err(err) => {
                warn!("Failed to copy code: {}", err);
                document.set_text_content(entry.button, ERROR_LABEL);
            }
        }
        true
    }

    /// Restore labels whose feedback period has elapsed. Returns how many.
    pub fn poll<D: Document + ?Sized>(&mut self, document: &mut D, now: Instant) -> usize {
        let mut restored = 0;
        for entry in &mut self.buttons {
            if !matches!(entry.revert, Some((_, at)) if now >= at) {
                continue;
            }
            if let Some((label, _)) = entry.revert.take() {
                document.set_text_content(entry.button, &label);
                document.set_disabled(entry.button, false);
                restored += 1;
            }
        }
        restored
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryClipboard, MemoryDocument};

    const FEEDBACK: Duration = Duration::from_millis(1500);

    fn page() -> (MemoryDocument, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let block = doc.append(body, "div.code-block").unwrap();
        let button = doc.append_text(block, "button.copy-button", "Copy").unwrap();
        let pre = doc.append(block, "pre").unwrap();
        doc.append_text(pre, "code", "let x = 1;").unwrap();
        (doc, button)
    }

    #[test]
    fn test_register_without_buttons() {
        assert!(CopyButtons::register(&MemoryDocument::new(), FEEDBACK).is_none());
    }

    #[test]
    fn test_copy_sets_feedback_then_reverts() {
        let (mut doc, button) = page();
        let mut clipboard = MemoryClipboard::default();
        let mut copy = CopyButtons::register(&doc, FEEDBACK).unwrap();
        let start = Instant::now();

        assert!(copy.on_click(&mut doc, &mut clipboard, button, start));
        assert_eq!(clipboard.contents(), Some("let x = 1;"));
        assert_eq!(doc.text_content(button), COPIED_LABEL);
        assert!(doc.is_disabled(button));
        assert_eq!(copy.next_deadline(), Some(start + FEEDBACK));

        assert_eq!(copy.poll(&mut doc, start + Duration::from_millis(1000)), 0);
        assert_eq!(copy.poll(&mut doc, start + FEEDBACK), 1);
        assert_eq!(doc.text_content(button), "Copy");
        assert!(!doc.is_disabled(button));
        assert!(copy.next_deadline().is_none());
    }

    #[test]
    fn test_copies_raw_text_of_highlighted_block() {
        let (mut doc, button) = page();
        let code = doc.select_all("code")[0];
        doc.set_inner_html(code, r#"<span class="token keyword">let</span> x = 1;"#);

        let mut clipboard = MemoryClipboard::default();
        let mut copy = CopyButtons::register(&doc, FEEDBACK).unwrap();
        copy.on_click(&mut doc, &mut clipboard, button, Instant::now());
        assert_eq!(clipboard.contents(), Some("let x = 1;"));
    }

    #[test]
    fn test_failure_shows_error_without_revert() {
        let (mut doc, button) = page();
        let mut clipboard = MemoryClipboard::denied("permission denied");
        let mut copy = CopyButtons::register(&doc, FEEDBACK).unwrap();
        let start = Instant::now();

        copy.on_click(&mut doc, &mut clipboard, button, start);
        assert_eq!(doc.text_content(button), ERROR_LABEL);
        assert!(!doc.is_disabled(button));
        assert!(copy.next_deadline().is_none());
        assert_eq!(copy.poll(&mut doc, start + FEEDBACK * 2), 0);
        assert_eq!(doc.text_content(button), ERROR_LABEL);
    }

    #[test]
    fn test_second_click_keeps_original_label() {
        let (mut doc, button) = page();
        let mut clipboard = MemoryClipboard::default();
        let mut copy = CopyButtons::register(&doc, FEEDBACK).unwrap();
        let start = Instant::now();

        copy.on_click(&mut doc, &mut clipboard, button, start);
        copy.on_click(&mut doc, &mut clipboard, button, start + Duration::from_millis(500));
        assert_eq!(copy.poll(&mut doc, start + FEEDBACK), 0);
        assert_eq!(copy.poll(&mut doc, start + Duration::from_millis(2000)), 1);
        assert_eq!(doc.text_content(button), "Copy");
    }

    #[test]
    fn test_other_targets_are_ignored() {
        let (mut doc, _) = page();
        let body = doc.body().unwrap();
        let mut clipboard = MemoryClipboard::default();
        let mut copy = CopyButtons::register(&doc, FEEDBACK).unwrap();

        assert!(!copy.handles(body));
        assert!(!copy.on_click(&mut doc, &mut clipboard, body, Instant::now()));
        assert!(clipboard.contents().is_none());
    }
}

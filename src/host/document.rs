//! The document capability.
//!
//! A deliberately small slice of the DOM: exactly what the controllers touch.

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Element lookup and mutation.
///
/// Selectors use the syntax of [`crate::host::Selector`]: compound selectors
/// (`tag#id.class`) joined by descendant combinators. Query results are in
/// document order.
pub trait Document {
    /// The document element (`<html>`), which carries the theme attribute.
    fn root_element(&self) -> NodeId;

    /// The `<body>` element, if present.
    fn body(&self) -> Option<NodeId>;

    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All elements matching `selector`.
    fn select_all(&self, selector: &str) -> Vec<NodeId>;

    /// Descendants of `root` matching `selector`.
    fn select_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// `node` itself or its nearest ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Add (`on == true`) or remove a class.
    fn set_class(&mut self, node: NodeId, class: &str, on: bool);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Inline style property; `None` when unset.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Set an inline style property, or clear it with `None`.
    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>);

    /// Concatenated raw text of the element and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Replace the rendered content of `node` with trusted markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// Current value of a form input.
    fn value(&self, node: NodeId) -> String;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn focus(&mut self, node: NodeId);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    // ─────────────────────────────────────────────────────────────────────────
    // Provided helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip a class, returning whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on
    }

    /// Show (clearing inline `display`) or hide (`display: none`) an element.
    fn set_shown(&mut self, node: NodeId, shown: bool) {
        self.set_style(node, "display", if shown { None } else { Some("none") });
    }

    /// Whether the element is not hidden by an inline `display: none`.
    fn is_shown(&self, node: NodeId) -> bool {
        self.style(node, "display").as_deref() != Some("none")
    }
}

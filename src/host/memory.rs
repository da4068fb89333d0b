//! In-memory document.
//!
//! An arena of elements addressed by [`NodeId`], enough to build a
//! documentation page in tests and run every controller against it.
//!
//! Text is stored on the element that owns it rather than in separate text
//! nodes. Markup written with [`Document::set_inner_html`] is kept next to
//! the raw text, so `text_content` keeps returning the source of a
//! highlighted code block, like `textContent` does in a browser.

use std::collections::BTreeMap;

use log::debug;

use super::document::{Document, NodeId};
use super::selector::{Compound, Selector, SelectorError};
use crate::highlight::escape_html;

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    value: String,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            ..Self::default()
        }
    }

    fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    fn matches(&self, compound: &Compound) -> bool {
        compound.matches(&self.tag, self.id(), self.classes.iter().map(String::as_str))
    }
}

/// Arena-backed [`Document`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    body: NodeId,
    focused: Option<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// The root `<html>` element.
    pub const ROOT: NodeId = NodeId(0);

    /// An empty page: `<html>` with a `<body>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html", None)],
            body: NodeId(0),
            focused: None,
        };
        doc.body = doc.push(Self::ROOT, Element::new("body", Some(Self::ROOT)));
        doc
    }

    fn push(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    /// Append a child described by a compound selector such as
    /// `a#home.nav-link`.
    pub fn append(&mut self, parent: NodeId, spec: &str) -> Result<NodeId, SelectorError> {
        let selector = Selector::parse(spec)?;
        let compound = selector.subject();
        let mut element = Element::new(compound.tag.as_deref().unwrap_or("div"), Some(parent));
        if let Some(ref id) = compound.id {
            element.attributes.insert("id".to_string(), id.clone());
        }
        element.classes = compound.classes.clone();
        Ok(self.push(parent, element))
    }

    /// [`append`](Self::append) followed by setting the element's text.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        spec: &str,
        text: &str,
    ) -> Result<NodeId, SelectorError> {
        let node = self.append(parent, spec)?;
        self.set_text_content(node, text);
        Ok(node)
    }

    /// Rendered markup of `node`: whatever was last written with
    /// `set_inner_html`, else its escaped text.
    pub fn inner_html(&self, node: NodeId) -> String {
        match self.get(node) {
            Some(element) => element
                .inner_html
                .clone()
                .unwrap_or_else(|| escape_html(&self.text_content(node))),
            None => String::new(),
        }
    }

    /// The element that last received focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|e| e.disabled)
    }

    /// Every element below `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(root) {
            Some(element) => element.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(element) = self.get(node) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(element) = self.get(node) else {
            return false;
        };
        if !element.matches(selector.subject()) {
            return false;
        }

        let mut cursor = element.parent;
        for compound in selector.ancestors() {
            loop {
                let Some(ancestor) = cursor.and_then(|id| self.get(id).map(|e| (id, e))) else {
                    return false;
                };
                cursor = ancestor.1.parent;
                if ancestor.1.matches(compound) {
                    break;
                }
            }
        }
        true
    }

    fn parse_or_log(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!("{}", err);
                None
            }
        }
    }
}

impl Document for MemoryDocument {
    fn root_element(&self) -> NodeId {
        Self::ROOT
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(Self::ROOT)
            .chain(self.descendants(Self::ROOT))
            .find(|node| self.get(*node).and_then(Element::id) == Some(id))
    }

    fn select_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = Self::parse_or_log(selector) else {
            return Vec::new();
        };
        std::iter::once(Self::ROOT)
            .chain(self.descendants(Self::ROOT))
            .filter(|node| self.matches(*node, &parsed))
            .collect()
    }

    fn select_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = Self::parse_or_log(selector) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|node| self.matches(*node, &parsed))
            .collect()
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let parsed = Self::parse_or_log(selector)?;
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if self.matches(current, &parsed) {
                return Some(current);
            }
            cursor = self.get(current).and_then(|e| e.parent);
        }
        None
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(element) = self.get_mut(node) {
            let present = element.classes.iter().any(|c| c == class);
            if on && !present {
                element.classes.push(class.to_string());
            } else if !on {
                element.classes.retain(|c| c != class);
            }
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = self.get(node)?;
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(node) {
            if name == "class" {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                element.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.get(node)?.style.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) {
        if let Some(element) = self.get_mut(node) {
            match value {
                Some(value) if !value.is_empty() => {
                    element.style.insert(property.to_string(), value.to_string());
                }
                _ => {
                    element.style.remove(property);
                }
            }
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        let Some(element) = self.get(node) else {
            return String::new();
        };
        let mut text = element.text.clone();
        for child in &element.children {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = match self.get_mut(node) {
            Some(element) => {
                element.text = text.to_string();
                element.inner_html = None;
                std::mem::take(&mut element.children)
            }
            None => return,
        };
        for child in children {
            if let Some(child) = self.get_mut(child) {
                child.parent = None;
            }
        }
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.get_mut(node) {
            element.inner_html = Some(html.to_string());
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.get(node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.get_mut(node) {
            element.value = value.to_string();
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.get(node).is_some() {
            self.focused = Some(node);
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(element) = self.get_mut(node) {
            element.disabled = disabled;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryDocument, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let nav = doc.append(body, "nav#sidebar.sidebar").unwrap();
        let group = doc.append(nav, "div.nav-group").unwrap();
        let link = doc.append_text(group, "a.nav-link", "Intro").unwrap();
        let pre = doc.append(body, "pre").unwrap();
        let code = doc.append_text(pre, "code", "x = 1").unwrap();
        (doc, link, code)
    }

    #[test]
    fn test_new_document_has_html_and_body() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.root_element(), MemoryDocument::ROOT);
        assert_eq!(doc.select_all("body"), vec![doc.body().unwrap()]);
    }

    #[test]
    fn test_element_by_id() {
        let (doc, _, _) = sample();
        assert!(doc.element_by_id("sidebar").is_some());
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn test_descendant_selector() {
        let (doc, link, code) = sample();
        assert_eq!(doc.select_all("pre code"), vec![code]);
        assert_eq!(doc.select_all("nav .nav-link"), vec![link]);
        assert!(doc.select_all("pre .nav-link").is_empty());
    }

    #[test]
    fn test_select_within_and_closest() {
        let (doc, link, _) = sample();
        let group = doc.select_all(".nav-group")[0];
        assert_eq!(doc.select_within(group, ".nav-link"), vec![link]);
        assert_eq!(doc.closest(link, ".nav-group"), Some(group));
        assert_eq!(doc.closest(link, ".nav-link"), Some(link));
        assert_eq!(doc.closest(link, "pre"), None);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let (doc, _, _) = sample();
        assert!(doc.select_all("a > b").is_empty());
    }

    #[test]
    fn test_classes_and_attributes() {
        let (mut doc, link, _) = sample();
        assert!(doc.toggle_class(link, "active"));
        assert!(doc.has_class(link, "active"));
        assert_eq!(doc.attribute(link, "class").as_deref(), Some("nav-link active"));
        assert!(!doc.toggle_class(link, "active"));

        doc.set_attribute(link, "href", "faq.html");
        assert_eq!(doc.attribute(link, "href").as_deref(), Some("faq.html"));
    }

    #[test]
    fn test_shown_state() {
        let (mut doc, link, _) = sample();
        assert!(doc.is_shown(link));
        doc.set_shown(link, false);
        assert_eq!(doc.style(link, "display").as_deref(), Some("none"));
        doc.set_shown(link, true);
        assert!(doc.style(link, "display").is_none());
    }

    #[test]
    fn test_text_content_recurses_and_survives_inner_html() {
        let (mut doc, _, code) = sample();
        let pre = doc.select_all("pre")[0];
        assert_eq!(doc.text_content(pre), "x = 1");

        doc.set_inner_html(code, "<span>x</span> = 1");
        assert_eq!(doc.text_content(code), "x = 1");
        assert_eq!(doc.inner_html(code), "<span>x</span> = 1");
    }

    #[test]
    fn test_inner_html_defaults_to_escaped_text() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let code = doc.append_text(body, "code", "a < b").unwrap();
        assert_eq!(doc.inner_html(code), "a &lt; b");
    }

    #[test]
    fn test_unknown_node_is_inert() {
        let mut doc = MemoryDocument::new();
        let ghost = NodeId(999);
        doc.set_class(ghost, "x", true);
        doc.focus(ghost);
        assert!(!doc.has_class(ghost, "x"));
        assert!(doc.focused().is_none());
        assert_eq!(doc.text_content(ghost), "");
    }
}

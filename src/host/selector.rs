//! Selector parsing and matching.
//!
//! Supports the subset the pages need: type, `#id` and `.class` simple
//! selectors combined into compounds, and the descendant combinator
//! (whitespace). `pre code`, `.nav-group .nav-link` and `button#themeToggle`
//! are all valid.

use std::fmt;

/// A single compound selector, e.g. `a.nav-link.active`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    /// Whether an element with the given parts satisfies this compound.
    pub fn matches<'a, I>(&self, tag: &str, id: Option<&str>, classes: I) -> bool
    where
        I: Iterator<Item = &'a str> + Clone,
    {
        if let Some(ref want) = self.tag {
            if !want.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(ref want) = self.id {
            if id != Some(want.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|want| classes.clone().any(|have| have == want))
    }
}

/// A parsed selector: compounds from outermost ancestor to subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

/// Why a selector string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorError {
    pub selector: String,
    pub reason: &'static str,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector '{}': {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorError {}

impl Selector {
    /// Parse a selector string.
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let error = |reason| SelectorError {
            selector: raw.to_string(),
            reason,
        };

        let compounds = raw
            .split_whitespace()
            .map(|part| parse_compound(part).ok_or_else(|| error("malformed compound")))
            .collect::<Result<Vec<_>, _>>()?;

        if compounds.is_empty() {
            return Err(error("empty selector"));
        }
        Ok(Self { compounds })
    }

    /// The rightmost compound, which the matched element itself must satisfy.
    pub fn subject(&self) -> &Compound {
        // `parse` rejects empty selectors
        &self.compounds[self.compounds.len() - 1]
    }

    /// Compounds that must be satisfied by ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Compound> {
        self.compounds[..self.compounds.len() - 1].iter().rev()
    }
}

/// Parse `tag#id.class.class` (every part optional, at least one present).
fn parse_compound(part: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = part;

    let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if tag != "*" {
            if !tag.chars().all(is_ident_char) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return None;
        }
        match marker {
            '#' if compound.id.is_none() => compound.id = Some(name.to_string()),
            '.' => compound.classes.push(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }

    Some(compound)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

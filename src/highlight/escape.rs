//! HTML escaping for highlighted code.
//!
//! Every piece of code text that ends up in rendered markup goes through
//! [`push_escaped`], so no snippet content can ever be read as a tag.

/// Append `text` to `out` with the five reserved markup characters escaped.
pub fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for safe inclusion in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

/// Reverse [`escape_html`].
///
/// Only the five sequences produced by the escaper are recognized. `&amp;`
/// is replaced last so that text escaped twice comes back one level.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

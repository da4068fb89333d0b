//! Applies the tokenizer to every code block on a page, once.

use log::debug;

use super::tokenizer::Tokenizer;
use crate::host::Document;

/// Selector for the code blocks to highlight.
pub const CODE_BLOCK_SELECTOR: &str = "pre code";

/// Marker attribute set on a block after highlighting.
pub const HIGHLIGHTED_ATTRIBUTE: &str = "data-highlighted";

/// Highlight every unmarked code block and mark it.
///
/// Blocks already carrying the marker are skipped, so calling this from
/// several lifecycle hooks never double-escapes. Returns how many blocks were
/// processed by this call.
pub fn highlight_code_blocks<D: Document + ?Sized>(document: &mut D, tokenizer: &Tokenizer) -> usize {
    let mut processed = 0;
    for block in document.select_all(CODE_BLOCK_SELECTOR) {
        if document.attribute(block, HIGHLIGHTED_ATTRIBUTE).as_deref() == Some("true") {
            continue;
        }
        let raw = document.text_content(block);
        document.set_inner_html(block, &tokenizer.highlight(&raw));
        document.set_attribute(block, HIGHLIGHTED_ATTRIBUTE, "true");
        processed += 1;
    }
    debug!("Highlighted {} code block(s)", processed);
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryDocument, NodeId};

    fn page(snippets: &[&str]) -> (MemoryDocument, Vec<NodeId>) {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let blocks = snippets
            .iter()
            .map(|code| {
                let pre = doc.append(body, "pre").unwrap();
                doc.append_text(pre, "code", code).unwrap()
            })
            .collect();
        (doc, blocks)
    }

    #[test]
    fn test_highlights_and_marks_blocks() {
        let (mut doc, blocks) = page(&["print(1)", "# note"]);
        assert_eq!(highlight_code_blocks(&mut doc, &Tokenizer::new()), 2);

        assert_eq!(
            doc.inner_html(blocks[1]),
            r#"<span class="token comment"># note</span>"#
        );
        for block in blocks {
            assert_eq!(doc.attribute(block, HIGHLIGHTED_ATTRIBUTE).as_deref(), Some("true"));
        }
    }

    #[test]
    fn test_second_run_is_noop() {
        let (mut doc, blocks) = page(&["x = '<tag>'"]);
        let tokenizer = Tokenizer::new();

        highlight_code_blocks(&mut doc, &tokenizer);
        let once = doc.inner_html(blocks[0]);

        assert_eq!(highlight_code_blocks(&mut doc, &tokenizer), 0);
        assert_eq!(doc.inner_html(blocks[0]), once);
    }

    #[test]
    fn test_inline_code_outside_pre_is_left_alone() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let p = doc.append(body, "p").unwrap();
        let inline = doc.append_text(p, "code", "len").unwrap();

        assert_eq!(highlight_code_blocks(&mut doc, &Tokenizer::new()), 0);
        assert_eq!(doc.inner_html(inline), "len");
    }

    #[test]
    fn test_new_block_after_first_run_is_processed() {
        let (mut doc, _) = page(&["a"]);
        let tokenizer = Tokenizer::new();
        highlight_code_blocks(&mut doc, &tokenizer);

        let body = doc.body().unwrap();
        let pre = doc.append(body, "pre").unwrap();
        doc.append_text(pre, "code", "b").unwrap();
        assert_eq!(highlight_code_blocks(&mut doc, &tokenizer), 1);
    }
}

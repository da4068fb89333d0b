//! Code Highlighting Module
//!
//! Colorizes the code samples on documentation pages.
//!
//! - `escape.rs` - markup escaping, applied to every piece of code text
//! - `tokenizer.rs` - the single-pass lexical tokenizer and renderer
//! - `orchestrator.rs` - runs the tokenizer over a page's code blocks once

pub mod escape;
pub mod orchestrator;
pub mod tokenizer;

pub use escape::{escape_html, unescape_html};
pub use orchestrator::{highlight_code_blocks, CODE_BLOCK_SELECTOR, HIGHLIGHTED_ATTRIBUTE};
pub use tokenizer::{highlight_code, Token, TokenKind, Tokenizer};

//! plaindocs - client-side enhancements for static documentation sites
//!
//! Syntax highlighting for code samples, a live navigation filter, a
//! persisted dark/light theme, a responsive side menu and copy buttons, all
//! written against the capability traits in [`host`] so the same logic runs
//! in a browser binding, a pre-renderer or an in-memory test document.
//!
//! ```
//! use plaindocs::host::{Document, MemoryDocument, MemoryHost};
//! use plaindocs::Page;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body().unwrap();
//! let pre = doc.append(body, "pre").unwrap();
//! let code = doc.append_text(pre, "code", "return true").unwrap();
//!
//! let mut host = MemoryHost::with_document(doc, 1280);
//! let _page = Page::bootstrap(&mut host, "/index.html");
//! assert_eq!(
//!     host.document.inner_html(code),
//!     r#"<span class="token keyword">return</span> <span class="token boolean">true</span>"#
//! );
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod highlight;
pub mod host;
pub mod theme;
pub mod ui;

pub use app::{Page, PageEvent};
pub use error::{Error, Result};

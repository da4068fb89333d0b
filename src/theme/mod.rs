//! Theme System for plaindocs
//!
//! The page supports two palettes, selected by the `data-theme` attribute on
//! the document element. The `Theme` enum itself lives in
//! `config::settings`; this module owns applying and toggling it.

pub mod manager;

pub use manager::{ThemeController, THEME_ATTRIBUTE};

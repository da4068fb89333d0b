//! Configuration module for plaindocs
//!
//! This module handles site settings (with JSON persistence to the platform
//! config directory) and the durable preference stores the theme controller
//! writes to.

mod persistence;
mod preferences;
mod settings;

pub use persistence::*;
pub use preferences::*;
pub use settings::*;

//! Foundation types for the astpath tree.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - Tunable constants for tree traversal
//! - Escaping helpers for diagnostic dumps
//!
//! This module has NO dependencies on other astpath modules.

pub mod constants;
mod text;

pub use text::escape_control;

pub use text_size::{TextLen, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;

//! Foundation types for the tcdoc toolchain.
//!
//! This module provides the primitives shared by every other layer:
//! - [`TextRange`], [`TextSize`] - byte offsets into declaration text
//! - [`constants`] - file extensions and keyword tables
//! - [`text_utils`] - identifier and word helpers
//!
//! This module has NO dependencies on other tcdoc modules.

pub mod constants;
pub mod text_utils;

pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;

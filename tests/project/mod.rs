//! Project layer tests
//!
//! End-to-end loads of on-disk TwinCAT projects:
//! - Lookup by qualified name
//! - Field extraction through the XML container
//! - Diagnostics for duplicates and unreadable files
//! - Determinism of repeated and parallel loads

pub mod tests_diagnostics;
pub mod tests_determinism;
pub mod tests_loader;
#[cfg(feature = "serde")]
pub mod tests_serde;

//! Parser layer tests
//!
//! Public extractor surface on realistic, multi-line declarations.

pub mod tests_declarations;

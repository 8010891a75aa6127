//! Declaration parser for TwinCAT Structured Text
//!
//! Structured recognition here is deliberately shallow: only declaration
//! headers, inheritance clauses, modifiers and variable-block boundaries are
//! understood. Statement bodies are never parsed.
//!
//! ## Architecture
//!
//! ```text
//! Declaration text
//!     ↓
//! Lexer (logos) → comment / string / text spans
//!     ↓
//! SourceMask → excluded ranges + structural view (same byte offsets)
//!     ↓
//! Extractors (regex) → VarBlock, EXTENDS / IMPLEMENTS, modifiers, header
//!     ↓
//! Documentation → tagged comment record
//! ```

pub mod comments;
pub mod declaration;
pub mod documentation;
mod lexer;

pub use comments::{MaskedText, SourceMask, comment_texts, strip_comments};
pub use declaration::{
    AccessModifier, DeclarationHeader, TypeBodyKind, UnitKeyword, VarBlock, access_modifier,
    extends, header, implements, is_abstract, type_body_kind, var_blocks,
};
pub use documentation::{Documentation, documentation_for, parse_doc_comment, parse_documentation};
pub use lexer::{Token, TokenKind, tokenize};

//! # tcdoc-base
//!
//! Core library for reading TwinCAT 3 PLC sources into a documentation model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Directory loading, XML containers, registry
//!   ↓
//! syntax    → Object model: Pou, Dut, Interface, Method, Property
//!   ↓
//! parser    → Logos trivia lexer, declaration extractors, doc comments
//!   ↓
//! base      → Primitives (TextRange, constants, identifier helpers)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use tcdoc::project::TwinCatLoader;
//!
//! let mut loader = TwinCatLoader::new("PLC/MyProject");
//! loader.load()?;
//!
//! if let Some(method) = loader
//!     .get_item_by_name("FB_Base._ConfigureAlarm")
//!     .and_then(|item| item.as_method())
//! {
//!     println!("{} returns {:?}", method.name, method.return_type);
//! }
//! # Ok::<(), tcdoc::project::LoadError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project)
// ============================================================================

/// Foundation types: TextRange, constants, identifier helpers
pub mod base;

/// Parser: trivia lexer, comment masking, declaration and doc extractors
pub mod parser;

/// Syntax: the object model built from parsed declarations
pub mod syntax;

/// Project management: discovery, XML reading, registry, loader
pub mod project;

// Re-export foundation types
pub use base::{TextRange, TextSize};

// Re-export the loading surface
pub use project::{Diagnostic, Item, LoaderConfig, Registry, TwinCatLoader, load_registry};
pub use syntax::{Dut, Interface, Method, NamedContainer, Pou, Property, TcObject};

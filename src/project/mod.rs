//! Project loading: from a directory of TwinCAT sources to a [`Registry`].
//!
//! ```text
//! file_loader  → which files, in which order
//! source_file  → XML container → raw declaration fragments
//! assembly     → fragments → model objects
//! registry     → name-indexed store
//! loader       → drives the above, in parallel when configured
//! ```

pub mod assembly;
pub mod error;
pub mod file_loader;
pub mod loader;
pub mod registry;
pub mod source_file;

pub use error::{LoadError, SourceError};
pub use loader::{LoaderConfig, TwinCatLoader, load_object, load_registry};
pub use registry::{Diagnostic, Item, ItemId, Registry};

//! Error types for reading and loading TwinCAT sources.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a single source file could not be read.
///
/// These never abort a load; the loader records them as skipped files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// IO error while reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML container.
    #[error("XML error: {0}")]
    Xml(String),

    /// The container lacks an element every source must have.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Not a `.TcPOU`, `.TcDUT` or `.TcIO` file.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),
}

impl SourceError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }

    pub fn unsupported_extension(path: &Path) -> Self {
        Self::UnsupportedExtension(path.display().to_string())
    }
}

/// Errors that abort a whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Search root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Search root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

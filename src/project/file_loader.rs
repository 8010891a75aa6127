//! Source discovery: which files are TwinCAT sources, and where they are.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::SourceError;
use crate::base::constants::{DUT_EXTENSION, ITF_EXTENSION, POU_EXTENSION};
use crate::syntax::ObjectKind;

/// Options for [`collect_file_paths`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub follow_links: bool,
    pub max_depth: Option<usize>,
}

/// Object kind a file holds, from its extension (case-insensitive).
pub fn source_kind(path: &Path) -> Option<ObjectKind> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case(POU_EXTENSION) {
        Some(ObjectKind::Pou)
    } else if ext.eq_ignore_ascii_case(DUT_EXTENSION) {
        Some(ObjectKind::Dut)
    } else if ext.eq_ignore_ascii_case(ITF_EXTENSION) {
        Some(ObjectKind::Interface)
    } else {
        None
    }
}

/// Like [`source_kind`], as an error for callers that require a source.
pub fn validate_extension(path: &Path) -> Result<ObjectKind, SourceError> {
    source_kind(path).ok_or_else(|| SourceError::unsupported_extension(path))
}

/// Collect every TwinCAT source under `root`, sorted by file name per
/// directory so discovery order is stable across runs.
///
/// Entries that cannot be read are skipped with a warning.
pub fn collect_file_paths(root: &Path, options: WalkOptions) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable directory entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && source_kind(entry.path()).is_some())
        .map(|entry| entry.into_path())
        .collect()
}

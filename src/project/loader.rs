//! Directory loader: discovery → parse → single-writer registry build.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::assembly::assemble;
use super::error::{LoadError, SourceError};
use super::file_loader::{WalkOptions, collect_file_paths};
use super::registry::{Item, Registry};
use super::source_file::read_source;
use crate::syntax::{NamedContainer, TcObject};

/// Where and how to look for sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory searched recursively
    pub root: PathBuf,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Parse files on the rayon pool
    pub parallel: bool,
    /// Maximum directory depth below `root`; unlimited when `None`
    pub max_depth: Option<usize>,
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            parallel: true,
            max_depth: None,
        }
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.follow_links,
            max_depth: self.max_depth,
        }
    }
}

/// Loads every TwinCAT source under a root into a [`Registry`].
///
/// Until [`TwinCatLoader::load`] succeeds, every lookup returns `None`.
#[derive(Debug, Clone)]
pub struct TwinCatLoader {
    config: LoaderConfig,
    /// `None` until loaded
    registry: Option<Registry>,
}

impl TwinCatLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(LoaderConfig::new(root))
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.registry.is_some()
    }

    /// Walk the root and rebuild the registry from scratch.
    ///
    /// On error the previous registry, if any, is kept.
    pub fn load(&mut self) -> Result<&Registry, LoadError> {
        let registry: &Registry = self.registry.insert(load_registry(&self.config)?);
        Ok(registry)
    }

    /// Exact lookup of `FB_Base`, `FB_Base.Method` or `FB_Base.Property`.
    pub fn get_item_by_name(&self, name: &str) -> Option<Item<'_>> {
        self.registry.as_ref()?.get(name)
    }

    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    pub fn into_registry(self) -> Option<Registry> {
        self.registry
    }
}

/// Build a registry from every source below `config.root`.
pub fn load_registry(config: &LoaderConfig) -> Result<Registry, LoadError> {
    let root = &config.root;
    if !root.exists() {
        return Err(LoadError::RootNotFound(root.clone()));
    }
    if !root.is_dir() {
        return Err(LoadError::NotADirectory(root.clone()));
    }

    let paths = collect_file_paths(root, config.walk_options());
    tracing::debug!("found {} source files under {}", paths.len(), root.display());

    // results keep discovery order, so the merge below is the same either way
    let results: Vec<_> = if config.parallel {
        paths
            .par_iter()
            .map(|path| (path, load_object(path)))
            .collect()
    } else {
        paths.iter().map(|path| (path, load_object(path))).collect()
    };

    let mut registry = Registry::new();
    for (path, result) in results {
        match result {
            Ok(object) => {
                registry.insert(object);
            }
            Err(err) => registry.record_skipped(path, err.to_string()),
        }
    }

    tracing::debug!(
        "loaded {} objects ({} names, {} diagnostics) from {}",
        registry.len(),
        registry.qualified_names().count(),
        registry.diagnostics().len(),
        root.display()
    );
    Ok(registry)
}

/// Read and assemble one source file.
pub fn load_object(path: &Path) -> Result<TcObject, SourceError> {
    let raw = read_source(path)?;
    let object = assemble(raw, path)?;
    tracing::debug!(
        "loaded {} `{}` from {}",
        object.kind().display(),
        object.name(),
        path.display()
    );
    Ok(object)
}

//! Name-indexed store of everything one load produced.
//!
//! # Architecture
//!
//! - **Objects**: stored in a `Vec<TcObject>` in load order
//! - **Index**: qualified name → [`ItemId`], insertion ordered. Every object
//!   is indexed by its name, and each of its methods and properties by
//!   `Container.Member`
//! - **Diagnostics**: files that were skipped and names that were dropped
//!
//! Keys are unique. The first object to claim a name keeps it; a later one
//! is dropped and reported as [`Diagnostic::DuplicateName`].

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::syntax::{
    Dut, Interface, Method, NamedContainer, ObjectKind, Pou, Property, TcObject,
};

/// Handle of an indexed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Object(usize),
    Method { object: usize, index: usize },
    Property { object: usize, index: usize },
}

impl ItemId {
    /// Index of the owning top-level object.
    pub fn object(self) -> usize {
        match self {
            ItemId::Object(object)
            | ItemId::Method { object, .. }
            | ItemId::Property { object, .. } => object,
        }
    }
}

/// A registry lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item<'a> {
    Pou(&'a Pou),
    Dut(&'a Dut),
    Interface(&'a Interface),
    Method(&'a Method),
    Property(&'a Property),
}

impl<'a> Item<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Item::Pou(pou) => &pou.name,
            Item::Dut(dut) => &dut.name,
            Item::Interface(itf) => &itf.name,
            Item::Method(method) => &method.name,
            Item::Property(property) => &property.name,
        }
    }

    pub fn as_pou(self) -> Option<&'a Pou> {
        match self {
            Item::Pou(pou) => Some(pou),
            _ => None,
        }
    }

    pub fn as_dut(self) -> Option<&'a Dut> {
        match self {
            Item::Dut(dut) => Some(dut),
            _ => None,
        }
    }

    pub fn as_interface(self) -> Option<&'a Interface> {
        match self {
            Item::Interface(itf) => Some(itf),
            _ => None,
        }
    }

    pub fn as_method(self) -> Option<&'a Method> {
        match self {
            Item::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_property(self) -> Option<&'a Property> {
        match self {
            Item::Property(property) => Some(property),
            _ => None,
        }
    }
}

impl<'a> From<&'a TcObject> for Item<'a> {
    fn from(object: &'a TcObject) -> Self {
        match object {
            TcObject::Pou(pou) => Item::Pou(pou),
            TcObject::Dut(dut) => Item::Dut(dut),
            TcObject::Interface(itf) => Item::Interface(itf),
        }
    }
}

/// Something a load did not take in as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A source file that could not be read or assembled.
    Skipped { path: PathBuf, reason: String },
    /// A qualified name already taken by an earlier item.
    DuplicateName { name: String, path: PathBuf },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Skipped { path, reason } => {
                write!(f, "skipped {}: {reason}", path.display())
            }
            Diagnostic::DuplicateName { name, path } => {
                write!(f, "duplicate name `{name}` in {}", path.display())
            }
        }
    }
}

/// The read-only result of one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    objects: Vec<TcObject>,
    index: IndexMap<String, ItemId>,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // BUILDING
    // ========================================================================

    /// Add an object and its members.
    ///
    /// Returns `false` if the object's name was already taken; the object is
    /// then dropped. A member whose qualified name is taken is left out of
    /// the index but stays on its object.
    pub fn insert(&mut self, object: TcObject) -> bool {
        let name = object.name().to_string();
        if self.index.contains_key(&name) {
            self.duplicate(name, object.path());
            return false;
        }

        let id = self.objects.len();
        tracing::trace!("indexing {} `{name}`", object.kind().display());
        self.index.insert(name.clone(), ItemId::Object(id));

        for (index, method) in object.methods().iter().enumerate() {
            let key = qualified_name(&name, &method.name);
            self.insert_member(key, ItemId::Method { object: id, index }, object.path());
        }
        for (index, property) in object.properties().iter().enumerate() {
            let key = qualified_name(&name, &property.name);
            self.insert_member(key, ItemId::Property { object: id, index }, object.path());
        }

        self.objects.push(object);
        true
    }

    fn insert_member(&mut self, key: String, id: ItemId, path: &Path) {
        if self.index.contains_key(&key) {
            self.duplicate(key, path);
        } else {
            tracing::trace!("indexing member `{key}`");
            self.index.insert(key, id);
        }
    }

    fn duplicate(&mut self, name: String, path: &Path) {
        tracing::warn!(
            "duplicate name `{name}` in {}, keeping the first definition",
            path.display()
        );
        self.diagnostics.push(Diagnostic::DuplicateName {
            name,
            path: path.to_path_buf(),
        });
    }

    /// Record a source file that was left out of the load.
    pub fn record_skipped(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        let path = path.into();
        let reason = reason.into();
        tracing::warn!("skipping {}: {reason}", path.display());
        self.diagnostics.push(Diagnostic::Skipped { path, reason });
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Look up an object (`FB_Base`) or member (`FB_Base.Execute`) by its
    /// exact qualified name.
    pub fn get(&self, name: &str) -> Option<Item<'_>> {
        self.index.get(name).and_then(|id| self.item(*id))
    }

    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.index.get(name).copied()
    }

    pub fn item(&self, id: ItemId) -> Option<Item<'_>> {
        let object = self.objects.get(id.object())?;
        match id {
            ItemId::Object(_) => Some(Item::from(object)),
            ItemId::Method { index, .. } => object.methods().get(index).map(Item::Method),
            ItemId::Property { index, .. } => object.properties().get(index).map(Item::Property),
        }
    }

    /// Top-level object by name.
    pub fn object(&self, name: &str) -> Option<&TcObject> {
        match self.id_of(name)? {
            ItemId::Object(id) => self.objects.get(id),
            _ => None,
        }
    }

    // ========================================================================
    // ITERATION
    // ========================================================================

    /// `(name, object)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TcObject)> {
        self.objects.iter().map(|object| (object.name(), object))
    }

    /// Every indexed qualified name, objects and members, in insertion order.
    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn objects_of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &TcObject> {
        self.objects.iter().filter(move |object| object.kind() == kind)
    }

    pub fn pous(&self) -> impl Iterator<Item = &Pou> {
        self.objects.iter().filter_map(TcObject::as_pou)
    }

    pub fn duts(&self) -> impl Iterator<Item = &Dut> {
        self.objects.iter().filter_map(TcObject::as_dut)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.objects.iter().filter_map(TcObject::as_interface)
    }

    /// Number of top-level objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ========================================================================
    // DIAGNOSTICS
    // ========================================================================

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Skipped files and why.
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Skipped { path, reason } => Some((path.as_path(), reason.as_str())),
            Diagnostic::DuplicateName { .. } => None,
        })
    }

    /// Dropped duplicate names and the file that tried to claim them.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::DuplicateName { name, path } => Some((name.as_str(), path.as_path())),
            Diagnostic::Skipped { .. } => None,
        })
    }
}

/// `Container.Member`
pub fn qualified_name(container: &str, member: &str) -> String {
    format!("{container}.{member}")
}

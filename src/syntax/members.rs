//! Members of a container: methods, properties and property accessors.

use crate::parser::{AccessModifier, Documentation, VarBlock};

/// A `METHOD` of a function block or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Method {
    pub name: String,
    /// Declared return type, `None` for a method without one
    pub return_type: Option<String>,
    pub access_modifier: Option<AccessModifier>,
    pub is_abstract: bool,
    pub documentation: Option<Documentation>,
    pub var_blocks: Vec<VarBlock>,
    /// Raw declaration text
    pub declaration: String,
    /// Statement body, kept as written
    pub implementation: Option<String>,
}

/// Which half of a property an accessor implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AccessorKind {
    Get,
    Set,
}

impl AccessorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessorKind::Get => "Get",
            AccessorKind::Set => "Set",
        }
    }
}

/// The `Get` or `Set` body of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Accessor {
    pub kind: AccessorKind,
    pub access_modifier: Option<AccessModifier>,
    pub var_blocks: Vec<VarBlock>,
    pub declaration: String,
    pub implementation: Option<String>,
}

/// A `PROPERTY` of a function block or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    pub name: String,
    /// Type after the `:` of the property header
    pub return_type: Option<String>,
    pub access_modifier: Option<AccessModifier>,
    pub is_abstract: bool,
    pub documentation: Option<Documentation>,
    pub declaration: String,
    pub get: Option<Accessor>,
    pub set: Option<Accessor>,
}

impl Property {
    pub fn has_get(&self) -> bool {
        self.get.is_some()
    }

    pub fn has_set(&self) -> bool {
        self.set.is_some()
    }

    /// True when only the getter exists.
    pub fn is_read_only(&self) -> bool {
        self.has_get() && !self.has_set()
    }

    pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
        self.get.iter().chain(self.set.iter())
    }
}

//! Raw source fragments → typed model records.
//!
//! Each declaration is masked once. Type-level fields (inheritance, access,
//! `ABSTRACT`) are read from its header region only, so a variable named
//! `Public` or a comment in a `VAR` block never leaks into them.

use std::path::Path;

use rustc_hash::FxHashSet;

use super::error::SourceError;
use super::source_file::{RawFragment, RawProperty, RawUnit};
use crate::parser::declaration::{
    access_modifier_in, extends_in, header_in, header_region, implements_in, is_abstract_in,
    type_body_kind_in, var_blocks_in,
};
use crate::parser::documentation::documentation_in;
use crate::parser::{AccessModifier, DeclarationHeader, MaskedText, UnitKeyword};
use crate::syntax::{
    Accessor, AccessorKind, Dut, Interface, Method, ObjectKind, Pou, PouKind, Property, TcObject,
};

/// A masked declaration and its header-region prefix.
struct Scoped<'a> {
    full: MaskedText<'a>,
    head: MaskedText<'a>,
}

impl<'a> Scoped<'a> {
    fn new(decl: &'a str) -> Self {
        let full = MaskedText::new(decl);
        let head = full.prefix(header_region(&full));
        Self { full, head }
    }

    fn header(&self) -> Option<DeclarationHeader> {
        header_in(&self.head)
    }

    fn access_modifier(&self) -> Option<AccessModifier> {
        access_modifier_in(&self.head).and_then(|m| AccessModifier::parse(&m))
    }
}

/// Build the model object for one parsed source file.
///
/// The `Name` attribute names the object; the declaration header is the
/// fallback when the attribute is missing.
pub fn assemble(raw: RawUnit, path: &Path) -> Result<TcObject, SourceError> {
    let scoped = Scoped::new(&raw.declaration);
    let header = scoped.header();
    let name = raw
        .name
        .clone()
        .or_else(|| header.as_ref().and_then(|h| h.name.clone()))
        .ok_or_else(|| SourceError::missing_attribute("Name"))?;

    if raw.kind == ObjectKind::Dut && !(raw.methods.is_empty() && raw.properties.is_empty()) {
        tracing::warn!("{}: data type carries members, ignoring them", path.display());
    }

    let mut seen = FxHashSet::default();
    let methods = assemble_methods(&name, &raw.methods, &mut seen);
    let properties = assemble_properties(&name, &raw.properties, &mut seen);

    let object = match raw.kind {
        ObjectKind::Pou => {
            let kind = match header.as_ref().map(|h| h.keyword) {
                Some(UnitKeyword::Program) => PouKind::Program,
                Some(UnitKeyword::Function) => PouKind::Function,
                _ => PouKind::FunctionBlock,
            };
            let extends = extends_in(&scoped.head);
            let implements = implements_in(&scoped.head)
                .into_iter()
                .filter(|i| !extends.iter().any(|e| e.eq_ignore_ascii_case(i)))
                .collect();
            let return_type = match kind {
                PouKind::Function => header.and_then(|h| h.declared_type),
                _ => None,
            };
            TcObject::Pou(Pou {
                name,
                kind,
                implements,
                access_modifier: scoped.access_modifier(),
                is_abstract: is_abstract_in(&scoped.head),
                return_type,
                documentation: documentation_in(&scoped.full),
                methods,
                properties,
                var_blocks: var_blocks_in(&scoped.full),
                declaration: raw.declaration.clone(),
                implementation: raw.implementation,
                path: path.to_path_buf(),
                extends,
            })
        }
        ObjectKind::Dut => TcObject::Dut(Dut {
            name,
            kind: type_body_kind_in(&scoped.full),
            documentation: documentation_in(&scoped.full),
            var_blocks: var_blocks_in(&scoped.full),
            declaration: raw.declaration.clone(),
            path: path.to_path_buf(),
        }),
        ObjectKind::Interface => TcObject::Interface(Interface {
            name,
            extends: extends_in(&scoped.head),
            documentation: documentation_in(&scoped.full),
            methods,
            properties,
            declaration: raw.declaration.clone(),
            path: path.to_path_buf(),
        }),
    };
    Ok(object)
}

// ============================================================================
// MEMBERS
// ============================================================================

/// Name of a member, or `None` (with a warning) when it is unnamed or
/// already taken in its container.
fn member_name(
    container: &str,
    attribute: Option<&str>,
    header: Option<&DeclarationHeader>,
    seen: &mut FxHashSet<String>,
) -> Option<String> {
    let Some(name) = attribute
        .map(str::to_string)
        .or_else(|| header.and_then(|h| h.name.clone()))
    else {
        tracing::warn!("{container}: skipping member without a name");
        return None;
    };
    if !seen.insert(name.clone()) {
        tracing::warn!("{container}: duplicate member `{name}`, keeping the first");
        return None;
    }
    Some(name)
}

fn assemble_methods(
    container: &str,
    raw: &[RawFragment],
    seen: &mut FxHashSet<String>,
) -> Vec<Method> {
    raw.iter()
        .filter_map(|fragment| {
            let declaration = fragment.declaration.clone().unwrap_or_default();
            let scoped = Scoped::new(&declaration);
            let header = scoped.header();
            let name = member_name(container, fragment.name.as_deref(), header.as_ref(), seen)?;
            Some(Method {
                name,
                return_type: header.and_then(|h| h.declared_type),
                access_modifier: scoped.access_modifier(),
                is_abstract: is_abstract_in(&scoped.head),
                documentation: documentation_in(&scoped.full),
                var_blocks: var_blocks_in(&scoped.full),
                implementation: fragment.implementation.clone(),
                declaration,
            })
        })
        .collect()
}

fn assemble_properties(
    container: &str,
    raw: &[RawProperty],
    seen: &mut FxHashSet<String>,
) -> Vec<Property> {
    raw.iter()
        .filter_map(|property| {
            let declaration = property.declaration.clone().unwrap_or_default();
            let scoped = Scoped::new(&declaration);
            let header = scoped.header();
            let name = member_name(container, property.name.as_deref(), header.as_ref(), seen)?;
            Some(Property {
                name,
                return_type: header.and_then(|h| h.declared_type),
                access_modifier: scoped.access_modifier(),
                is_abstract: is_abstract_in(&scoped.head),
                documentation: documentation_in(&scoped.full),
                get: property
                    .get
                    .as_ref()
                    .map(|f| assemble_accessor(AccessorKind::Get, f)),
                set: property
                    .set
                    .as_ref()
                    .map(|f| assemble_accessor(AccessorKind::Set, f)),
                declaration,
            })
        })
        .collect()
}

fn assemble_accessor(kind: AccessorKind, raw: &RawFragment) -> Accessor {
    let declaration = raw.declaration.clone().unwrap_or_default();
    let scoped = Scoped::new(&declaration);
    Accessor {
        kind,
        access_modifier: scoped.access_modifier(),
        var_blocks: var_blocks_in(&scoped.full),
        implementation: raw.implementation.clone(),
        declaration,
    }
}

//! Top-level objects: one per source file.

use std::path::{Path, PathBuf};

use super::members::{Method, Property};
use crate::parser::{AccessModifier, Documentation, TypeBodyKind, VarBlock};

/// Shape of a data type body.
pub type DutKind = TypeBodyKind;

/// Program organisation unit flavour, from the declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PouKind {
    #[default]
    FunctionBlock,
    Program,
    Function,
}

impl PouKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PouKind::FunctionBlock => "FUNCTION_BLOCK",
            PouKind::Program => "PROGRAM",
            PouKind::Function => "FUNCTION",
        }
    }
}

/// A function block, program or function.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pou {
    pub name: String,
    pub kind: PouKind,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub access_modifier: Option<AccessModifier>,
    pub is_abstract: bool,
    /// Return type of a `FUNCTION`
    pub return_type: Option<String>,
    pub documentation: Option<Documentation>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub var_blocks: Vec<VarBlock>,
    pub declaration: String,
    pub implementation: Option<String>,
    pub path: PathBuf,
}

/// A data unit type: struct, union, enumeration or alias.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dut {
    pub name: String,
    pub kind: DutKind,
    pub documentation: Option<Documentation>,
    pub var_blocks: Vec<VarBlock>,
    pub declaration: String,
    pub path: PathBuf,
}

/// An interface: method and property signatures only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interface {
    pub name: String,
    pub extends: Vec<String>,
    pub documentation: Option<Documentation>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    pub declaration: String,
    pub path: PathBuf,
}

/// Discriminant of [`TcObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectKind {
    Pou,
    Dut,
    Interface,
}

impl ObjectKind {
    pub fn display(self) -> &'static str {
        match self {
            ObjectKind::Pou => "POU",
            ObjectKind::Dut => "DUT",
            ObjectKind::Interface => "interface",
        }
    }
}

/// Any top-level object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "object_kind"))]
pub enum TcObject {
    Pou(Pou),
    Dut(Dut),
    Interface(Interface),
}

impl TcObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            TcObject::Pou(_) => ObjectKind::Pou,
            TcObject::Dut(_) => ObjectKind::Dut,
            TcObject::Interface(_) => ObjectKind::Interface,
        }
    }

    /// Source file the object was read from.
    pub fn path(&self) -> &Path {
        match self {
            TcObject::Pou(pou) => &pou.path,
            TcObject::Dut(dut) => &dut.path,
            TcObject::Interface(itf) => &itf.path,
        }
    }

    pub fn documentation(&self) -> Option<&Documentation> {
        match self {
            TcObject::Pou(pou) => pou.documentation.as_ref(),
            TcObject::Dut(dut) => dut.documentation.as_ref(),
            TcObject::Interface(itf) => itf.documentation.as_ref(),
        }
    }

    pub fn declaration(&self) -> &str {
        match self {
            TcObject::Pou(pou) => &pou.declaration,
            TcObject::Dut(dut) => &dut.declaration,
            TcObject::Interface(itf) => &itf.declaration,
        }
    }

    pub fn as_pou(&self) -> Option<&Pou> {
        match self {
            TcObject::Pou(pou) => Some(pou),
            _ => None,
        }
    }

    pub fn as_dut(&self) -> Option<&Dut> {
        match self {
            TcObject::Dut(dut) => Some(dut),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            TcObject::Interface(itf) => Some(itf),
            _ => None,
        }
    }
}

impl From<Pou> for TcObject {
    fn from(pou: Pou) -> Self {
        TcObject::Pou(pou)
    }
}

impl From<Dut> for TcObject {
    fn from(dut: Dut) -> Self {
        TcObject::Dut(dut)
    }
}

impl From<Interface> for TcObject {
    fn from(itf: Interface) -> Self {
        TcObject::Interface(itf)
    }
}

//! Object model: typed records built from TwinCAT source files.
//!
//! ```text
//! TcObject ─┬─ Pou        ─┬─ Method
//!           ├─ Interface  ─┴─ Property ─┬─ Accessor (Get)
//!           └─ Dut                      └─ Accessor (Set)
//! ```
//!
//! Everything here is plain data, built once by the loader and read-only
//! afterwards. With the `serde` feature every type derives `Serialize`.

pub mod members;
pub mod objects;

pub use members::{Accessor, AccessorKind, Method, Property};
pub use objects::{Dut, DutKind, Interface, ObjectKind, Pou, PouKind, TcObject};

// Re-export the parser types that appear in model fields
pub use crate::parser::{AccessModifier, Documentation, VarBlock};

/// Anything with a name that may own methods and properties.
pub trait NamedContainer {
    fn name(&self) -> &str;

    fn methods(&self) -> &[Method];

    fn properties(&self) -> &[Property];

    /// Method by exact name.
    fn method(&self, name: &str) -> Option<&Method> {
        self.methods().iter().find(|m| m.name == name)
    }

    /// Property by exact name.
    fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name == name)
    }
}

impl NamedContainer for Pou {
    fn name(&self) -> &str {
        &self.name
    }

    fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

impl NamedContainer for Interface {
    fn name(&self) -> &str {
        &self.name
    }

    fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

impl NamedContainer for Dut {
    fn name(&self) -> &str {
        &self.name
    }

    fn methods(&self) -> &[Method] {
        &[]
    }

    fn properties(&self) -> &[Property] {
        &[]
    }
}

impl NamedContainer for TcObject {
    fn name(&self) -> &str {
        match self {
            TcObject::Pou(pou) => pou.name(),
            TcObject::Dut(dut) => dut.name(),
            TcObject::Interface(itf) => itf.name(),
        }
    }

    fn methods(&self) -> &[Method] {
        match self {
            TcObject::Pou(pou) => pou.methods(),
            TcObject::Dut(dut) => dut.methods(),
            TcObject::Interface(itf) => itf.methods(),
        }
    }

    fn properties(&self) -> &[Property] {
        match self {
            TcObject::Pou(pou) => pou.properties(),
            TcObject::Dut(dut) => dut.properties(),
            TcObject::Interface(itf) => itf.properties(),
        }
    }
}

//! TwinCAT XML container reader.
//!
//! A source file wraps exactly one object:
//!
//! ```text
//! TcPlcObject
//! └── POU | DUT | Itf  (Name="...")
//!     ├── Declaration        CDATA
//!     ├── Implementation/ST  CDATA
//!     ├── Method (Name)      Declaration, Implementation/ST
//!     └── Property (Name)    Declaration, Get, Set
//!                            (each: Declaration, Implementation/ST)
//! ```
//!
//! The reader only pulls these fragments out. Everything else in the file
//! (`LineIds`, actions, folders, graphical languages) is ignored.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::SourceError;
use super::file_loader::validate_extension;
use crate::base::constants::xml;
use crate::syntax::{AccessorKind, ObjectKind};

/// Declaration and body of one method or accessor, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFragment {
    /// `Name` attribute, if present
    pub name: Option<String>,
    pub declaration: Option<String>,
    pub implementation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperty {
    pub name: Option<String>,
    pub declaration: Option<String>,
    pub get: Option<RawFragment>,
    pub set: Option<RawFragment>,
}

/// Everything the assembler needs from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub kind: ObjectKind,
    pub name: Option<String>,
    pub declaration: String,
    pub implementation: Option<String>,
    pub methods: Vec<RawFragment>,
    pub properties: Vec<RawProperty>,
}

/// Read and parse a source file; the extension decides which element is
/// expected.
pub fn read_source(path: &Path) -> Result<RawUnit, SourceError> {
    let kind = validate_extension(path)?;
    let bytes = std::fs::read(path)?;
    parse_source(&bytes, kind)
}

/// Parse the XML text of a source file holding an object of `kind`.
pub fn parse_source(input: &[u8], kind: ObjectKind) -> Result<RawUnit, SourceError> {
    let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
    let mut reader = Reader::from_reader(input);
    let mut state = ReaderState::new(kind);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => state.handle_start(e)?,
            Ok(Event::Empty(ref e)) => {
                state.handle_start(e)?;
                state.handle_end();
            }
            Ok(Event::End(_)) => state.handle_end(),
            Ok(Event::CData(e)) => {
                if let Some(capture) = state.capture.as_mut() {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| SourceError::xml(format!("Invalid CDATA: {e}")))?;
                    capture.push_cdata(text);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(capture) = state.capture.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| SourceError::xml(format!("Invalid text: {e}")))?;
                    capture.push_text(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SourceError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    state.finish()
}

// ============================================================================
// READER STATE
// ============================================================================

/// One open element. Owners carry the fragment being filled.
enum Frame {
    Unit,
    Method(RawFragment),
    Property(RawProperty),
    Accessor(AccessorKind, RawFragment),
    Declaration,
    Implementation,
    St,
    Other,
}

impl Frame {
    fn is_owner(&self) -> bool {
        matches!(
            self,
            Frame::Unit | Frame::Method(_) | Frame::Property(_) | Frame::Accessor(..)
        )
    }
}

/// Text of a `Declaration` or `ST` element. CDATA content wins over
/// surrounding whitespace text.
#[derive(Default)]
struct Capture {
    text: String,
    cdata: Option<String>,
}

impl Capture {
    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn push_cdata(&mut self, text: &str) {
        self.cdata.get_or_insert_with(String::new).push_str(text);
    }

    fn into_string(self) -> String {
        self.cdata.unwrap_or(self.text)
    }
}

struct ReaderState {
    kind: ObjectKind,
    stack: Vec<Frame>,
    unit: Option<RawUnit>,
    has_declaration: bool,
    capture: Option<Capture>,
}

impl ReaderState {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            stack: Vec::new(),
            unit: None,
            has_declaration: false,
            capture: None,
        }
    }

    fn unit_tag(&self) -> &'static [u8] {
        match self.kind {
            ObjectKind::Pou => xml::POU,
            ObjectKind::Dut => xml::DUT,
            ObjectKind::Interface => xml::ITF,
        }
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<(), SourceError> {
        let name = e.name();
        let tag = name.as_ref();
        let parent = self.stack.last();

        let frame = if tag == self.unit_tag() && self.unit.is_none() && self.stack.len() <= 1 {
            self.unit = Some(RawUnit {
                kind: self.kind,
                name: name_attribute(e)?,
                declaration: String::new(),
                implementation: None,
                methods: Vec::new(),
                properties: Vec::new(),
            });
            Frame::Unit
        } else if tag == xml::METHOD && matches!(parent, Some(Frame::Unit)) {
            Frame::Method(RawFragment {
                name: name_attribute(e)?,
                ..RawFragment::default()
            })
        } else if tag == xml::PROPERTY && matches!(parent, Some(Frame::Unit)) {
            Frame::Property(RawProperty {
                name: name_attribute(e)?,
                ..RawProperty::default()
            })
        } else if (tag == xml::GET || tag == xml::SET)
            && matches!(parent, Some(Frame::Property(_)))
        {
            let kind = if tag == xml::GET {
                AccessorKind::Get
            } else {
                AccessorKind::Set
            };
            Frame::Accessor(
                kind,
                RawFragment {
                    name: name_attribute(e)?,
                    ..RawFragment::default()
                },
            )
        } else if tag == xml::DECLARATION && parent.is_some_and(Frame::is_owner) {
            self.capture = Some(Capture::default());
            Frame::Declaration
        } else if tag == xml::IMPLEMENTATION && parent.is_some_and(Frame::is_owner) {
            Frame::Implementation
        } else if tag == xml::ST && matches!(parent, Some(Frame::Implementation)) {
            self.capture = Some(Capture::default());
            Frame::St
        } else {
            Frame::Other
        };

        self.stack.push(frame);
        Ok(())
    }

    fn handle_end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Declaration => {
                let text = self.take_capture();
                self.set_declaration(text);
            }
            Frame::St => {
                let text = self.take_capture();
                // the owner sits below the still-open Implementation frame
                let owner = self.stack.len().checked_sub(2);
                self.set_implementation(owner, text);
            }
            Frame::Method(method) => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.methods.push(method);
                }
            }
            Frame::Property(property) => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.properties.push(property);
                }
            }
            Frame::Accessor(kind, accessor) => {
                if let Some(Frame::Property(property)) = self.stack.last_mut() {
                    let slot = match kind {
                        AccessorKind::Get => &mut property.get,
                        AccessorKind::Set => &mut property.set,
                    };
                    slot.get_or_insert(accessor);
                }
            }
            Frame::Unit | Frame::Implementation | Frame::Other => {}
        }
    }

    fn take_capture(&mut self) -> String {
        self.capture
            .take()
            .map(Capture::into_string)
            .unwrap_or_default()
    }

    fn set_declaration(&mut self, text: String) {
        match self.stack.last_mut() {
            Some(Frame::Unit) => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.declaration = text;
                    self.has_declaration = true;
                }
            }
            Some(Frame::Method(fragment) | Frame::Accessor(_, fragment)) => {
                fragment.declaration = Some(text);
            }
            Some(Frame::Property(property)) => property.declaration = Some(text),
            _ => {}
        }
    }

    fn set_implementation(&mut self, owner: Option<usize>, text: String) {
        let body = Some(text).filter(|t| !t.trim().is_empty());
        match owner.and_then(|idx| self.stack.get_mut(idx)) {
            Some(Frame::Unit) => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.implementation = body;
                }
            }
            Some(Frame::Method(fragment) | Frame::Accessor(_, fragment)) => {
                fragment.implementation = body;
            }
            _ => {}
        }
    }

    fn finish(self) -> Result<RawUnit, SourceError> {
        let tag = String::from_utf8_lossy(self.unit_tag()).into_owned();
        let unit = self.unit.ok_or_else(|| SourceError::missing_element(tag))?;
        if !self.has_declaration {
            return Err(SourceError::missing_element("Declaration"));
        }
        Ok(unit)
    }
}

fn name_attribute(e: &BytesStart<'_>) -> Result<Option<String>, SourceError> {
    let attr = e
        .try_get_attribute(xml::NAME_ATTR)
        .map_err(|e| SourceError::xml(format!("Attribute error: {e}")))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| SourceError::xml(format!("Attribute value error: {e}")))
    })
    .transpose()
    .map(|name| name.filter(|n| !n.trim().is_empty()))
}

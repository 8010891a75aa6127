//! Domain constants: TwinCAT file extensions and Structured Text keywords.

/// Extension of function block / program / function sources.
pub const POU_EXTENSION: &str = "TcPOU";

/// Extension of data type sources.
pub const DUT_EXTENSION: &str = "TcDUT";

/// Extension of interface sources.
pub const ITF_EXTENSION: &str = "TcIO";

/// All extensions the loader treats as sources (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[POU_EXTENSION, DUT_EXTENSION, ITF_EXTENSION];

/// Access modifier keywords, in the order they are tried.
pub const ACCESS_MODIFIERS: &[&str] = &["PRIVATE", "PROTECTED", "PUBLIC", "INTERNAL"];

/// Words that may follow a `VAR*` header on the same line.
pub const VAR_QUALIFIERS: &[&str] = &["PERSISTENT", "CONSTANT", "RETAIN", "NON_RETAIN"];

/// Words that can appear between a unit keyword and the unit's name.
pub const HEADER_MODIFIERS: &[&str] = &[
    "PRIVATE",
    "PROTECTED",
    "PUBLIC",
    "INTERNAL",
    "ABSTRACT",
    "FINAL",
];

/// Documentation tags recognized without an `@` prefix at the start of a comment.
pub const BARE_DOC_TAGS: &[&str] = &["brief", "details", "usage", "returns", "return"];

/// XML element names inside a `TcPlcObject` container.
pub mod xml {
    pub const POU: &[u8] = b"POU";
    pub const DUT: &[u8] = b"DUT";
    pub const ITF: &[u8] = b"Itf";
    pub const METHOD: &[u8] = b"Method";
    pub const PROPERTY: &[u8] = b"Property";
    pub const GET: &[u8] = b"Get";
    pub const SET: &[u8] = b"Set";
    pub const DECLARATION: &[u8] = b"Declaration";
    pub const IMPLEMENTATION: &[u8] = b"Implementation";
    pub const ST: &[u8] = b"ST";
    pub const NAME_ATTR: &[u8] = b"Name";
}

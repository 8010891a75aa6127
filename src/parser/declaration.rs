//! Declaration field extractors.
//!
//! Every extractor is a pure, total function: any string in, a structured
//! value out. Each one has two entry points, one taking a plain `&str` and
//! one (`*_in`) taking a [`MaskedText`] so a caller running several
//! extractors over the same declaration computes the comment mask once.
//!
//! Keyword scanning always runs on the structural view (comments and string
//! contents blanked). Offsets in that view are valid in the original text,
//! which is where returned names, keywords and bodies are sliced from.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use text_size::{TextRange, TextSize};

use super::comments::MaskedText;
use crate::base::constants::{ACCESS_MODIFIERS, HEADER_MODIFIERS, VAR_QUALIFIERS};
use crate::base::text_utils::{is_dotted_identifier, is_identifier, is_keyword};

// ============================================================================
// PATTERNS
// ============================================================================

static VAR_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bVAR(?:_[A-Z0-9_]+)?\b").expect("valid regex"));

static END_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bEND_VAR\b").expect("valid regex"));

static VAR_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    let words = VAR_QUALIFIERS.join("|");
    Regex::new(&format!(r"(?i)^[ \t]*\b({words})\b")).expect("valid regex")
});

static EXTENDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bEXTENDS\s+([\w.]+(?:\s*,\s*[\w.]+)*)").expect("valid regex")
});

static IMPLEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bIMPLEMENTS\s+([\w.]+(?:\s*,\s*[\w.]+)*)").expect("valid regex")
});

static ACCESS_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    let words = ACCESS_MODIFIERS.join("|");
    Regex::new(&format!(r"(?i)\b({words})\b")).expect("valid regex")
});

static ABSTRACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bABSTRACT\b").expect("valid regex"));

static UNIT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(FUNCTION_BLOCK|PROGRAM|FUNCTION|INTERFACE|METHOD|PROPERTY|TYPE)\b")
        .expect("valid regex")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

static TYPE_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(STRUCT|UNION)\b").expect("valid regex"));

const LIST_KEYWORDS: &[&str] = &["EXTENDS", "IMPLEMENTS"];

// ============================================================================
// TYPES
// ============================================================================

/// One `VAR* ... END_VAR` section of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VarBlock {
    /// Block keyword as written, e.g. `VAR_INPUT`
    pub kind: String,
    /// Qualifier words as written, e.g. `PERSISTENT`; empty when absent
    pub qualifier: String,
    /// Original text between the header line and `END_VAR`
    pub body: String,
    /// Range of the whole block, header and terminator included
    pub range: TextRange,
}

/// Visibility keyword of a unit or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AccessModifier {
    Private,
    Protected,
    Public,
    Internal,
}

impl AccessModifier {
    /// Parse a keyword, ignoring case.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "PRIVATE" => Some(Self::Private),
            "PROTECTED" => Some(Self::Protected),
            "PUBLIC" => Some(Self::Public),
            "INTERNAL" => Some(Self::Internal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
            Self::Public => "PUBLIC",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword that opens a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnitKeyword {
    FunctionBlock,
    Program,
    Function,
    Interface,
    Method,
    Property,
    Type,
}

impl UnitKeyword {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "FUNCTION_BLOCK" => Some(Self::FunctionBlock),
            "PROGRAM" => Some(Self::Program),
            "FUNCTION" => Some(Self::Function),
            "INTERFACE" => Some(Self::Interface),
            "METHOD" => Some(Self::Method),
            "PROPERTY" => Some(Self::Property),
            "TYPE" => Some(Self::Type),
            _ => None,
        }
    }
}

/// The first line of a declaration: `METHOD PRIVATE Foo : BOOL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationHeader {
    pub keyword: UnitKeyword,
    /// First identifier after the keyword that is not a modifier
    pub name: Option<String>,
    /// Text after `:` on the header line (return type, property type, or
    /// the aliased type of a `TYPE`), without a trailing `;`
    pub declared_type: Option<String>,
}

/// Shape of a `TYPE ... END_TYPE` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeBodyKind {
    Struct,
    Union,
    Enum,
    Alias,
}

// ============================================================================
// VARIABLE BLOCKS
// ============================================================================

/// Extract all variable blocks of a declaration, in source order.
pub fn var_blocks(decl: &str) -> Vec<VarBlock> {
    var_blocks_in(&MaskedText::new(decl))
}

pub fn var_blocks_in(text: &MaskedText<'_>) -> Vec<VarBlock> {
    let structural = text.structural();
    let source = text.source();

    let headers: Vec<_> = VAR_HEADER
        .find_iter(structural)
        .filter(|m| is_block_header(structural, m))
        .collect();
    let ends: Vec<_> = END_VAR.find_iter(structural).collect();

    let mut blocks = Vec::new();
    let mut next_end = 0;
    for (idx, header) in headers.iter().enumerate() {
        let limit = headers
            .get(idx + 1)
            .map_or(structural.len(), |next| next.start());

        while next_end < ends.len() && ends[next_end].start() < header.end() {
            next_end += 1;
        }
        let Some(end) = ends.get(next_end).filter(|end| end.start() < limit) else {
            // unterminated: a new header or end of input came first
            continue;
        };
        next_end += 1;

        let mut body_start = header.end();
        let mut qualifiers = Vec::new();
        while let Some(word) = VAR_QUALIFIER
            .captures(&structural[body_start..end.start()])
            .and_then(|caps| caps.get(1))
        {
            qualifiers.push(&source[body_start + word.start()..body_start + word.end()]);
            body_start += word.end();
        }

        let body_start = body_offset(text, body_start, end.start());
        blocks.push(VarBlock {
            kind: source[header.range()].to_string(),
            qualifier: qualifiers.join(" "),
            body: source[body_start..end.start()].trim_end().to_string(),
            range: text_range(header.start(), end.end()),
        });
    }
    blocks
}

/// A `VAR*` keyword opens a block only at the start of a line, and only
/// when it is not itself a variable (`var_count : INT;`). `Var_Base` after
/// `EXTENDS` is a name.
fn is_block_header(structural: &str, found: &regex::Match<'_>) -> bool {
    let line_start = structural[..found.start()]
        .rfind('\n')
        .map_or(0, |nl| nl + 1);
    structural[line_start..found.start()].trim().is_empty()
        && !followed_by_colon(structural, found.end())
}

fn followed_by_colon(text: &str, offset: usize) -> bool {
    text[offset..].trim_start().starts_with(':')
}

/// Start of a block body: past the rest of the header line when that holds
/// nothing but whitespace and comments, else past the leading blanks.
fn body_offset(text: &MaskedText<'_>, from: usize, to: usize) -> usize {
    let rest = &text.structural()[from..to];
    let line_end = rest
        .match_indices('\n')
        .map(|(idx, _)| idx)
        .find(|&idx| !text.mask().in_comment(text_range(from + idx, from + idx + 1)));
    match line_end {
        Some(idx) if rest[..idx].trim().is_empty() => from + idx + 1,
        _ => from + rest.len() - rest.trim_start_matches([' ', '\t']).len(),
    }
}

// ============================================================================
// INHERITANCE
// ============================================================================

/// Names after `EXTENDS`, in the order written.
pub fn extends(decl: &str) -> Vec<String> {
    extends_in(&MaskedText::new(decl))
}

pub fn extends_in(text: &MaskedText<'_>) -> Vec<String> {
    name_list(&EXTENDS, text)
}

/// Names after `IMPLEMENTS`, in the order written.
pub fn implements(decl: &str) -> Vec<String> {
    implements_in(&MaskedText::new(decl))
}

pub fn implements_in(text: &MaskedText<'_>) -> Vec<String> {
    name_list(&IMPLEMENTS, text)
}

fn name_list(pattern: &Regex, text: &MaskedText<'_>) -> Vec<String> {
    // sliced from the structural view so a comment inside the list drops out
    let Some(list) = pattern.captures(text.structural()).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    list.as_str()
        .split(',')
        .map(str::trim)
        .filter(|name| is_dotted_identifier(name) && !is_keyword(name, LIST_KEYWORDS))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// First access modifier keyword, in its original casing.
///
/// When several modifiers are present the first one wins.
pub fn access_modifier(decl: &str) -> Option<String> {
    access_modifier_in(&MaskedText::new(decl))
}

pub fn access_modifier_in(text: &MaskedText<'_>) -> Option<String> {
    ACCESS_MODIFIER
        .find(text.structural())
        .map(|m| text.source()[m.range()].to_string())
}

/// True if the standalone word `ABSTRACT` appears outside comments.
pub fn is_abstract(decl: &str) -> bool {
    is_abstract_in(&MaskedText::new(decl))
}

pub fn is_abstract_in(text: &MaskedText<'_>) -> bool {
    ABSTRACT.is_match(text.structural())
}

// ============================================================================
// HEADER
// ============================================================================

/// Parse the opening keyword, name and declared type of a declaration.
pub fn header(decl: &str) -> Option<DeclarationHeader> {
    header_in(&MaskedText::new(decl))
}

pub fn header_in(text: &MaskedText<'_>) -> Option<DeclarationHeader> {
    let structural = text.structural();
    let found = UNIT_KEYWORD.captures(structural)?.get(1)?;
    let keyword = UnitKeyword::parse(found.as_str())?;

    let line_end = structural[found.end()..]
        .find('\n')
        .map_or(structural.len(), |idx| found.end() + idx);
    let colon = structural[found.end()..line_end]
        .find(':')
        .map(|idx| found.end() + idx);
    let names_end = colon.unwrap_or(line_end);

    let name = WORD
        .find_iter(&structural[found.end()..names_end])
        .map(|word| word.as_str())
        .find(|word| !is_keyword(word, HEADER_MODIFIERS))
        .filter(|word| is_identifier(word))
        .map(str::to_string);

    let declared_type = colon
        .map(|colon| structural[colon + 1..line_end].trim().trim_end_matches(';').trim())
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);

    Some(DeclarationHeader {
        keyword,
        name,
        declared_type,
    })
}

/// Classify the body of a `TYPE` declaration.
pub fn type_body_kind(decl: &str) -> TypeBodyKind {
    type_body_kind_in(&MaskedText::new(decl))
}

pub fn type_body_kind_in(text: &MaskedText<'_>) -> TypeBodyKind {
    let structural = text.structural();
    let after_colon = UNIT_KEYWORD
        .find(structural)
        .and_then(|m| structural[m.end()..].find(':').map(|c| m.end() + c + 1));
    let Some(start) = after_colon else {
        return TypeBodyKind::Alias;
    };

    let body = structural[start..].trim_start();
    if body.starts_with('(') {
        return TypeBodyKind::Enum;
    }
    let first_word: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if first_word.eq_ignore_ascii_case("STRUCT") {
        TypeBodyKind::Struct
    } else if first_word.eq_ignore_ascii_case("UNION") {
        TypeBodyKind::Union
    } else {
        TypeBodyKind::Alias
    }
}

// ============================================================================
// REGIONS
// ============================================================================

/// The part of a declaration before its first variable block (or before a
/// `STRUCT`/`UNION` body).
///
/// Type-level extractors run on this region so that a variable named
/// `Public` or an `EXTENDS` inside a struct member never leaks into the
/// unit's own fields.
pub fn header_region(text: &MaskedText<'_>) -> TextRange {
    let structural = text.structural();
    let first_block = VAR_HEADER
        .find_iter(structural)
        .find(|m| is_block_header(structural, m))
        .map(|m| m.start());
    let type_body = TYPE_BODY.find(structural).map(|m| m.start());

    let end = [first_block, type_body]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(structural.len());
    text_range(0, end)
}

pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::new(start as u32), TextSize::new(end as u32))
}

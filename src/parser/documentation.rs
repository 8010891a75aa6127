//! Documentation comment extraction.
//!
//! Two conventions are recognized and may be mixed in one declaration:
//!
//! ```text
//! (*details Controls and checks all supplies *)
//!
//! (*
//!   @brief Configures the alarm.
//!   @returns TRUE when the alarm was created.
//! *)
//!
//! // @usage Call once per cycle
//! //        before Execute().
//! ```
//!
//! A block comment starting with a known tag word is a bare tag. Inside any
//! comment, `@word` starts a tag. Lines that follow a tag belong to it until
//! the next tag or the end of the comment (consecutive line comments count
//! as one comment).

use indexmap::IndexMap;

use super::comments::MaskedText;
use super::declaration::header_region;
use crate::base::constants::BARE_DOC_TAGS;
use crate::base::text_utils::{is_keyword, is_word_character};

/// Tagged documentation attached to a unit, method or property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Documentation {
    pub brief: Option<String>,
    pub details: Option<String>,
    pub usage: Option<String>,
    pub returns: Option<String>,
    /// Any other `@tag`, keyed by lower-case tag name, in first-seen order
    pub custom: IndexMap<String, String>,
}

impl Documentation {
    pub fn is_empty(&self) -> bool {
        self.brief.is_none()
            && self.details.is_none()
            && self.usage.is_none()
            && self.returns.is_none()
            && self.custom.is_empty()
    }

    /// Text of a tag by name, known or custom.
    pub fn tag(&self, name: &str) -> Option<&str> {
        match canonical_tag(name).as_str() {
            "brief" => self.brief.as_deref(),
            "details" => self.details.as_deref(),
            "usage" => self.usage.as_deref(),
            "returns" => self.returns.as_deref(),
            other => self.custom.get(other).map(String::as_str),
        }
    }

    fn push(&mut self, tag: &str, text: String) {
        let slot = match tag {
            "brief" => &mut self.brief,
            "details" => &mut self.details,
            "usage" => &mut self.usage,
            "returns" => &mut self.returns,
            other => {
                let entry = self.custom.entry(other.to_string()).or_default();
                append(entry, &text);
                return;
            }
        };
        if text.is_empty() {
            return;
        }
        match slot {
            Some(existing) => append(existing, &text),
            None => *slot = Some(text),
        }
    }
}

fn append(existing: &mut String, text: &str) {
    if existing.is_empty() {
        existing.push_str(text);
    } else if !text.is_empty() {
        existing.push('\n');
        existing.push_str(text);
    }
}

fn canonical_tag(tag: &str) -> String {
    let tag = tag.to_lowercase();
    if tag == "return" {
        "returns".to_string()
    } else {
        tag
    }
}

/// Parse a single comment, delimiters included.
pub fn parse_doc_comment(comment: &str) -> Option<Documentation> {
    parse_documentation([comment])
}

/// Parse a sequence of comments as one documentation record.
///
/// Returns `None` when no tag is found.
pub fn parse_documentation<'a>(
    comments: impl IntoIterator<Item = &'a str>,
) -> Option<Documentation> {
    let mut builder = DocBuilder::default();
    for comment in comments {
        if let Some(body) = comment.strip_prefix("(*") {
            builder.finish();
            let body = body.strip_suffix("*)").unwrap_or(body);
            builder.block_comment(body);
            builder.finish();
        } else if let Some(body) = comment.strip_prefix("//") {
            builder.line(body.trim_start_matches('/'));
        }
    }
    builder.finish();

    Some(builder.doc).filter(|doc| !doc.is_empty())
}

/// Documentation of a declaration: every comment in its header region,
/// i.e. before the first variable block.
pub fn documentation_for(decl: &str) -> Option<Documentation> {
    documentation_in(&MaskedText::new(decl))
}

pub fn documentation_in(text: &MaskedText<'_>) -> Option<Documentation> {
    parse_documentation(text.comments_in(header_region(text)))
}

#[derive(Default)]
struct DocBuilder {
    doc: Documentation,
    current: Option<(String, Vec<String>)>,
}

impl DocBuilder {
    fn block_comment(&mut self, body: &str) {
        let (word, rest) = split_word(body.trim_start());
        let remaining = if is_keyword(word, BARE_DOC_TAGS) && is_tag_end(rest) {
            let (first, tail) = rest.split_once('\n').unwrap_or((rest, ""));
            self.start(word, first);
            tail
        } else {
            body
        };
        for line in remaining.lines() {
            // ` * @brief ...` style decoration
            self.line(line.trim_start().trim_start_matches('*'));
        }
    }

    fn line(&mut self, line: &str) {
        let line = line.trim();
        if let Some(tagged) = line.strip_prefix('@') {
            let (tag, rest) = split_word(tagged);
            if !tag.is_empty() {
                self.finish();
                self.start(tag, rest);
                return;
            }
        }
        if let Some((_, lines)) = &mut self.current {
            lines.push(line.to_string());
        }
    }

    fn start(&mut self, tag: &str, first_line: &str) {
        let first_line = first_line.trim().trim_start_matches(':').trim();
        self.current = Some((canonical_tag(tag), vec![first_line.to_string()]));
    }

    fn finish(&mut self) {
        if let Some((tag, mut lines)) = self.current.take() {
            while lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
            let leading = lines.iter().take_while(|l| l.is_empty()).count();
            self.doc.push(&tag, lines[leading..].join("\n"));
        }
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let len = text
        .find(|c: char| !is_word_character(c))
        .unwrap_or(text.len());
    text.split_at(len)
}

/// A bare tag word must be followed by whitespace, `:`, or nothing.
fn is_tag_end(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| c.is_whitespace() || c == ':')
}

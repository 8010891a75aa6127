//! Comment detection and stripping.
//!
//! Comments are found once per declaration and kept as a sorted list of
//! excluded ranges. Stripping blanks those ranges instead of removing them,
//! so a byte offset found in the stripped text points at the same place in
//! the original text.

use text_size::{TextRange, TextSize};

use super::lexer::{Lexer, Token, TokenKind};
use crate::base::text_utils::blank_range;

/// Comment and string-literal spans of one piece of source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMask {
    comments: Vec<TextRange>,
    strings: Vec<TextRange>,
}

impl SourceMask {
    pub fn new(text: &str) -> Self {
        let mut mask = Self::default();
        for token in Lexer::new(text) {
            match token.kind {
                TokenKind::BlockComment | TokenKind::LineComment => {
                    mask.comments.push(token.range)
                }
                TokenKind::StringLiteral => mask.strings.push(string_body(&token)),
                TokenKind::Text => {}
            }
        }
        mask
    }

    /// Comment ranges in source order.
    pub fn comments(&self) -> &[TextRange] {
        &self.comments
    }

    /// True if `range` overlaps any comment.
    pub fn in_comment(&self, range: TextRange) -> bool {
        let idx = self
            .comments
            .partition_point(|comment| comment.end() <= range.start());
        self.comments
            .get(idx)
            .is_some_and(|comment| {
                comment.start() < range.end()
                    || (range.is_empty() && comment.contains(range.start()))
            })
    }

    /// The mask of `text[..end]`; spans crossing `end` are clipped.
    pub fn truncate(&self, end: TextSize) -> SourceMask {
        let clip = |spans: &[TextRange]| -> Vec<TextRange> {
            spans
                .iter()
                .filter(|r| r.start() < end)
                .map(|r| TextRange::new(r.start(), r.end().min(end)))
                .collect()
        };
        SourceMask {
            comments: clip(&self.comments),
            strings: clip(&self.strings),
        }
    }

    /// Copy of `text` with every comment blanked.
    pub fn strip(&self, text: &str) -> String {
        blank_spans(text, self.comments.iter().copied())
    }

    /// Copy of `text` with comments and string literal contents blanked;
    /// the quotes themselves are kept.
    ///
    /// Keyword scanning runs on this view so that `'END_VAR'` in an initial
    /// value is not mistaken for a terminator.
    pub fn structural(&self, text: &str) -> String {
        let mut spans: Vec<TextRange> = self.comments.clone();
        spans.extend(self.strings.iter().copied());
        spans.sort_by_key(|r| r.start());
        blank_spans(text, spans.into_iter())
    }
}

/// Range of a string literal without its quotes.
fn string_body(token: &Token<'_>) -> TextRange {
    let open = TextSize::of(&token.text[..1]);
    let closed = token.text.len() > 1 && token.text.ends_with(&token.text[..1]);
    let close = if closed { open } else { TextSize::new(0) };
    TextRange::new(token.range.start() + open, token.range.end() - close)
}

fn blank_spans(text: &str, spans: impl Iterator<Item = TextRange>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for span in spans {
        let start = usize::from(span.start());
        let end = usize::from(span.end());
        out.push_str(&text[cursor..start]);
        blank_range(&mut out, &text[start..end]);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Blank all block and line comments in `text`, keeping its byte length.
///
/// An unterminated `(*` blanks everything up to end of input.
pub fn strip_comments(text: &str) -> String {
    SourceMask::new(text).strip(text)
}

/// Text of every comment in `text`, in source order, delimiters included.
pub fn comment_texts(text: &str) -> Vec<&str> {
    Lexer::new(text)
        .filter(|t| t.kind.is_comment())
        .map(|t| t.text)
        .collect()
}

/// A declaration together with its mask and structural view.
///
/// Built once per declaration and shared by every extractor that runs on it.
#[derive(Debug, Clone)]
pub struct MaskedText<'a> {
    source: &'a str,
    mask: SourceMask,
    structural: String,
}

impl<'a> MaskedText<'a> {
    pub fn new(source: &'a str) -> Self {
        let mask = SourceMask::new(source);
        let structural = mask.structural(source);
        Self {
            source,
            mask,
            structural,
        }
    }

    /// The text exactly as written.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The text with comments and string contents blanked; same byte length
    /// as [`MaskedText::source`].
    pub fn structural(&self) -> &str {
        &self.structural
    }

    pub fn mask(&self) -> &SourceMask {
        &self.mask
    }

    /// The first `range.end()` bytes, reusing this text's mask.
    pub fn prefix(&self, range: TextRange) -> MaskedText<'a> {
        let end = usize::from(range.end()).min(self.source.len());
        MaskedText {
            source: &self.source[..end],
            mask: self.mask.truncate(range.end()),
            structural: self.structural[..end].to_string(),
        }
    }

    /// Comments whose start lies in `range`, as written.
    pub fn comments_in(&self, range: TextRange) -> impl Iterator<Item = &'a str> + '_ {
        self.mask
            .comments()
            .iter()
            .filter(move |c| range.contains(c.start()))
            .map(|c| &self.source[*c])
    }
}

//! Logos-based trivia lexer for Structured Text declarations
//!
//! The lexer does not tokenize the language. It only splits text into
//! comments, string literals and everything else, which is all the
//! declaration extractors need to know before keyword scanning.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Coarse classification of a span of declaration text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(* ... *)`, possibly unterminated
    BlockComment,
    /// `// ...` up to (not including) the line break
    LineComment,
    /// `'...'` or `"..."`, possibly unterminated at end of line
    StringLiteral,
    /// Anything else
    Text,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::BlockComment | TokenKind::LineComment)
    }
}

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );

        let kind = match logos_token {
            Ok(LogosToken::BlockComment) => TokenKind::BlockComment,
            Ok(LogosToken::LineComment) => TokenKind::LineComment,
            Ok(LogosToken::StringLiteral) => TokenKind::StringLiteral,
            Ok(LogosToken::Text | LogosToken::Punct) | Err(()) => TokenKind::Text,
        };

        Some(Token { kind, text, range })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // The first `*)` closes the comment; nesting is not supported.
    #[token("(*", block_comment)]
    BlockComment,

    #[token("//", line_comment)]
    LineComment,

    #[token("'", |lex| quoted(lex, '\''))]
    #[token("\"", |lex| quoted(lex, '"'))]
    StringLiteral,

    #[regex(r#"[^(/'"]+"#)]
    Text,

    #[token("(")]
    #[token("/")]
    Punct,
}

fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) {
    let rest = lex.remainder();
    let len = rest.find("*)").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
}

fn line_comment(lex: &mut logos::Lexer<'_, LogosToken>) {
    let rest = lex.remainder();
    let len = rest.find(['\r', '\n']).unwrap_or(rest.len());
    lex.bump(len);
}

/// `$` escapes the next character (`'It$'s'`, `$$`).
fn quoted(lex: &mut logos::Lexer<'_, LogosToken>, quote: char) {
    let rest = lex.remainder();
    let mut len = rest.len();
    let mut chars = rest.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == '$' {
            chars.next();
        } else if c == quote {
            len = idx + c.len_utf8();
            break;
        } else if c == '\n' || c == '\r' {
            len = idx;
            break;
        }
    }
    lex.bump(len);
}

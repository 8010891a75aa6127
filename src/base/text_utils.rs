//! Text helpers for Structured Text identifiers and keywords.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Check whether `s` is a single identifier (`FB_Base`, `_internal`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(is_word_character)
        }
        _ => false,
    }
}

/// Check whether `s` is an identifier or a dotted path of identifiers
/// (`__System.IQueryInterface`).
pub fn is_dotted_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// Check whether `word` equals any of `keywords`, ignoring ASCII case.
pub fn is_keyword(word: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Append `text` to `out` with every character except line breaks replaced
/// by spaces, one space per UTF-8 byte.
///
/// The byte length of `text` is unchanged, so offsets computed against the
/// original string stay valid against the blanked one.
pub(crate) fn blank_range(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '\n' || c == '\r' {
            out.push(c);
        } else {
            for _ in 0..c.len_utf8() {
                out.push(' ');
            }
        }
    }
}

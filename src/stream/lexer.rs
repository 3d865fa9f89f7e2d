//! Reference tokenizer.
//!
//! Turns C/C++ source text into a [`TokenStream`] with the shape the
//! analyzer expects: access labels are single tokens (`public:`), scope
//! resolution is one token (`::`), `~` stands alone, and multi-character
//! operators are kept whole. It performs no preprocessing and no typedef
//! expansion; it exists so tests and demos can feed the analyzer without a
//! full front-end, and `sizeof` is preserved so the same stream doubles as
//! the raw view.

use phf::phf_set;

use crate::error::Result;
use crate::stream::TokenStream;

/// Identifiers merged with a directly following `:` into one label token.
static ACCESS_LABELS: phf::Set<&'static str> = phf_set! {
    "public", "protected", "private", "__published",
};

/// Two-character operators kept as single tokens.
static TWO_CHAR_OPS: phf::Set<&'static str> = phf_set! {
    "::", "<<", ">>", "++", "--", "->", "==", "!=", "<=", ">=",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "&&", "||",
};

/// Three-character operators kept as single tokens.
static THREE_CHAR_OPS: phf::Set<&'static str> = phf_set! {
    "<<=", ">>=", "->*", "...",
};

/// Tokenize one source buffer as file index 0.
pub fn tokenize(source: &str) -> Result<TokenStream> {
    tokenize_parts(&[source])
}

/// Tokenize several buffers into one stream; part `i` gets file index `i`.
/// Index 0 is the primary translation unit, later parts model included
/// headers.
pub fn tokenize_parts(parts: &[&str]) -> Result<TokenStream> {
    let mut stream = TokenStream::new();
    for (file_index, source) in parts.iter().enumerate() {
        scan(&mut stream, source, file_index as u32);
    }
    stream.link_brackets()?;
    Ok(stream)
}

fn scan(stream: &mut TokenStream, source: &str, file_index: u32) {
    let bytes = source.as_bytes();
    let mut i = 0;
    let mut line_start = true;
    while i < bytes.len() {
        let c = bytes[i];
        if c == b'\n' {
            line_start = true;
            i += 1;
            continue;
        }
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        // Preprocessor lines are not part of the token stream.
        if line_start && c == b'#' {
            while i < bytes.len() && bytes[i] != b'\n' {
                if bytes[i] == b'\\' && i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    i += 1;
                }
                i += 1;
            }
            continue;
        }
        line_start = false;
        // Comments.
        if c == b'/' && i + 1 < bytes.len() {
            if bytes[i + 1] == b'/' {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            if bytes[i + 1] == b'*' {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                continue;
            }
        }
        // Identifiers and keywords.
        if c.is_ascii_alphabetic() || c == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &source[start..i];
            let label = ACCESS_LABELS.contains(word)
                && bytes.get(i) == Some(&b':')
                && bytes.get(i + 1) != Some(&b':');
            if label {
                stream.push(format!("{word}:"), file_index);
                i += 1;
            } else {
                stream.push(word, file_index);
            }
            continue;
        }
        // Numeric literals (loose: covers hex, suffixes and floats).
        if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.') {
                i += 1;
            }
            stream.push(&source[start..i], file_index);
            continue;
        }
        // String and character literals.
        if c == b'"' || c == b'\'' {
            let quote = c;
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i] != quote {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            stream.push(&source[start..i], file_index);
            continue;
        }
        // Anything non-ASCII outside literals is dropped.
        if !c.is_ascii() {
            i += 1;
            continue;
        }
        // Operators and punctuation, longest first.
        if let Some(op) = source.get(i..i + 3).filter(|op| THREE_CHAR_OPS.contains(*op)) {
            stream.push(op, file_index);
            i += 3;
            continue;
        }
        if let Some(op) = source.get(i..i + 2).filter(|op| TWO_CHAR_OPS.contains(*op)) {
            stream.push(op, file_index);
            i += 2;
            continue;
        }
        stream.push(&source[i..i + 1], file_index);
        i += 1;
    }
}

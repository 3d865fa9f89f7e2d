//! Token stream layer.
//!
//! The analyzer consumes a pre-tokenized view of the translation unit:
//! a doubly navigable sequence of immutable tokens with pre-computed
//! bracket links, a file index and name/number/type flags. Production
//! tokenization (preprocessing, typedef expansion) is an external
//! collaborator; [`lexer`] provides a reference tokenizer good enough to
//! feed the analyzer in tests and demos.

pub mod lexer;
pub mod pattern;
pub mod token;

pub use lexer::{tokenize, tokenize_parts};
pub use pattern::{find_match, matches};
pub use token::{Tok, TokenStream};

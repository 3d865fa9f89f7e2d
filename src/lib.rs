//! classcheck - class-semantics analysis for C/C++ token streams.
//!
//! This library inspects C/C++ translation units, already tokenized by an
//! external front-end, and reports a fixed catalog of defects tied to the
//! semantics of classes, structs and namespaces: constructor completeness,
//! assignment-operator shape, destructor virtuality, member-function
//! const-correctness and misuse of byte-level memory primitives on
//! non-POD aggregates.
//!
//! # Architecture
//!
//! The library is organized into three layers:
//!
//! - **Stream Layer** ([`stream`]): read-only token cursors, the
//!   pattern/glob matcher, and a reference tokenizer for tests and demos
//! - **Symbol Layer** ([`symbols`]): scope discovery, member-variable
//!   extraction, argument-list equivalence and declaration-to-definition
//!   binding
//! - **Check Layer** ([`checks`]): the defect recognizers, each a small
//!   pass over the symbol database plus localized token traversal
//!
//! Diagnostics are structured records delivered to a caller-supplied
//! [`DiagnosticSink`]; formatting and routing stay with the host tool.
//!
//! # Quick Start
//!
//! ```
//! use classcheck::{run_raw_checks, run_simplified_checks, tokenize, Diagnostic, Settings};
//!
//! let stream = tokenize("class A { int x; public: A(); }; A::A() { }")?;
//! let settings = Settings::all();
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! run_simplified_checks(&stream, &settings, &mut diagnostics);
//! run_raw_checks(&stream, &settings, &mut diagnostics);
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].id.as_str(), "uninitVar");
//! # Ok::<(), classcheck::CheckError>(())
//! ```
//!
//! # Raw and simplified views
//!
//! Production front-ends maintain two token views of the same source: a
//! raw view and a simplified one (typedefs expanded, redundant punctuation
//! removed). [`run_raw_checks`] covers the single pass that needs the raw
//! view - the memory-primitive check keys on `sizeof`, which simplification
//! erases - while [`run_simplified_checks`] runs everything else. The
//! driver picks the view; the reference [`tokenize`] produces one stream
//! that serves as both in tests.

pub mod checks;
pub mod diagnostics;
pub mod error;
pub mod settings;
pub mod stream;
pub mod symbols;

pub use checks::{run_raw_checks, run_simplified_checks, ClassAnalyzer};
pub use diagnostics::{diagnostics_to_json, CheckId, Diagnostic, DiagnosticSink, Severity};
pub use error::{CheckError, Result};
pub use settings::Settings;
pub use stream::{tokenize, tokenize_parts, Tok, TokenStream};
pub use symbols::{Access, Func, FuncKind, Scope, SymbolDatabase, Var};

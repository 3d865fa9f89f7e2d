//! Symbol layer.
//!
//! Bridges the flat token stream to a structured view of nested scopes:
//! discovers every class, struct and namespace, extracts member variables,
//! classifies member functions and binds each declaration to its (possibly
//! out-of-line, possibly qualified, possibly overloaded) definition.

pub mod args;
pub mod database;
pub mod types;
pub mod vars;
pub mod virtuals;

pub use args::args_match;
pub use database::SymbolDatabase;
pub use types::{Access, Func, FuncKind, Scope, ScopeId, Var};
pub use virtuals::is_virtual_in_base;

//! Symbol data model: scopes, member functions and member variables.

use serde::{Deserialize, Serialize};

use crate::stream::Tok;

/// Access control of a class section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// A member variable.
///
/// Initialization status is not stored here; the constructor pass threads
/// an explicit init-state through propagation instead, so variables stay
/// immutable after database construction.
#[derive(Debug, Clone)]
pub struct Var {
    /// Variable name.
    pub name: String,
    /// Declared in a private section.
    pub is_private: bool,
    /// Declared `mutable`.
    pub is_mutable: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// Non-built-in (class or unknown) type.
    pub is_class: bool,
}

/// What kind of member function this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuncKind {
    Constructor,
    CopyConstructor,
    OperatorEqual,
    Destructor,
    Function,
}

/// A member function.
#[derive(Debug, Clone)]
pub struct Func<'a> {
    /// Name token in the class body.
    pub decl: Tok<'a>,
    /// Name token at the implementation site; equals `decl` when inline.
    pub def: Tok<'a>,
    /// Section the declaration appeared in.
    pub access: Access,
    /// An implementation was found.
    pub has_body: bool,
    /// Implementation sits inside the class body.
    pub is_inline: bool,
    /// Trailing `const` qualifier.
    pub is_const: bool,
    /// Declared `virtual`.
    pub is_virtual: bool,
    /// Declared `static`.
    pub is_static: bool,
    /// Declared `friend`.
    pub is_friend: bool,
    /// Operator function; `decl` points at the operator symbol.
    pub is_operator: bool,
    /// Classification.
    pub kind: FuncKind,
}

/// Index of a scope in the database's insertion-ordered scope list.
pub type ScopeId = usize;

/// A class, struct or namespace body.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    /// `namespace` rather than `class`/`struct`.
    pub is_namespace: bool,
    /// Unqualified name.
    pub name: String,
    /// The `class`/`struct`/`namespace` keyword token.
    pub def: Tok<'a>,
    /// Opening `{` of the body.
    pub open_brace: Tok<'a>,
    /// Matching `}`.
    pub close_brace: Tok<'a>,
    /// Count of constructor-kind member functions.
    pub num_constructors: u32,
    /// Member functions in declaration order.
    pub functions: Vec<Func<'a>>,
    /// Member variables in declaration order. Empty for namespaces.
    pub variables: Vec<Var>,
    /// Qualified base names from the inheritance list, e.g. `"A :: B"`.
    pub bases: Vec<String>,
    /// Enclosing scope at the declaration site.
    pub parent: Option<ScopeId>,
    /// Access of the section currently being parsed; ends up at the access
    /// in effect when the close brace was reached.
    pub access: Access,
}

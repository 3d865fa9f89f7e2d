//! Symbol database construction.
//!
//! A single linear pass over the token stream maintains a scope stack,
//! creating a [`Scope`] for every `class`, `struct` and `namespace` and a
//! [`Func`] for every member function declaration. Out-of-line definitions
//! are bound by searching forward from the class body with a scope-path
//! pattern that widens one enclosing scope at a time, validating each
//! candidate with the argument matcher.
//!
//! Construction never fails: malformed constructs are skipped and every
//! walk is bounded by brace links and the stream end.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::stream::{find_match, matches, Tok, TokenStream};
use crate::symbols::args::args_match;
use crate::symbols::types::{Access, Func, FuncKind, Scope, ScopeId};
use crate::symbols::vars::collect_variables;

/// All scopes of one translation unit, in declaration order, with a
/// name-keyed multimap view.
#[derive(Debug)]
pub struct SymbolDatabase<'a> {
    scopes: Vec<Scope<'a>>,
    by_name: FxHashMap<String, Vec<ScopeId>>,
}

impl<'a> SymbolDatabase<'a> {
    /// Build the database for `stream`.
    #[must_use]
    pub fn build(stream: &'a TokenStream) -> Self {
        let mut db = SymbolDatabase {
            scopes: Vec::new(),
            by_name: FxHashMap::default(),
        };
        let mut current: Option<ScopeId> = None;
        let mut cur = stream.first();
        while let Some(tok) = cur {
            if matches(Some(tok), "class|struct|namespace %var% {|:") {
                if let Some(open_brace) = db.begin_scope(tok, &mut current) {
                    cur = open_brace.next();
                    continue;
                }
            } else if let Some(id) = current.filter(|&id| !db.scopes[id].is_namespace) {
                if tok == db.scopes[id].close_brace {
                    current = db.scopes[id].parent;
                } else if tok.text() == "private:" {
                    db.scopes[id].access = Access::Private;
                } else if tok.text() == "protected:" {
                    db.scopes[id].access = Access::Protected;
                } else if tok.text() == "public:" {
                    db.scopes[id].access = Access::Public;
                } else if is_function_head(tok) {
                    cur = db.parse_function(id, tok).and_then(Tok::next);
                    continue;
                }
            }
            cur = tok.next();
        }
        debug!(scopes = db.scopes.len(), "symbol database built");
        db
    }

    /// Scopes in declaration order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope<'a>> {
        self.scopes.iter()
    }

    /// Scope by id.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope<'a> {
        &self.scopes[id]
    }

    /// Ids of all scopes sharing an unqualified name, in declaration order.
    #[must_use]
    pub fn lookup(&self, name: &str) -> &[ScopeId] {
        self.by_name.get(name).map_or(&[], Vec::as_slice)
    }

    /// First class or struct scope with this name, if any.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<&Scope<'a>> {
        self.lookup(name)
            .iter()
            .map(|&id| &self.scopes[id])
            .find(|s| !s.is_namespace)
    }

    /// Parse a scope head at `tok` (`class|struct|namespace Name`); on
    /// success the scope is registered, becomes current, and its open brace
    /// is returned so the caller can resume inside the body.
    fn begin_scope(&mut self, tok: Tok<'a>, current: &mut Option<ScopeId>) -> Option<Tok<'a>> {
        let is_namespace = tok.text() == "namespace";
        let name = tok.text_at(1).to_string();

        // Walk the head for the base list and the opening brace.
        let mut bases = Vec::new();
        let mut cursor = tok.at(2);
        let open_brace = loop {
            let t = cursor?;
            if t.text() == "{" {
                break t;
            }
            let mut t = t;
            if matches(Some(t), ":|, public|protected|private") {
                let mut bt = t.at(2);
                let mut base = String::new();
                while matches(bt, "%var% ::") {
                    let b = bt?;
                    base.push_str(b.text());
                    base.push_str(" :: ");
                    bt = b.at(2);
                }
                let b = bt?;
                base.push_str(b.text());
                bases.push(base);
                t = b;
            }
            cursor = t.next();
        };
        let close_brace = open_brace.link()?;

        let variables = if is_namespace {
            Vec::new()
        } else {
            collect_variables(tok)
        };
        let id = self.scopes.len();
        self.scopes.push(Scope {
            is_namespace,
            name: name.clone(),
            def: tok,
            open_brace,
            close_brace,
            num_constructors: 0,
            functions: Vec::new(),
            variables,
            bases,
            parent: *current,
            access: if tok.text() == "struct" {
                Access::Public
            } else {
                Access::Private
            },
        });
        self.by_name.entry(name).or_default().push(id);
        *current = Some(id);
        Some(open_brace)
    }

    /// Parse one member function starting at its name (or `operator`)
    /// token; returns the token to resume scanning from.
    fn parse_function(&mut self, id: ScopeId, tok: Tok<'a>) -> Option<Tok<'a>> {
        let mut decl = tok;
        let mut is_operator = false;
        let mut kind = FuncKind::Function;

        if tok.text() == "operator" {
            is_operator = true;
            decl = tok.next()?;
            if decl.text() == "=" {
                kind = FuncKind::OperatorEqual;
            }
        } else if tok.text() == self.scopes[id].name {
            if tok.previous().map_or(false, |p| p.text() == "~") {
                kind = FuncKind::Destructor;
            } else if matches(Some(decl), "%var% ( const %var% & %var%| )")
                && decl.text_at(3) == self.scopes[id].name
            {
                kind = FuncKind::CopyConstructor;
            } else {
                kind = FuncKind::Constructor;
            }
        }

        // Scan back over the declaration for modifiers.
        let mut is_virtual = false;
        let mut is_static = false;
        let mut is_friend = false;
        let mut back = tok;
        while let Some(prev) = back.previous() {
            if matches(Some(prev), ";|}|{|public:|protected:|private:") {
                break;
            }
            match prev.text() {
                "virtual" => {
                    is_virtual = true;
                    break;
                }
                "static" => {
                    is_static = true;
                    break;
                }
                "friend" => {
                    is_friend = true;
                    break;
                }
                _ => {}
            }
            back = prev;
        }

        let is_const = decl
            .next()
            .and_then(Tok::link)
            .and_then(Tok::next)
            .map_or(false, |t| t.text() == "const");

        if matches!(kind, FuncKind::Constructor | FuncKind::CopyConstructor) {
            self.scopes[id].num_constructors += 1;
        }

        let mut func = Func {
            decl,
            def: decl,
            access: self.scopes[id].access,
            has_body: false,
            is_inline: false,
            is_const,
            is_virtual,
            is_static,
            is_friend,
            is_operator,
            kind,
        };

        let close_paren = decl.next()?.link()?;
        if matches(Some(close_paren), ") const| ;")
            || matches(Some(close_paren), ") const| = 0 ;")
        {
            // Out-of-line or pure: hunt for the implementation with a
            // widening scope-path pattern.
            let class_pattern = if is_operator {
                format!("operator {} (", decl.text())
            } else {
                format!("{} (", decl.text())
            };

            let mut nest = Some(id);
            let mut class_path = String::new();
            let mut depth = 0u32;
            while !func.has_body {
                let Some(n) = nest else { break };
                class_path = format!("{} :: {}", self.scopes[n].name, class_path);
                let search_pattern = format!("{class_path}{class_pattern}");
                depth += 1;
                nest = self.scopes[n].parent;
                let bound = nest.map(|p| self.scopes[p].close_brace);

                let mut from = Some(self.scopes[id].close_brace);
                while let Some(found) = find_match(from, &search_pattern, bound) {
                    // An unrelated qualified reference; widen instead.
                    if found.previous().map_or(false, |p| p.text() == "::") {
                        break;
                    }
                    // Advance to the function name.
                    let mut name_tok = found;
                    loop {
                        match name_tok.next() {
                            Some(n) if n.text() != "(" => name_tok = n,
                            Some(_) => break,
                            None => return None,
                        }
                    }
                    if matches(name_tok.next().and_then(Tok::link), ") const| {") {
                        if args_match(decl.next()?, name_tok.next()?, &class_path, depth) {
                            func.def = name_tok;
                            func.has_body = true;
                            break;
                        }
                        // Skip the non-matching candidate's body.
                        let mut skip = name_tok;
                        while skip.text() != "{" {
                            skip = skip.next()?;
                        }
                        from = skip.link();
                        continue;
                    }
                    from = Some(name_tok);
                }
            }
            debug!(
                scope = %self.scopes[id].name,
                function = decl.text(),
                has_body = func.has_body,
                "member function recorded"
            );
            self.scopes[id].functions.push(func);
            close_paren.next()
        } else {
            // Inline: the body follows the declaration inside the class.
            func.is_inline = true;
            func.has_body = true;
            self.scopes[id].functions.push(func);
            let mut t = close_paren.next()?;
            while t.text() != "{" {
                t = t.next()?;
            }
            t.link()
        }
    }
}

/// A member function starts at `%var% (` or `operator %any% (` not preceded
/// by `::`, and its closing parenthesis is followed by `const`, `;`, `{`,
/// `=` or `:`.
fn is_function_head(tok: Tok<'_>) -> bool {
    if !(matches(Some(tok), "%var% (") || matches(Some(tok), "operator %any% (")) {
        return false;
    }
    if tok.previous().map_or(false, |p| p.text() == "::") {
        return false;
    }
    let close_paren = if tok.text() == "operator" {
        tok.at(2).and_then(Tok::link)
    } else {
        tok.next().and_then(Tok::link)
    };
    matches(close_paren, ") const| ;|{|=|:")
}

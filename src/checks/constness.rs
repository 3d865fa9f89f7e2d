//! Const-correctness: member-variable resolution, body mutation analysis
//! and the const-candidate pass.

use tracing::debug;

use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::stream::{matches, Tok};
use crate::symbols::{is_virtual_in_base, FuncKind, Var};

impl<'a> ClassAnalyzer<'a> {
    /// Report member functions that could be declared `const`.
    pub fn check_const(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style || self.settings.ifcfg {
            return;
        }
        debug!("running const-candidate pass");
        let db = self.database();

        for (id, scope) in db.scopes().enumerate() {
            for func in &scope.functions {
                if func.kind != FuncKind::Function
                    || !func.has_body
                    || func.is_friend
                    || func.is_static
                    || func.is_const
                    || func.is_virtual
                {
                    continue;
                }

                let function_name = if func.decl.is_name() {
                    func.decl.text().to_string()
                } else {
                    format!("operator{}", func.decl.text())
                };

                // Last token of the return type at the definition site.
                let mut previous = if func.decl.is_name() {
                    func.def.previous()
                } else {
                    func.def.at(-2)
                };
                while previous.map_or(false, |p| p.text() == "::") {
                    previous = previous.and_then(|p| p.at(-2));
                }
                let Some(previous) = previous else { continue };

                if matches(Some(previous), "*|&") {
                    // Pointer or reference return: only a const-qualified
                    // one keeps the function const-able.
                    if !declaration_starts_with_const(func.def, false) {
                        continue;
                    }
                } else if matches(previous.previous(), "*|& >") {
                    if !declaration_starts_with_const(func.def, true) {
                        continue;
                    }
                } else if previous.is_name() && is_all_upper(previous.text()) {
                    // Unknown opaque types (LPVOID, HDC, ...).
                    continue;
                }

                let Some(param_end) = func.def.next().and_then(Tok::link) else {
                    continue;
                };

                if !scope.bases.is_empty() && is_virtual_in_base(db, &scope.bases, func.def) {
                    continue;
                }

                if self.is_const_body(&scope.name, &scope.bases, &scope.variables, param_end) {
                    // Compose the nested class path for the message.
                    let mut classname = scope.name.clone();
                    let mut parent = db.scope(id).parent;
                    while let Some(p) = parent {
                        classname = format!("{}::{}", db.scope(p).name, classname);
                        parent = db.scope(p).parent;
                    }
                    let message =
                        format!("The function '{classname}::{function_name}' can be const");
                    let diagnostic = if func.is_inline {
                        Diagnostic::new(CheckId::FunctionConst, Severity::Style, func.def, message)
                    } else {
                        Diagnostic::new(CheckId::FunctionConst, Severity::Style, func.def, message)
                            .with_secondary(func.decl)
                    };
                    sink.report(diagnostic);
                }
            }
        }
    }

    /// Whether the token denotes a (non-`mutable`) member variable of the
    /// class or of one of its transitive bases.
    pub(crate) fn is_member_var(
        &self,
        classname: &str,
        bases: &[String],
        variables: &[Var],
        tok: Tok<'a>,
    ) -> bool {
        // Walk back to the start of the expression.
        let mut tok = tok;
        while let Some(prev) = tok.previous() {
            if matches(Some(prev), "}|{|;|public:|protected:|private:|return|:|?") {
                break;
            }
            if matches(Some(prev), "* this") {
                return true;
            }
            tok = prev;
        }

        if tok.text() == "this" {
            return true;
        }

        // `(*name)[...]` reduces to `name`.
        if matches(Some(tok), "( * %var% ) [") {
            match tok.at(2) {
                Some(t) => tok = t,
                None => return false,
            }
        }

        // Strip the class's own qualification.
        if tok.text() == classname && tok.next().map_or(false, |n| n.text() == "::") {
            match tok.at(2) {
                Some(t) => tok = t,
                None => return false,
            }
        }

        if let Some(var) = variables.iter().find(|v| v.name == tok.text()) {
            return !var.is_mutable;
        }

        // Not found here: try the base classes.
        if !bases.is_empty() {
            let db = self.database();
            for base in bases {
                if base.contains("::") {
                    continue;
                }
                let Some(base_scope) = db.find_class(base) else {
                    continue;
                };
                if self.is_member_var(
                    &base_scope.name,
                    &base_scope.bases,
                    &base_scope.variables,
                    tok,
                ) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether the function body starting after `param_end` (the `)` of
    /// the parameter list) avoids every state mutation we can recognize.
    /// Unknown callees are pessimistic.
    pub(crate) fn is_const_body(
        &self,
        classname: &str,
        bases: &[String],
        variables: &[Var],
        param_end: Tok<'a>,
    ) -> bool {
        let mut indent = 0u32;
        let mut cur = Some(param_end);
        while let Some(tok) = cur {
            let text = tok.text();
            if text == "{" {
                indent += 1;
            } else if text == "}" {
                if indent <= 1 {
                    break;
                }
                indent -= 1;
            } else if is_write_operator(text) {
                if let Some(prev) = tok.previous() {
                    if self.is_member_var(classname, bases, variables, prev) {
                        return false;
                    }
                }
            } else if text == "<<" {
                // Streaming into a member.
                if let Some(prev) = tok.previous() {
                    if self.is_member_var(classname, bases, variables, prev) {
                        return false;
                    }
                }
            } else if matches(Some(tok), "++|--") {
                return false;
            } else if (matches(Some(tok), "%var% (") && !matches(Some(tok), "return|c_str|if"))
                || matches(Some(tok), "%var% < %any% > (")
            {
                // A call we cannot see through may mutate state.
                return false;
            } else if text == "delete" {
                return false;
            }
            cur = tok.next();
        }
        true
    }
}

/// `=` or a two-character compound assignment (`+=`, `|=`, ...); shift and
/// comparison operators are excluded.
fn is_write_operator(text: &str) -> bool {
    if text == "=" {
        return true;
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), Some('='), None) => !matches!(first, '<' | '!' | '>' | '='),
        _ => false,
    }
}

/// Whether the declaration containing the definition-site name starts with
/// `const`. With `scan_back` the walk may stop early at an interior
/// `const` (template returns like `const std::vector<int*>`).
fn declaration_starts_with_const(def: Tok<'_>, scan_back: bool) -> bool {
    let Some(mut temp) = def.previous() else {
        return false;
    };
    loop {
        if scan_back && temp.text() == "const" {
            return true;
        }
        match temp.previous() {
            Some(prev) => {
                if matches(Some(prev), ";|}|{|public:|protected:|private:") {
                    break;
                }
                temp = prev;
            }
            None => break,
        }
    }
    temp.text() == "const"
}

/// All characters uppercase or underscore.
fn is_all_upper(text: &str) -> bool {
    text.chars().all(|c| c == '_' || c.is_ascii_uppercase())
}

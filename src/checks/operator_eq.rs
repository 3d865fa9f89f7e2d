//! Assignment-operator shape checks.
//!
//! Three recognizers over `operator=`: a `void` return type, a body that
//! fails to return `*this`, and a deallocate-then-reallocate body with no
//! self-assignment guard.
//!
//! The self-assignment check is skipped for classes with multiple
//! inheritance: such an object has several addresses, so there is no
//! trivial guard to look for.

use tracing::debug;

use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::stream::{find_match, matches, Tok, TokenStream};
use crate::symbols::{Access, FuncKind};

impl<'a> ClassAnalyzer<'a> {
    /// `operator=` should return something.
    pub fn operator_eq(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running operator= return-type pass");
        let db = self.database();
        for scope in db.scopes() {
            for func in &scope.functions {
                if func.kind == FuncKind::OperatorEqual && func.access != Access::Private {
                    if func.def.text_at(-2) == "void" {
                        if let Some(anchor) = func.def.at(-2) {
                            sink.report(Diagnostic::new(
                                CheckId::OperatorEq,
                                Severity::Style,
                                anchor,
                                "'operator=' should return something".to_string(),
                            ));
                        }
                    }
                }
            }
        }
    }

    /// `operator=` should return a reference to `*this`.
    pub fn operator_eq_ret_ref_this(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running operator= return-*this pass");
        let db = self.database();
        for scope in db.scopes() {
            for func in &scope.functions {
                if func.kind != FuncKind::OperatorEqual || !func.has_body {
                    continue;
                }
                // Only operators declared to return `Class &`.
                if !matches(
                    func.decl.at(-4),
                    ";|}|{|public:|protected:|private: %type% &",
                ) || func.decl.text_at(-3) != scope.name
                {
                    continue;
                }

                let Some(param_end) = func.def.next().and_then(Tok::link) else {
                    continue;
                };
                let Some(last) = param_end.next().and_then(Tok::link) else {
                    continue;
                };

                let cast = format!("( {} & )", scope.name);
                let mut found_return = false;
                let mut cur = param_end.at(2);
                while let Some(tok) = cur {
                    if tok == last {
                        break;
                    }
                    let mut tok = tok;
                    if tok.text() == "return" {
                        found_return = true;
                        if matches(tok.next(), &cast) {
                            tok = match tok.at(4) {
                                Some(t) => t,
                                None => break,
                            };
                        }
                        if !(matches(tok.at(1), "(| * this ;|=")
                            || matches(tok.at(1), "(| * this +=")
                            || matches(tok.at(1), "operator = ("))
                        {
                            sink.report(Diagnostic::new(
                                CheckId::OperatorEqRetRefThis,
                                Severity::Style,
                                func.def,
                                "'operator=' should return reference to self".to_string(),
                            ));
                        }
                    }
                    cur = tok.next();
                }
                if !found_return {
                    sink.report(Diagnostic::new(
                        CheckId::OperatorEqRetRefThis,
                        Severity::Style,
                        func.def,
                        "'operator=' should return reference to self".to_string(),
                    ));
                }
            }
        }
    }

    /// `operator=` should check for assignment to self when the body frees
    /// and reallocates member memory.
    pub fn operator_eq_to_self(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running operator= self-assignment pass");
        let stream = self.stream;
        let mut from = stream.first();
        while let Some(tok) = find_match(from, "operator = (", None) {
            from = tok.next();

            if matches(tok.at(-2), "%type% ::") {
                self.check_qualified_operator(tok, sink);
            } else {
                self.check_inline_operator(tok, sink);
            }
        }
    }

    /// Out-of-line `A :: B :: operator =` form.
    fn check_qualified_operator(&self, tok: Tok<'a>, sink: &mut dyn DiagnosticSink) {
        // Gather the full qualified name backwards.
        let Some(mut name_start) = tok.at(-2) else {
            return;
        };
        let mut name_length = 1usize;
        while matches(name_start.at(-2), "%type% ::") {
            name_start = match name_start.at(-2) {
                Some(t) => t,
                None => return,
            };
            name_length += 2;
        }
        let name_string = name_text(name_start, name_length);

        if has_multiple_inheritance_global(self.stream, &name_string) {
            return;
        }
        // Return type must be `Name &`.
        if !name_start.previous().map_or(false, |p| p.text() == "&") {
            return;
        }
        let Some(ret_start) = name_start.at(-(1 + name_length as isize)) else {
            return;
        };
        if !name_match(name_start, ret_start, name_length) {
            return;
        }
        // Parameter must be `const Name & rhs`.
        let param_pattern = format!("const {name_string} & %var% )");
        if !matches(tok.at(3), &param_pattern) {
            return;
        }
        let Some(rhs) = tok.at(5 + name_length as isize) else {
            return;
        };
        let Some(param_type) = tok.at(4) else { return };
        if !name_match(name_start, param_type, name_length) {
            return;
        }

        let Some(param_end) = tok.at(2).and_then(Tok::link) else {
            return;
        };
        let Some(first) = param_end.next().filter(|t| t.text() == "{") else {
            return;
        };
        let Some(last) = first.link() else { return };

        if !has_assign_self(first, last, rhs) && has_deallocation(first, last) {
            sink.report(self_assign_diagnostic(tok));
        }
    }

    /// Inline `Name & operator = ( const Name & rhs )` form inside the
    /// class body.
    fn check_inline_operator(&self, tok: Tok<'a>, sink: &mut dyn DiagnosticSink) {
        if !tok.previous().map_or(false, |p| p.text() == "&") {
            return;
        }
        // The enclosing class declaration supplies the name.
        let mut head = Some(tok);
        while let Some(t) = head {
            if matches(Some(t), "class|struct %var%") {
                break;
            }
            head = t.previous();
        }
        let Some(head) = head else { return };
        let Some(class_name) = head.at(1) else { return };

        if has_multiple_inheritance_inline(Some(head)) {
            return;
        }
        if tok.text_at(-2) != class_name.text() {
            return;
        }
        if !matches(tok.at(3), "const %type% & %var% )") {
            return;
        }
        let Some(rhs) = tok.at(6) else { return };
        if tok.text_at(4) != class_name.text() {
            return;
        }

        let Some(param_end) = tok.at(2).and_then(Tok::link) else {
            return;
        };
        let Some(first) = param_end.next().filter(|t| t.text() == "{") else {
            return;
        };
        let Some(last) = first.link() else { return };

        if !has_assign_self(first, last, rhs) && has_deallocation(first, last) {
            sink.report(self_assign_diagnostic(tok));
        }
    }
}

fn self_assign_diagnostic(tok: Tok<'_>) -> Diagnostic {
    Diagnostic::new(
        CheckId::OperatorEqToSelf,
        Severity::Style,
        tok,
        "'operator=' should check for assignment to self".to_string(),
    )
}

/// Token-wise equality of two name sequences.
fn name_match(a: Tok<'_>, b: Tok<'_>, length: usize) -> bool {
    for i in 0..length {
        let (Some(x), Some(y)) = (a.at(i as isize), b.at(i as isize)) else {
            return false;
        };
        if x.text() != y.text() {
            return false;
        }
    }
    true
}

/// Join `length` tokens from `name` with single spaces.
fn name_text(name: Tok<'_>, length: usize) -> String {
    let mut out = String::new();
    for i in 0..length {
        if i != 0 {
            out.push(' ');
        }
        out.push_str(name.text_at(i as isize));
    }
    out
}

/// The body deallocates a member and later reassigns the same name from an
/// allocation. Kept deliberately narrow; a broader net would flood the
/// check with false positives.
fn has_deallocation(first: Tok<'_>, last: Tok<'_>) -> bool {
    let mut cur = Some(first);
    while let Some(tok) = cur {
        if tok == last {
            break;
        }
        if matches(Some(tok), "{|;|, free ( %var%") {
            if let Some(var) = tok.at(3) {
                let mut t = tok.at(4);
                while let Some(x) = t {
                    if x == last {
                        break;
                    }
                    if matches(Some(x), "%var% =") && x.text() == var.text() {
                        return true;
                    }
                    t = x.next();
                }
            }
        } else if matches(Some(tok), "{|;|, delete [ ] %var%") {
            if let Some(var) = tok.at(4) {
                let mut t = tok.at(5);
                while let Some(x) = t {
                    if x == last {
                        break;
                    }
                    if matches(Some(x), "%var% = new %type% [") && x.text() == var.text() {
                        return true;
                    }
                    t = x.next();
                }
            }
        } else if matches(Some(tok), "{|;|, delete %var%") {
            if let Some(var) = tok.at(2) {
                let mut t = tok.at(3);
                while let Some(x) = t {
                    if x == last {
                        break;
                    }
                    if matches(Some(x), "%var% = new") && x.text() == var.text() {
                        return true;
                    }
                    t = x.next();
                }
            }
        }
        cur = tok.next();
    }
    false
}

/// The body guards with `if (this == &rhs)` or one of its mirrors.
fn has_assign_self(first: Tok<'_>, last: Tok<'_>, rhs: Tok<'_>) -> bool {
    let mut cur = Some(first);
    while let Some(tok) = cur {
        if tok == last {
            break;
        }
        if matches(Some(tok), "if (") {
            if let (Some(start), Some(end)) = (tok.at(2), tok.next().and_then(Tok::link)) {
                let mut t = Some(start);
                while let Some(x) = t {
                    if x == end {
                        break;
                    }
                    if matches(Some(x), "this ==|!= & %var%") && x.text_at(3) == rhs.text() {
                        return true;
                    }
                    if matches(Some(x), "& %var% ==|!= this") && x.text_at(1) == rhs.text() {
                        return true;
                    }
                    t = x.next();
                }
            }
        }
        cur = tok.next();
    }
    false
}

/// A comma in the inheritance list before the class body opens.
fn has_multiple_inheritance_inline(tok: Option<Tok<'_>>) -> bool {
    let mut cur = tok;
    while let Some(t) = cur {
        if t.text() == "{" {
            break;
        }
        if t.text() == "," {
            return true;
        }
        cur = t.next();
    }
    false
}

/// Locate the (possibly nested) class named by `name` ("A :: B" form) and
/// test its inheritance list for a comma.
fn has_multiple_inheritance_global(stream: &TokenStream, name: &str) -> bool {
    let parts: Vec<&str> = name.split(" :: ").collect();
    let mut cur = stream.first();
    for part in &parts {
        cur = find_match(cur, &format!("class|struct {part}"), None);
        if cur.is_none() {
            break;
        }
    }
    has_multiple_inheritance_inline(cur)
}

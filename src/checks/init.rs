//! Constructor initialization tracking.
//!
//! Walks a constructor or `operator=` body and records which members it
//! initializes, following calls into other member functions of the same
//! class. The governing rule is conservative-in-the-face-of-unknowns: an
//! unresolvable call, a recursion cycle, `memset(this, ...)`, `*this = ...`
//! or passing `this` anywhere all mark every member initialized.

use rustc_hash::FxHashSet;

use crate::checks::ClassAnalyzer;
use crate::stream::{matches, Tok};
use crate::symbols::Scope;

/// Which members a propagation run has marked initialized.
///
/// Threaded explicitly through the recursion instead of mutating variable
/// records in place; the constructor pass creates a fresh state per
/// function body.
#[derive(Debug, Default)]
pub(crate) struct InitState {
    initialized: FxHashSet<String>,
    all: bool,
}

impl InitState {
    pub(crate) fn mark(&mut self, name: &str) {
        self.initialized.insert(name.to_string());
    }

    pub(crate) fn mark_all(&mut self) {
        self.all = true;
    }

    pub(crate) fn is_initialized(&self, name: &str) -> bool {
        self.all || self.initialized.contains(name)
    }
}

impl<'a> ClassAnalyzer<'a> {
    /// Mark in `state` every member of `scope` that the function starting
    /// at `start` (its name token at the implementation site) initializes.
    /// `callstack` guards against intra-class call cycles.
    pub(crate) fn initialize_vars(
        &self,
        scope: &Scope<'a>,
        start: Tok<'a>,
        state: &mut InitState,
        callstack: &mut Vec<String>,
    ) {
        let mut assign = false;
        let mut indent = 0u32;
        let mut cur = Some(start);
        while let Some(mut ftok) = cur {
            if ftok.next().is_none() {
                break;
            }

            // Initializer list between the parameter list and the body:
            // each `name (value)` marks a member, and an embedded
            // `other = value` marks another.
            if indent == 0 {
                if assign && matches(Some(ftok), "%var% (") {
                    state.mark(ftok.text());
                    if matches(ftok.at(2), "%var% =") {
                        state.mark(ftok.text_at(2));
                    }
                }
                if ftok.text() == ":" {
                    assign = true;
                }
            }

            if ftok.text() == "{" {
                indent += 1;
                assign = false;
            } else if ftok.text() == "}" {
                if indent <= 1 {
                    break;
                }
                indent -= 1;
            }
            if indent < 1 {
                cur = ftok.next();
                continue;
            }

            // Stream extraction writes the member.
            if matches(Some(ftok), ">> %var%") {
                state.mark(ftok.text_at(1));
            }

            // Statements start after one of these sentinels.
            if !matches(Some(ftok), "{|}|;|(|)|=") {
                cur = ftok.next();
                continue;
            }

            if matches(Some(ftok), "( !") {
                ftok = match ftok.next() {
                    Some(t) => t,
                    None => break,
                };
            }

            // Wholesale assignment through the copy operator.
            if matches(ftok.next(), "* this =") {
                state.mark_all();
                break;
            }

            if matches(ftok.next(), "%var% . %var% (") {
                ftok = match ftok.at(2) {
                    Some(t) => t,
                    None => break,
                };
            }

            if !matches(ftok.next(), "%var%")
                && !matches(ftok.next(), "this . %var%")
                && !matches(ftok.next(), "* %var% =")
                && !matches(ftok.next(), "( * this ) . %var%")
            {
                cur = ftok.next();
                continue;
            }

            // First token of the statement, with member-access prefixes
            // stripped.
            ftok = match ftok.next() {
                Some(t) => t,
                None => break,
            };
            if matches(Some(ftok), "( * this ) .") {
                ftok = match ftok.at(5) {
                    Some(t) => t,
                    None => break,
                };
            }
            if matches(Some(ftok), "this .") {
                ftok = match ftok.at(2) {
                    Some(t) => t,
                    None => break,
                };
            }
            if matches(Some(ftok), "%var% ::") {
                ftok = match ftok.at(2) {
                    Some(t) => t,
                    None => break,
                };
            }

            if matches(Some(ftok), "memset ( this ,") {
                state.mark_all();
                return;
            } else if matches(Some(ftok), "memset ( %var% ,") {
                state.mark(ftok.text_at(2));
                match ftok.next().and_then(Tok::link) {
                    Some(close) => {
                        cur = close.next();
                        continue;
                    }
                    None => break,
                }
            } else if matches(Some(ftok), "%var% (") && ftok.text() != "if" {
                if self.propagate_call(scope, ftok, state, callstack) {
                    return;
                }
                cur = ftok.next();
                continue;
            } else if matches(Some(ftok), "%var% =") {
                state.mark(ftok.text());
            } else if matches(Some(ftok), "%var% [ %any% ] =") {
                state.mark(ftok.text());
            } else if matches(Some(ftok), "%var% [ %any% ] [ %any% ] =") {
                state.mark(ftok.text());
            } else if matches(Some(ftok), "* %var% =") {
                state.mark(ftok.text_at(1));
            } else if matches(Some(ftok), "%var% . %any% =") {
                state.mark(ftok.text());
            }

            // clear() and Clear() count as initialization.
            if matches(Some(ftok), "%var% . clear|Clear (") {
                state.mark(ftok.text());
            }

            cur = ftok.next();
        }
    }

    /// Handle a call inside a constructor body. Returns `true` when the
    /// walk should stop because everything is already marked.
    fn propagate_call(
        &self,
        scope: &Scope<'a>,
        call: Tok<'a>,
        state: &mut InitState,
        callstack: &mut Vec<String>,
    ) -> bool {
        // Passing `this` anywhere as an argument: assume the callee
        // initializes everything.
        if let Some(close) = call.next().and_then(Tok::link) {
            let mut t = close;
            while t != call {
                if t.text() == "this" {
                    state.mark_all();
                    return true;
                }
                match t.previous() {
                    Some(p) => t = p,
                    None => break,
                }
            }
        }

        // Recursive or mutually recursive member call.
        if callstack.iter().any(|c| c == call.text()) {
            state.mark_all();
            return true;
        }

        if let Some(callee) = scope
            .functions
            .iter()
            .find(|f| f.has_body && f.decl.text() == call.text())
        {
            callstack.push(call.text().to_string());
            self.initialize_vars(scope, callee.def, state, callstack);
            callstack.pop();
            return false;
        }

        // Callee not defined where we can see it. If the class derives
        // from anything, or the name is used as a call inside the class
        // body, or any friend exists, give up and mark everything.
        let mut derived = false;
        let mut t = Some(scope.def);
        while let Some(x) = t {
            if x == scope.open_brace {
                break;
            }
            if x.text() == ":" {
                derived = true;
            }
            t = x.next();
        }

        let mut bailout = derived;
        if !bailout {
            let mut t = scope.open_brace.next();
            let mut reached_close = false;
            while let Some(x) = t {
                if x.text() == "{" {
                    match x.link() {
                        Some(l) => {
                            t = l.next();
                            continue;
                        }
                        None => break,
                    }
                } else if x.text() == "}" {
                    reached_close = true;
                    break;
                } else if x.text() == "friend"
                    || (x.text() == call.text()
                        && x.next().map_or(false, |n| n.text() == "("))
                {
                    bailout = true;
                    break;
                }
                t = x.next();
            }
            if !reached_close && !bailout {
                bailout = true;
            }
        }
        if bailout {
            state.mark_all();
            return true;
        }

        // External call: whatever is passed by reference may be
        // initialized, so mark every identifier in the argument list.
        let mut depth = 0u32;
        let mut t = call.at(2);
        while let Some(x) = t {
            if x.text() == "(" {
                depth += 1;
            } else if x.text() == ")" {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            if x.is_name() {
                state.mark(x.text());
            }
            t = x.next();
        }
        false
    }
}

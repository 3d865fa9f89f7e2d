//! Virtual-in-base resolution.
//!
//! Decides whether a member function is declared `virtual` in any
//! transitive base class. A base that cannot be located (or carries a
//! scope-qualified name) contributes nothing; the caller treats the
//! function as non-virtual in that case.

use crate::stream::{matches, Tok};
use crate::symbols::args::args_match;
use crate::symbols::database::SymbolDatabase;

/// Whether any scope in `bases` (or their transitive bases) declares a
/// virtual function with the same name, return tokens and argument list as
/// the function named by `func_tok`.
#[must_use]
pub fn is_virtual_in_base(db: &SymbolDatabase<'_>, bases: &[String], func_tok: Tok<'_>) -> bool {
    for base in bases {
        // Scope-qualified base names are not resolved.
        if base.contains("::") {
            continue;
        }
        let Some(scope) = db.find_class(base) else {
            continue;
        };

        let mut cur = scope.open_brace.next();
        while let Some(tok) = cur {
            if tok.text() == "{" {
                cur = tok.link().and_then(Tok::next);
                continue;
            }
            if tok.text() == "}" {
                break;
            }
            if matches(Some(tok), "public:|protected:|private:") {
                cur = tok.next();
                continue;
            }
            if tok.text() == "(" {
                cur = tok.link().and_then(Tok::next);
                continue;
            }
            if tok.text() == "virtual" {
                // Walk to the function name.
                let mut name_tok = tok;
                loop {
                    match name_tok.next() {
                        Some(n) if n.text() != "(" => name_tok = n,
                        Some(_) => break,
                        None => return false,
                    }
                }
                if name_tok.text() == func_tok.text()
                    && return_tokens_match(name_tok, func_tok)
                {
                    if let (Some(a), Some(b)) = (name_tok.next(), func_tok.next()) {
                        if args_match(a, b, "", 0) {
                            return true;
                        }
                    }
                }
                cur = name_tok.next();
                continue;
            }
            cur = tok.next();
        }

        if !scope.bases.is_empty() && is_virtual_in_base(db, &scope.bases, func_tok) {
            return true;
        }
    }
    false
}

/// Compare the return-type tokens right-to-left from the two function
/// names until the base side reaches its `virtual` keyword.
fn return_tokens_match(base_name: Tok<'_>, func_tok: Tok<'_>) -> bool {
    let mut a = base_name.previous();
    let mut b = func_tok.previous();
    loop {
        match (a, b) {
            (Some(x), Some(y)) => {
                if x.text() == "virtual" {
                    return true;
                }
                if x.text() != y.text() {
                    return false;
                }
                a = x.previous();
                b = y.previous();
            }
            _ => return false,
        }
    }
}

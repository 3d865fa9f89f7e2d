//! Member-variable extraction.
//!
//! Walks a class body at nesting depth 1 and recognizes member
//! declarations by a grammar of declarator shapes: qualified and
//! unqualified scalars, `const`/`static`/`mutable` in either order,
//! pointers and pointer-to-pointer, arrays, qualified types, templates and
//! pointer-to-template, and inline `struct`/`union` fields. Anything it
//! does not recognize is simply not a member variable.

use crate::stream::{matches, Tok};
use crate::symbols::types::Var;

/// Collect the member variables of the scope opened by `class_tok` (the
/// `class` or `struct` keyword token).
pub(crate) fn collect_variables(class_tok: Tok<'_>) -> Vec<Var> {
    let mut vars = Vec::new();
    let is_struct = class_tok.text() == "struct";
    let mut in_private = !is_struct;
    let mut indent = 0u32;
    let mut cur = Some(class_tok);
    'outer: while let Some(tok) = cur {
        if tok.next().is_none() {
            break;
        }
        if tok.text() == "{" {
            indent += 1;
        } else if tok.text() == "}" {
            if indent <= 1 {
                break;
            }
            indent -= 1;
        }
        if indent != 1 {
            cur = tok.next();
            continue;
        }

        // Borland extension: everything in a __published section is
        // runtime-initialized, so it never enters the variable list.
        if tok.text() == "__published:" {
            in_private = false;
            let mut t = Some(tok);
            while let Some(x) = t {
                let mut x = x;
                if x.text() == "{" {
                    match x.link() {
                        Some(l) => x = l,
                        None => break 'outer,
                    }
                }
                if matches(x.next(), "private:|protected:|public:") {
                    t = Some(x);
                    break;
                }
                t = x.next();
            }
            match t {
                Some(x) => {
                    cur = x.next();
                    continue;
                }
                None => break,
            }
        }

        let text = tok.text();
        let is_label = !text.starts_with(':') && text.contains(':');
        if is_label {
            in_private = text == "private:";
        }

        // Member declarations start right after a statement boundary or an
        // access label.
        if !(matches(Some(tok), ";|{|}") || is_label) {
            cur = tok.next();
            continue;
        }

        let Some(mut next) = tok.next() else { break };

        // A label is not the start of a declaration.
        if next.text().contains(':') {
            cur = tok.next();
            continue;
        }
        // Borland properties are not plain members.
        if next.text() == "__property" {
            cur = tok.next();
            continue;
        }

        if next.text() == "const" {
            match next.next() {
                Some(n) => next = n,
                None => break,
            }
        }
        let is_static = next.text() == "static";
        if is_static {
            match next.next() {
                Some(n) => next = n,
                None => break,
            }
        }
        let is_mutable = next.text() == "mutable";
        if is_mutable {
            match next.next() {
                Some(n) => next = n,
                None => break,
            }
        }
        if next.text() == "const" {
            match next.next() {
                Some(n) => next = n,
                None => break,
            }
        }

        let mut is_class = false;
        let mut varname = "";

        if matches(Some(next), "%type% %var% ;|:") {
            if !next.is_standard_type() {
                is_class = true;
            }
            varname = next.text_at(1);
        } else if matches(Some(next), "struct|union %type% %var% ;") {
            varname = next.text_at(2);
        } else if matches(Some(next), "%type% * %var% ;") {
            varname = next.text_at(2);
        } else if matches(Some(next), "%type% %type% * %var% ;") {
            varname = next.text_at(3);
        } else if matches(Some(next), "%type% :: %type% * %var% ;") {
            varname = next.text_at(4);
        } else if matches(Some(next), "%type% %var% [") && next.text_at(1) != "operator" {
            if !next.is_standard_type() {
                is_class = true;
            }
            varname = next.text_at(1);
        } else if matches(Some(next), "%type% * %var% [") {
            varname = next.text_at(2);
        } else if matches(Some(next), "%type% :: %type% * %var% [") {
            varname = next.text_at(4);
        } else if matches(Some(next), "%type% :: %type% %var% ;") {
            is_class = true;
            varname = next.text_at(3);
        } else if matches(Some(next), "%type% :: %type% <") || matches(Some(next), "%type% <") {
            is_class = true;
            // Find the matching '>' of the template argument list.
            let mut level = 0i32;
            let mut t = Some(next);
            while let Some(x) = t {
                if x.text() == "<" {
                    level += 1;
                } else if x.text() == ">" {
                    level -= 1;
                    if level == 0 {
                        break;
                    }
                }
                t = x.next();
            }
            if let Some(x) = t {
                if matches(Some(x), "> %var% ;") {
                    varname = x.text_at(1);
                } else if matches(Some(x), "> * %var% ;") {
                    varname = x.text_at(2);
                }
            }
        }

        if !varname.is_empty() && varname != "operator" {
            vars.push(Var {
                name: varname.to_string(),
                is_private: in_private,
                is_mutable,
                is_static,
                is_class,
            });
        }
        cur = tok.next();
    }
    vars
}

//! Argument-list equivalence.
//!
//! Decides whether two parenthesized argument lists denote the same
//! signature. The walk is lockstep and tolerant: default-value suffixes on
//! the declaration side are skipped, a missing parameter name on either
//! side is allowed, differing plain names are skipped together, and a
//! definition may qualify a type with any prefix of the enclosing scope
//! path. Template parameters with defaulted arguments are matched
//! best-effort only.

use crate::stream::{matches, Tok};

/// Compare two argument lists.
///
/// `first` and `second` are cursors at the opening `(` of the declaration
/// and definition side respectively. `path` is the enclosing scope path of
/// the declaration in `"Outer :: Inner :: "` form and `depth` the number of
/// scopes it names; both are empty/zero when scope qualification is not in
/// play.
#[must_use]
pub fn args_match(first: Tok<'_>, second: Tok<'_>, path: &str, depth: u32) -> bool {
    let mut first = first;
    let mut second = second;
    let mut matched = false;
    while first.text() == second.text() {
        // At end of argument list.
        if first.text() == ")" {
            matched = true;
            break;
        }

        // Skip default value assignment.
        if first.next().map_or(false, |n| n.text() == "=") {
            first = match first.at(2) {
                Some(t) => t,
                None => break,
            };
            continue;
        }

        let first_next = first.next();
        let second_next = second.next();
        let fnt = first_next.map_or("", Tok::text);
        let snt = second_next.map_or("", Tok::text);

        if fnt == "," && snt != "," {
            // Declaration side is missing the parameter name.
            second = match second_next {
                Some(t) => t,
                None => break,
            };
        } else if fnt == ")" && snt != ")" {
            second = match second_next {
                Some(t) => t,
                None => break,
            };
        } else if snt == "," && fnt != "," {
            // Definition side is missing the parameter name.
            first = match first_next {
                Some(t) => t,
                None => break,
            };
        } else if snt == ")" && fnt != ")" {
            first = match first_next {
                Some(t) => t,
                None => break,
            };
        } else if second.text() == ")" {
            // Different number of arguments.
            break;
        } else if matches(first_next, "%var% ,|)|=")
            && matches(second_next, "%var% ,|)")
            && fnt != snt
        {
            // Plain parameter names differ; skip both and keep comparing
            // types.
            first = match first_next {
                Some(t) => t,
                None => break,
            };
            second = match second_next {
                Some(t) => t,
                None => break,
            };
            if first.next().map_or(false, |n| n.text() == "=") {
                first = match first.at(2) {
                    Some(t) => t,
                    None => break,
                };
            }
        } else if depth > 0 && matches(first_next, "%var%") {
            // The definition may scope-qualify an unqualified declaration
            // type. Try the full enclosing path first, then successively
            // strip trailing scopes.
            let name = fnt;
            let scopes: Vec<&str> = path
                .split(" :: ")
                .filter(|s| !s.trim().is_empty())
                .collect();
            let mut width = (depth as usize).min(scopes.len());
            while width >= 1 {
                let mut qualified = String::new();
                for scope in &scopes[..width] {
                    qualified.push_str(scope);
                    qualified.push_str(" :: ");
                }
                qualified.push_str(name);
                if matches(second_next, &qualified) {
                    second = match second.at((width * 2) as isize) {
                        Some(t) => t,
                        None => return false,
                    };
                    break;
                }
                width -= 1;
            }
        }

        first = match first.next() {
            Some(t) => t,
            None => break,
        };
        second = match second.next() {
            Some(t) => t,
            None => break,
        };
    }
    matched
}

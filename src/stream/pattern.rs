//! Token pattern matching.
//!
//! Patterns are space-separated sequences of elements. An element is a
//! literal token text, a wildcard, or a `|`-joined alternation of either.
//! An empty alternation branch (a trailing or doubled `|`) makes the whole
//! element optional: when nothing matches, the cursor stays put and
//! matching continues with the next element.
//!
//! Wildcards:
//!
//! | Wildcard  | Matches                                   |
//! |-----------|-------------------------------------------|
//! | `%var%`   | any identifier-like token                 |
//! | `%type%`  | any identifier-like token except `delete` |
//! | `%num%`   | any numeric literal                       |
//! | `%any%`   | any single token                          |

use crate::stream::Tok;

fn alternative_matches(tok: Tok<'_>, alternative: &str) -> bool {
    match alternative {
        "" => false,
        "%var%" => tok.is_name(),
        "%type%" => tok.is_name() && tok.text() != "delete",
        "%num%" => tok.is_number(),
        "%any%" => true,
        literal => tok.text() == literal,
    }
}

fn element_matches(tok: Tok<'_>, element: &str) -> bool {
    element.split('|').any(|alt| alternative_matches(tok, alt))
}

fn element_is_optional(element: &str) -> bool {
    element.split('|').any(str::is_empty)
}

/// Test `pattern` against consecutive tokens starting at `tok`.
///
/// Returns `false` when the stream ends before a mandatory element is
/// satisfied.
#[must_use]
pub fn matches(tok: Option<Tok<'_>>, pattern: &str) -> bool {
    let mut cur = tok;
    for element in pattern.split_whitespace() {
        match cur {
            Some(t) => {
                if element_matches(t, element) {
                    cur = t.next();
                } else if !element_is_optional(element) {
                    return false;
                }
            }
            None => {
                if !element_is_optional(element) {
                    return false;
                }
            }
        }
    }
    true
}

/// Scan forward from `start` for the first position where `pattern`
/// matches. The search stops (exclusively) at `end` when given.
#[must_use]
pub fn find_match<'a>(
    start: Option<Tok<'a>>,
    pattern: &str,
    end: Option<Tok<'a>>,
) -> Option<Tok<'a>> {
    let mut cur = start;
    while let Some(tok) = cur {
        if let Some(e) = end {
            if tok == e {
                return None;
            }
        }
        if matches(Some(tok), pattern) {
            return Some(tok);
        }
        cur = tok.next();
    }
    None
}

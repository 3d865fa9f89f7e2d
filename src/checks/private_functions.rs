//! Unused private member functions.
//!
//! Collects the private, non-constructor function declarations of each
//! class declared in the primary translation unit, then erases every name
//! used as a call, a member-initializer target or an initializer-list base
//! call from any member-function body of that class. Friend declarations
//! and nested classes disable the check for the whole scope; a surviving
//! name gets one last chance as a function pointer before it is reported.

use tracing::debug;

use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::stream::{find_match, matches, Tok};

impl<'a> ClassAnalyzer<'a> {
    /// Check that all private functions are called.
    pub fn private_functions(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running private-function pass");
        let stream = self.stream;
        let class_pattern = "class|struct %var% {|:";

        let mut cursor = find_match(stream.first(), class_pattern, None);
        while let Some(class_tok) = cursor {
            cursor = find_match(class_tok.next(), class_pattern, None);

            // Only classes declared in the primary translation unit; for
            // headers we cannot assume the whole implementation is seen.
            if class_tok.file_index() != 0 {
                continue;
            }
            let classname = class_tok.text_at(1).to_string();

            let mut candidates = self.collect_private_functions(class_tok, &classname);
            if candidates.is_empty() {
                continue;
            }
            let has_impl = self.erase_used_functions(&classname, &mut candidates);

            if has_impl {
                for candidate in &candidates {
                    // Last chance: the name may be taken as a function
                    // pointer somewhere.
                    let pointer_pattern = format!("return|(|)|,|= {}", candidate.text());
                    if find_match(stream.first(), &pointer_pattern, None).is_none() {
                        sink.report(Diagnostic::new(
                            CheckId::UnusedPrivateFunction,
                            Severity::Style,
                            *candidate,
                            format!(
                                "Unused private function '{}::{}'",
                                classname,
                                candidate.text()
                            ),
                        ));
                    }
                }
            }
        }
    }

    /// Private function declarations at depth 1 of the class body; empty
    /// when a friend declaration or a nested class disables the check.
    fn collect_private_functions(&self, class_tok: Tok<'a>, classname: &str) -> Vec<Tok<'a>> {
        let mut list = Vec::new();
        let is_struct = class_tok.text() == "struct";
        let mut in_private = !is_struct;
        let mut indent = 0u32;
        let mut cur = Some(class_tok);
        while let Some(tok) = cur {
            if matches(Some(tok), "friend %var%") {
                list.clear();
                break;
            }

            if tok.text() == "{" {
                indent += 1;
            } else if tok.text() == "}" {
                if indent <= 1 {
                    break;
                }
                indent -= 1;
            } else if indent != 1 {
                cur = tok.next();
                continue;
            } else if tok.text() == "private:" {
                in_private = true;
            } else if tok.text() == "public:" || tok.text() == "protected:" {
                in_private = false;
            } else if in_private {
                if matches(Some(tok), "typedef %type% (") {
                    match tok.at(2).and_then(Tok::link) {
                        Some(close) => {
                            cur = close.next();
                            continue;
                        }
                        None => break,
                    }
                } else if matches(Some(tok), ":|, %var% (") {
                    match tok.at(2).and_then(Tok::link) {
                        Some(close) => {
                            cur = close.next();
                            continue;
                        }
                        None => break,
                    }
                } else if matches(Some(tok), "%var% (")
                    && !matches(tok.next().and_then(Tok::link), ") (")
                    && tok.text() != classname
                {
                    list.push(tok);
                }
            }

            // A nested class has access to the private functions; give up
            // on the whole scope.
            if tok.text() == "class" {
                list.clear();
                break;
            }
            cur = tok.next();
        }
        list
    }

    /// Scan the whole stream for member-function bodies of `classname` and
    /// remove every called name from `candidates`. Returns whether any
    /// body was implemented in the primary translation unit.
    fn erase_used_functions(&self, classname: &str, candidates: &mut Vec<Tok<'a>>) -> bool {
        let stream = self.stream;
        let head_pattern = format!("class {classname} :|{{");
        let qualified_pattern = format!("{classname} :: ~| %var% (");

        let mut has_impl = false;
        let mut in_class = false;
        let mut indent = 0u32;
        let mut cur = stream.first();
        while let Some(tok) = cur {
            if tok.text() == "{" {
                indent += 1;
            } else if tok.text() == "}" {
                if indent > 0 {
                    indent -= 1;
                }
                if indent == 0 {
                    in_class = false;
                }
            }

            if matches(Some(tok), &head_pattern) {
                indent = 0;
                in_class = true;
            }

            let member_head = (in_class && indent == 1 && matches(Some(tok), "%var% ("))
                || matches(Some(tok), &qualified_pattern);
            if !member_head {
                cur = tok.next();
                continue;
            }

            // Move to the parameter-list close.
            let mut f = tok;
            let mut truncated = false;
            while f.text() != ")" {
                match f.next() {
                    Some(n) => f = n,
                    None => {
                        truncated = true;
                        break;
                    }
                }
            }
            if truncated {
                break;
            }

            // Names used in a constructor initializer list count as used.
            if matches(Some(f), ") : %var% (") {
                while !matches(f.next(), "{|}|;") {
                    if matches(Some(f), "::|,|( %var% ,|)") {
                        let used = f.text_at(1);
                        candidates.retain(|c| c.text() != used);
                    }
                    match f.next() {
                        Some(n) => f = n,
                        None => break,
                    }
                }
            }

            if !matches(Some(f), ") const| {") {
                cur = f.next();
                continue;
            }

            if f.file_index() == 0 {
                has_impl = true;
            }

            // Erase every call inside the body.
            let mut body_indent = 0i32;
            let mut t = Some(f);
            while let Some(x) = t {
                if x.text() == "{" {
                    body_indent += 1;
                } else if x.text() == "}" {
                    body_indent -= 1;
                    if body_indent < 1 {
                        break;
                    }
                } else if matches(Some(x), "%var% (") {
                    candidates.retain(|c| c.text() != x.text());
                }
                t = x.next();
            }

            cur = f.next();
        }
        has_impl
    }
}

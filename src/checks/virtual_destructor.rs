//! Virtual-destructor check.
//!
//! A base class deleted through a base pointer needs a virtual destructor
//! once the derived class has one that does real work. The pass is
//! heuristic and sits behind the inconclusive flag: it only fires when the
//! derived destructor is non-empty, the inheritance is public and the base
//! destructor is visibly non-virtual and public. A base class with bases
//! of its own is skipped; one of them might declare the destructor
//! virtual.

use tracing::debug;

use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::stream::{find_match, matches, Tok};

impl<'a> ClassAnalyzer<'a> {
    /// Check that destructors of inherited classes are virtual.
    pub fn virtual_destructor(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.inconclusive {
            return;
        }
        debug!("running virtual-destructor pass");
        let stream = self.stream;
        let decl_pattern = "class %var% : %var%";

        let mut cursor = find_match(stream.first(), decl_pattern, None);
        while let Some(derived_head) = cursor {
            cursor = find_match(derived_head.next(), decl_pattern, None);

            let derived_name = derived_head.text_at(1);

            // The derived class must have a non-empty destructor.
            let destructor_pattern = format!("~ {derived_name} ( ) {{");
            let Some(derived_destructor) =
                find_match(stream.first(), &destructor_pattern, None)
            else {
                continue;
            };
            if matches(Some(derived_destructor), "~ %var% ( ) { }") {
                continue;
            }

            // Walk the base list.
            let mut base_cursor = derived_head.at(3);
            while base_cursor.map_or(false, |t| t.is_name()) {
                let mut base_tok = match base_cursor {
                    Some(t) => t,
                    None => break,
                };
                let is_public = base_tok.text() == "public";
                if matches(Some(base_tok), "public|protected|private") {
                    base_tok = match base_tok.next() {
                        Some(t) => t,
                        None => break,
                    };
                }
                let base_name = base_tok.text().to_string();

                // Position at the next base (or the body).
                let mut t = Some(base_tok);
                while let Some(x) = t {
                    if x.text() == "{" {
                        t = Some(x);
                        break;
                    }
                    if x.text() == "," {
                        t = x.next();
                        break;
                    }
                    t = x.next();
                }
                base_cursor = t;

                if !is_public {
                    continue;
                }

                self.check_base_destructor(&base_name, derived_name, sink);
            }
        }
    }

    fn check_base_destructor(
        &self,
        base_name: &str,
        derived_name: &str,
        sink: &mut dyn DiagnosticSink,
    ) {
        let stream = self.stream;
        let destructor_pattern = format!("%any% ~ {base_name} (");

        // Find the base destructor, skipping qualified references.
        let mut found = find_match(stream.first(), &destructor_pattern, None);
        while found.map_or(false, |t| t.text() == "::") {
            found = find_match(
                found.and_then(Tok::next),
                &destructor_pattern,
                None,
            );
        }
        let reverse_tok = found;

        // Walk back over the declaration looking for `virtual`.
        let mut base = found;
        while base.map_or(false, |t| t.is_name() && t.text() != "virtual") {
            base = base.and_then(Tok::previous);
        }

        let class_pattern = format!("class {base_name} {{");

        let Some(base) = base else {
            // No destructor is declared; if the class itself is visible
            // the implicit destructor is certainly not virtual.
            if let Some(class_tok) = find_match(stream.first(), &class_pattern, None) {
                sink.report(virtual_destructor_diagnostic(
                    class_tok, base_name, derived_name,
                ));
            }
            return;
        };
        if base.text() == "virtual" {
            return;
        }

        // A base class with bases of its own is skipped; the declaration
        // pattern only matches a plain `class Base {`.
        if find_match(stream.first(), &class_pattern, None).is_none() {
            return;
        }

        // The destructor must be public for deletion through a base
        // pointer to compile at all.
        let mut indent = 0i32;
        let mut cur = reverse_tok;
        while let Some(tok) = cur {
            if tok.text() == "public:" {
                sink.report(virtual_destructor_diagnostic(base, base_name, derived_name));
                break;
            } else if tok.text() == "protected:" || tok.text() == "private:" {
                break;
            } else if tok.text() == "{" {
                indent += 1;
                if indent >= 1 {
                    break;
                }
            } else if tok.text() == "}" {
                indent -= 1;
            }
            cur = tok.previous();
        }
    }
}

fn virtual_destructor_diagnostic(
    tok: Tok<'_>,
    base_name: &str,
    derived_name: &str,
) -> Diagnostic {
    Diagnostic::new(
        CheckId::VirtualDestructor,
        Severity::Error,
        tok,
        format!(
            "Class {base_name} which is inherited by class {derived_name} \
             does not have a virtual destructor"
        ),
    )
}

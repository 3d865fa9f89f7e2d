//! Byte-primitive misuse on non-POD aggregates.
//!
//! `memset`, `memcpy` and `memmove` clear or copy raw bytes; used on an
//! aggregate holding `std::` members they corrupt the object. This pass
//! must run on the raw token view: the `sizeof` operand it keys on does
//! not survive simplification.

use tracing::debug;

use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::stream::{find_match, matches, Tok};

impl<'a> ClassAnalyzer<'a> {
    /// Check that memset/memcpy/memmove are not used on aggregates with
    /// `std::` members.
    pub fn memset(&self, sink: &mut dyn DiagnosticSink) {
        debug!("running memset pass");
        let stream = self.stream;
        let mut cur = stream.first();
        while let Some(tok) = cur {
            cur = tok.next();
            if !matches(Some(tok), "memset|memcpy|memmove") {
                continue;
            }

            let type_name = if matches(Some(tok), "memset ( %var% , %num% , sizeof ( %type% ) )") {
                tok.text_at(8)
            } else if matches(Some(tok), "memset ( & %var% , %num% , sizeof ( %type% ) )") {
                tok.text_at(9)
            } else if matches(
                Some(tok),
                "memset ( %var% , %num% , sizeof ( struct %type% ) )",
            ) {
                tok.text_at(9)
            } else if matches(
                Some(tok),
                "memset ( & %var% , %num% , sizeof ( struct %type% ) )",
            ) {
                tok.text_at(10)
            } else if matches(Some(tok), "%type% ( %var% , %var% , sizeof ( %type% ) )") {
                tok.text_at(8)
            } else {
                ""
            };
            if type_name.is_empty() {
                continue;
            }

            self.check_aggregate(tok, type_name, sink);
        }
    }

    /// Walk the body of `struct|class type_name {` looking for `std::`
    /// members; report against the call site `tok`.
    fn check_aggregate(&self, tok: Tok<'a>, type_name: &str, sink: &mut dyn DiagnosticSink) {
        let pattern = format!("struct|class {type_name} {{");
        let mut cur = find_match(self.stream.first(), &pattern, None);
        while let Some(t) = cur {
            if t.text() == "}" {
                break;
            }
            let mut t = t;

            // Skip member-function bodies.
            if matches(Some(t), ") {") {
                match t.next().and_then(Tok::link) {
                    Some(close) => {
                        cur = close.next();
                        continue;
                    }
                    None => break,
                }
            }

            // Statements start after `;`, braces or an access label.
            if matches(Some(t), ";|{|}") || t.text().contains(':') {
                if matches(t.next(), "std :: %type% %var% ;") {
                    sink.report(Diagnostic::new(
                        CheckId::MemsetStruct,
                        Severity::Error,
                        tok,
                        format!(
                            "Using '{}' on struct that contains a 'std::{}'",
                            tok.text(),
                            t.text_at(3)
                        ),
                    ));
                } else if matches(t.next(), "std :: %type% <") {
                    let type_str = t.text_at(3).to_string();

                    // Find the closing '>'; a pointer variable after it is
                    // harmless for memset, a value is not.
                    let mut level = 0u32;
                    let mut walker = t.next();
                    loop {
                        match walker {
                            Some(w) => {
                                if w.text() == "<" {
                                    level += 1;
                                } else if w.text() == ">" {
                                    if level <= 1 {
                                        t = w;
                                        break;
                                    }
                                    level -= 1;
                                } else if w.text() == "(" {
                                    match w.link() {
                                        Some(l) => {
                                            walker = l.next();
                                            continue;
                                        }
                                        None => return,
                                    }
                                }
                                walker = w.next();
                            }
                            None => return,
                        }
                    }

                    if matches(Some(t), "> %var% ;") {
                        sink.report(Diagnostic::new(
                            CheckId::MemsetStruct,
                            Severity::Error,
                            tok,
                            format!(
                                "Using '{}' on struct that contains a 'std::{}'",
                                tok.text(),
                                type_str
                            ),
                        ));
                    }
                }
            }
            cur = t.next();
        }
    }
}

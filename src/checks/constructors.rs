//! Constructor completeness checks.
//!
//! Reports classes that hold private data but declare no constructor, and
//! members a constructor or `operator=` body leaves uninitialized.

use tracing::debug;

use crate::checks::init::InitState;
use crate::checks::ClassAnalyzer;
use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::symbols::{Access, FuncKind};

impl<'a> ClassAnalyzer<'a> {
    /// Check that all class constructors are ok.
    pub fn constructors(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running constructor checks");
        let db = self.database();

        for scope in db.scopes() {
            // No constructor at all: private non-static builtin data stays
            // uninitialized.
            if scope.num_constructors == 0
                && scope
                    .variables
                    .iter()
                    .any(|v| v.is_private && !v.is_class && !v.is_static)
            {
                let kind = if scope.def.text() == "struct" {
                    "struct"
                } else {
                    "class"
                };
                sink.report(Diagnostic::new(
                    CheckId::NoConstructor,
                    Severity::Style,
                    scope.def,
                    format!(
                        "The {} '{}' has no constructor. Member variables not initialized.",
                        kind, scope.name
                    ),
                ));
            }

            for func in &scope.functions {
                if !func.has_body
                    || !matches!(
                        func.kind,
                        FuncKind::Constructor | FuncKind::CopyConstructor | FuncKind::OperatorEqual
                    )
                {
                    continue;
                }

                let mut state = InitState::default();
                let mut callstack = Vec::new();
                self.initialize_vars(scope, func.def, &mut state, &mut callstack);

                for var in &scope.variables {
                    // Class-typed members self-initialize in a plain
                    // constructor.
                    if var.is_class && func.kind == FuncKind::Constructor {
                        continue;
                    }
                    if var.is_static || state.is_initialized(&var.name) {
                        continue;
                    }

                    if func.kind == FuncKind::OperatorEqual {
                        // Only flag assignment operators taking the class
                        // itself; unrelated overloads assign nothing of
                        // ours.
                        let params = if func.def.text() == "=" {
                            func.def.at(1)
                        } else {
                            func.def.at(3)
                        };
                        let mut class_name_used = false;
                        if let Some(start) = params {
                            if let Some(end) = start.link() {
                                let mut t = Some(start);
                                while let Some(x) = t {
                                    if x == end {
                                        break;
                                    }
                                    if x.text() == scope.name {
                                        class_name_used = true;
                                        break;
                                    }
                                    t = x.next();
                                }
                            }
                        }
                        if class_name_used {
                            sink.report(Diagnostic::new(
                                CheckId::OperatorEqVarError,
                                Severity::Style,
                                func.def,
                                format!(
                                    "Member variable '{}::{}' is not assigned a value in '{}::operator='",
                                    scope.name, var.name, scope.name
                                ),
                            ));
                        }
                    } else if func.access != Access::Private {
                        sink.report(Diagnostic::new(
                            CheckId::UninitVar,
                            Severity::Style,
                            func.def,
                            format!(
                                "Member variable not initialized in the constructor '{}::{}'",
                                scope.name, var.name
                            ),
                        ));
                    }
                }
            }
        }
    }
}

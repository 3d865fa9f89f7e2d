//! Defect recognizers.
//!
//! [`ClassAnalyzer`] owns one lazily built symbol database per analyzed
//! stream and exposes the individual passes. The two free functions
//! [`run_raw_checks`] and [`run_simplified_checks`] are the explicit
//! registration lists a driver invokes: the memory-primitive pass needs
//! the raw token view (`sizeof` survives only there), everything else runs
//! on the simplified view.

pub mod constness;
pub mod constructors;
pub mod init;
pub mod memset;
pub mod operator_eq;
pub mod private_functions;
pub mod virtual_destructor;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::diagnostics::{CheckId, Diagnostic, DiagnosticSink, Severity};
use crate::settings::Settings;
use crate::stream::{find_match, TokenStream};
use crate::symbols::SymbolDatabase;

/// Analyzer for one token stream.
///
/// The symbol database is built on first use and at most once per
/// instance; passes that only walk tokens never pay for it.
pub struct ClassAnalyzer<'a> {
    pub(crate) stream: &'a TokenStream,
    pub(crate) settings: &'a Settings,
    db: OnceCell<SymbolDatabase<'a>>,
}

impl<'a> ClassAnalyzer<'a> {
    /// Create an analyzer borrowing `stream` and `settings`.
    #[must_use]
    pub fn new(stream: &'a TokenStream, settings: &'a Settings) -> Self {
        Self {
            stream,
            settings,
            db: OnceCell::new(),
        }
    }

    /// The symbol database, built on first call.
    pub fn database(&self) -> &SymbolDatabase<'a> {
        self.db.get_or_init(|| SymbolDatabase::build(self.stream))
    }

    /// Warn for `this - x`; the intended code is usually `this->x`.
    pub fn this_subtraction(&self, sink: &mut dyn DiagnosticSink) {
        if !self.settings.check_coding_style {
            return;
        }
        debug!("running this-subtraction pass");
        let mut cur = find_match(self.stream.first(), "this - %var%", None);
        while let Some(tok) = cur {
            if !tok.previous().map_or(false, |p| p.text() == "*") {
                sink.report(Diagnostic::new(
                    CheckId::ThisSubtraction,
                    Severity::Style,
                    tok,
                    "Suspicious pointer subtraction".to_string(),
                ));
            }
            cur = find_match(tok.next(), "this - %var%", None);
        }
    }
}

/// Run the passes that need the raw token view.
pub fn run_raw_checks(stream: &TokenStream, settings: &Settings, sink: &mut dyn DiagnosticSink) {
    let analyzer = ClassAnalyzer::new(stream, settings);
    // Cannot run on the simplified view: `sizeof` is preserved only here.
    analyzer.memset(sink);
}

/// Run the passes that operate on the simplified token view.
pub fn run_simplified_checks(
    stream: &TokenStream,
    settings: &Settings,
    sink: &mut dyn DiagnosticSink,
) {
    let analyzer = ClassAnalyzer::new(stream, settings);

    // Coding-style passes.
    analyzer.constructors(sink);
    analyzer.operator_eq(sink);
    analyzer.private_functions(sink);
    analyzer.operator_eq_ret_ref_this(sink);
    analyzer.this_subtraction(sink);
    analyzer.operator_eq_to_self(sink);

    analyzer.virtual_destructor(sink);
    analyzer.check_const(sink);
}

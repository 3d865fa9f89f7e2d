//! Diagnostic records and the sink they are delivered to.
//!
//! The analyzer emits structured [`Diagnostic`] values and never formats or
//! routes messages itself; presentation belongs to the host tool's error
//! logger. A diagnostic carries one or two anchor token indices into the
//! stream it was produced from, a severity, a stable identifier and a
//! human-readable message.

use serde::{Deserialize, Serialize};

use crate::stream::Tok;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stylistic finding; the code is valid but questionable.
    Style,
    /// Likely defect.
    Error,
}

/// Stable identifiers for every diagnostic the analyzer can produce.
///
/// The serialized form of each variant is the wire identifier and must not
/// change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckId {
    #[serde(rename = "noConstructor")]
    NoConstructor,
    #[serde(rename = "uninitVar")]
    UninitVar,
    #[serde(rename = "operatorEqVarError")]
    OperatorEqVarError,
    #[serde(rename = "unusedPrivateFunction")]
    UnusedPrivateFunction,
    /// Reserved: using a byte primitive on a class. The current recognizer
    /// reports aggregate misuse through [`CheckId::MemsetStruct`] only.
    #[serde(rename = "memsetClass")]
    MemsetClass,
    #[serde(rename = "memsetStruct")]
    MemsetStruct,
    #[serde(rename = "operatorEq")]
    OperatorEq,
    #[serde(rename = "virtualDestructor")]
    VirtualDestructor,
    #[serde(rename = "thisSubtraction")]
    ThisSubtraction,
    #[serde(rename = "operatorEqRetRefThis")]
    OperatorEqRetRefThis,
    #[serde(rename = "operatorEqToSelf")]
    OperatorEqToSelf,
    #[serde(rename = "functionConst")]
    FunctionConst,
}

impl CheckId {
    /// The stable wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::NoConstructor => "noConstructor",
            CheckId::UninitVar => "uninitVar",
            CheckId::OperatorEqVarError => "operatorEqVarError",
            CheckId::UnusedPrivateFunction => "unusedPrivateFunction",
            CheckId::MemsetClass => "memsetClass",
            CheckId::MemsetStruct => "memsetStruct",
            CheckId::OperatorEq => "operatorEq",
            CheckId::VirtualDestructor => "virtualDestructor",
            CheckId::ThisSubtraction => "thisSubtraction",
            CheckId::OperatorEqRetRefThis => "operatorEqRetRefThis",
            CheckId::OperatorEqToSelf => "operatorEqToSelf",
            CheckId::FunctionConst => "functionConst",
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier.
    pub id: CheckId,
    /// Severity of the finding.
    pub severity: Severity,
    /// Index of the primary anchor token.
    pub primary: usize,
    /// Index of a secondary anchor token, when the finding spans a
    /// declaration and an out-of-line definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic anchored at one token.
    pub fn new(id: CheckId, severity: Severity, tok: Tok<'_>, message: String) -> Self {
        Self {
            id,
            severity,
            primary: tok.index(),
            secondary: None,
            message,
        }
    }

    /// Attach a secondary anchor token.
    #[must_use]
    pub fn with_secondary(mut self, tok: Tok<'_>) -> Self {
        self.secondary = Some(tok.index());
        self
    }
}

/// Receiver for diagnostics.
///
/// The analyzer pushes findings into the sink as it discovers them; the
/// sink decides buffering, formatting and routing.
pub trait DiagnosticSink {
    /// Deliver one finding.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Serialize a batch of diagnostics to a JSON array.
pub fn diagnostics_to_json(diagnostics: &[Diagnostic]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(diagnostics)?)
}

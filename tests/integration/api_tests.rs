//! Engine-level API tests: determinism, gating and serialization.

use classcheck::{
    diagnostics_to_json, run_raw_checks, run_simplified_checks, tokenize, CheckId, Diagnostic,
    Settings, Severity,
};

const SAMPLE: &str = "class B { public: ~B(){} };\n\
                      class D : public B { int x; public: ~D(){ delete p; } D(); };\n\
                      D::D() { }\n\
                      struct T { std::string s; };\n\
                      void f() { T t; memset(&t, 0, sizeof(T)); }";

fn analyze(source: &str, settings: &Settings) -> Vec<Diagnostic> {
    let stream = tokenize(source).expect("tokenize");
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, settings, &mut diagnostics);
    run_raw_checks(&stream, settings, &mut diagnostics);
    diagnostics
}

#[test]
fn reruns_are_deterministic() {
    let settings = Settings::all();
    let first = analyze(SAMPLE, &settings);
    let second = analyze(SAMPLE, &settings);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn style_flag_gates_style_passes() {
    let settings = Settings {
        check_coding_style: false,
        inconclusive: false,
        ifcfg: false,
    };
    let diagnostics = analyze(SAMPLE, &settings);
    // Only the ungated memset pass may report.
    assert!(diagnostics.iter().all(|d| d.id == CheckId::MemsetStruct));
    assert!(!diagnostics.is_empty());
}

#[test]
fn severities_follow_the_catalog() {
    let diagnostics = analyze(SAMPLE, &Settings::all());
    for d in &diagnostics {
        let expected = match d.id {
            CheckId::MemsetClass
            | CheckId::MemsetStruct
            | CheckId::VirtualDestructor => Severity::Error,
            _ => Severity::Style,
        };
        assert_eq!(d.severity, expected, "{:?}", d);
    }
}

#[test]
fn wire_identifiers_are_stable() {
    assert_eq!(CheckId::NoConstructor.as_str(), "noConstructor");
    assert_eq!(CheckId::UninitVar.as_str(), "uninitVar");
    assert_eq!(CheckId::OperatorEqVarError.as_str(), "operatorEqVarError");
    assert_eq!(
        CheckId::UnusedPrivateFunction.as_str(),
        "unusedPrivateFunction"
    );
    assert_eq!(CheckId::MemsetClass.as_str(), "memsetClass");
    assert_eq!(CheckId::MemsetStruct.as_str(), "memsetStruct");
    assert_eq!(CheckId::OperatorEq.as_str(), "operatorEq");
    assert_eq!(CheckId::VirtualDestructor.as_str(), "virtualDestructor");
    assert_eq!(CheckId::ThisSubtraction.as_str(), "thisSubtraction");
    assert_eq!(
        CheckId::OperatorEqRetRefThis.as_str(),
        "operatorEqRetRefThis"
    );
    assert_eq!(CheckId::OperatorEqToSelf.as_str(), "operatorEqToSelf");
    assert_eq!(CheckId::FunctionConst.as_str(), "functionConst");
}

#[test]
fn json_serialization_uses_wire_ids() {
    let diagnostics = analyze(
        "class A { int x; public: A(); }; A::A() { }",
        &Settings::all(),
    );
    let json = diagnostics_to_json(&diagnostics).expect("serialize");
    assert!(json.contains("\"uninitVar\""), "{json}");
    assert!(json.contains("\"style\""), "{json}");
    let parsed: Vec<Diagnostic> = serde_json::from_str(&json).expect("round trip");
    assert_eq!(parsed, diagnostics);
}

#[test]
fn diagnostics_anchor_real_tokens() {
    let stream = tokenize(SAMPLE).expect("tokenize");
    let settings = Settings::all();
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    run_raw_checks(&stream, &settings, &mut diagnostics);
    for d in &diagnostics {
        assert!(stream.tok(d.primary).is_some(), "{:?}", d);
        if let Some(secondary) = d.secondary {
            assert!(stream.tok(secondary).is_some(), "{:?}", d);
        }
    }
}

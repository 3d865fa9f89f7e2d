//! Const-candidate integration tests.

use classcheck::{
    run_raw_checks, run_simplified_checks, tokenize, CheckId, Diagnostic, Settings,
};

fn analyze(source: &str) -> Vec<Diagnostic> {
    let stream = tokenize(source).expect("tokenize");
    let settings = Settings::all();
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    run_raw_checks(&stream, &settings, &mut diagnostics);
    diagnostics
}

fn const_candidates(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.id == CheckId::FunctionConst)
        .map(|d| d.message.as_str())
        .collect()
}

#[test]
fn plain_getter_can_be_const() {
    let diagnostics = analyze("class K { int x; public: int get(){ return x; } };");
    let candidates = const_candidates(&diagnostics);
    assert_eq!(candidates.len(), 1, "{:?}", diagnostics);
    assert!(candidates[0].contains("K::get"));
}

#[test]
fn out_of_line_getter_carries_both_anchors() {
    let diagnostics = analyze(
        "class K { int x; public: int get(); };\n\
         int K::get() { return x; }",
    );
    let finding = diagnostics
        .iter()
        .find(|d| d.id == CheckId::FunctionConst)
        .expect("functionConst reported");
    assert!(finding.secondary.is_some());
}

#[test]
fn member_assignment_blocks_const() {
    let diagnostics = analyze(
        "class K { int x; public: void set(int v){ x = v; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn compound_assignment_blocks_const() {
    let diagnostics = analyze(
        "class K { int x; public: void bump(int v){ x += v; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn increment_blocks_const() {
    let diagnostics = analyze(
        "class K { int x; public: void tick(){ ++x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn unknown_call_is_pessimistic() {
    let diagnostics = analyze(
        "class K { int x; public: int get(){ refresh(); return x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn local_assignment_is_fine() {
    let diagnostics = analyze(
        "class K { int x; public: int doubled(){ int local = x; return local; } };",
    );
    assert_eq!(const_candidates(&diagnostics).len(), 1, "{:?}", diagnostics);
}

#[test]
fn mutable_member_writes_do_not_block() {
    let diagnostics = analyze(
        "class K { mutable int cache; public: int get(){ cache = 1; return cache; } };",
    );
    assert_eq!(const_candidates(&diagnostics).len(), 1, "{:?}", diagnostics);
}

#[test]
fn already_const_function_is_skipped() {
    let diagnostics = analyze(
        "class K { int x; public: int get() const { return x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn virtual_functions_are_skipped() {
    let diagnostics = analyze(
        "class K { int x; public: virtual int get(){ return x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn virtual_in_base_is_skipped() {
    let diagnostics = analyze(
        "class Base { public: virtual int get(); };\n\
         class K : public Base { int x; public: int get(){ return x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn base_member_assignment_blocks_const() {
    let diagnostics = analyze(
        "class Base { public: int b; };\n\
         class K : public Base { public: void reset(){ b = 0; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn non_const_pointer_return_is_skipped() {
    let diagnostics = analyze(
        "class K { int x; public: int* ptr(){ return &x; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn const_pointer_return_is_checked() {
    let diagnostics = analyze(
        "class K { int x; public: const int* ptr(){ return &x; } };",
    );
    assert_eq!(const_candidates(&diagnostics).len(), 1, "{:?}", diagnostics);
}

#[test]
fn opaque_upper_case_return_types_are_skipped() {
    let diagnostics = analyze(
        "class K { int x; public: HANDLE handle(){ return h; } };",
    );
    assert!(const_candidates(&diagnostics).is_empty(), "{:?}", diagnostics);
}

#[test]
fn nested_class_name_is_composed() {
    let diagnostics = analyze(
        "class Outer { public: class Inner { int x; public: int get(){ return x; } }; };",
    );
    let candidates = const_candidates(&diagnostics);
    assert_eq!(candidates.len(), 1, "{:?}", diagnostics);
    assert!(candidates[0].contains("Outer::Inner::get"));
}

#[test]
fn ifcfg_disables_the_pass() {
    let stream = tokenize("class K { int x; public: int get(){ return x; } };")
        .expect("tokenize");
    let settings = Settings {
        ifcfg: true,
        ..Settings::all()
    };
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    assert!(diagnostics
        .iter()
        .all(|d| d.id != CheckId::FunctionConst));
}

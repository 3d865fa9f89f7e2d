//! Constructor-completeness integration tests: missing constructors,
//! uninitialized members and `operator=` assignment coverage.

use classcheck::{
    run_raw_checks, run_simplified_checks, tokenize, CheckId, Diagnostic, Settings, Severity,
};

fn analyze(source: &str) -> Vec<Diagnostic> {
    let stream = tokenize(source).expect("tokenize");
    let settings = Settings::all();
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    run_raw_checks(&stream, &settings, &mut diagnostics);
    diagnostics
}

fn ids(diagnostics: &[Diagnostic]) -> Vec<CheckId> {
    diagnostics.iter().map(|d| d.id).collect()
}

#[test]
fn uninit_member_in_out_of_line_constructor() {
    let diagnostics = analyze("class A { int x; public: A(); }; A::A() { }");
    assert_eq!(ids(&diagnostics), [CheckId::UninitVar]);
    assert_eq!(diagnostics[0].severity, Severity::Style);
    assert!(diagnostics[0].message.contains("A::x"), "{:?}", diagnostics);
}

#[test]
fn public_struct_member_needs_no_constructor() {
    let diagnostics = analyze("struct S { int x; };");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn declaration_without_body_is_not_checked() {
    let diagnostics = analyze("class A { public: A(); private: int x; };");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn no_constructor_with_private_data() {
    let diagnostics = analyze("class A { int x; };");
    assert_eq!(ids(&diagnostics), [CheckId::NoConstructor]);
    assert!(diagnostics[0].message.contains("'A'"));
}

#[test]
fn no_constructor_ignores_class_typed_and_static_members() {
    // A std::string member initializes itself; a static lives elsewhere.
    let diagnostics = analyze("class A { std::string s; static int count; };");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn initializer_list_counts_as_initialization() {
    let diagnostics = analyze(
        "class A { int x; int y; public: A(); };\n\
         A::A() : x(0) { y = 1; }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn assignment_in_initializer_expression_marks_second_member() {
    let diagnostics = analyze(
        "class A { int x; int y; public: A() : x(y = 1) { } };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn partially_initialized_constructor_reports_the_rest() {
    let diagnostics = analyze(
        "class A { int x; int y; public: A() { x = 0; } };",
    );
    assert_eq!(ids(&diagnostics), [CheckId::UninitVar]);
    assert!(diagnostics[0].message.contains("A::y"));
}

#[test]
fn memset_this_initializes_everything() {
    let diagnostics = analyze(
        "class A { int x; int y; public: A() { memset(this, 0, sizeof(A)); } };",
    );
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn member_function_calls_are_followed() {
    let diagnostics = analyze(
        "class A { int x; int y; public: A() { init(); } void init(); };\n\
         void A::init() { x = 0; y = 0; }",
    );
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn call_cycles_bail_out_conservatively() {
    let diagnostics = analyze(
        "class A { int x; public: A() { f(); } \
         void f() { g(); } void g() { f(); } };",
    );
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn passing_this_assumes_full_initialization() {
    let diagnostics = analyze(
        "class A { int x; public: A() { setup(this); } };",
    );
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn base_classes_suppress_unresolved_call_reports() {
    let diagnostics = analyze(
        "class B { public: void setup(); };\n\
         class A : public B { int x; public: A() { setup(); } };",
    );
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn operator_eq_missing_assignment_is_reported() {
    let diagnostics = analyze(
        "class C { int x; int y; public: void operator=(const C& c) { x = c.x; } };",
    );
    let ids = ids(&diagnostics);
    assert!(ids.contains(&CheckId::OperatorEqVarError), "{:?}", diagnostics);
    assert!(diagnostics
        .iter()
        .any(|d| d.id == CheckId::OperatorEqVarError && d.message.contains("C::y")));
}

#[test]
fn unrelated_operator_eq_overload_is_ignored() {
    // The parameter list never names the class, so missing assignments are
    // not this operator's business.
    let diagnostics = analyze(
        "class C { int x; public: C() { x = 0; } void operator=(int value) { } };",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::OperatorEqVarError));
}

#[test]
fn private_constructor_reports_nothing() {
    let diagnostics = analyze("class A { int x; A() { } };");
    assert!(ids(&diagnostics).iter().all(|&id| id != CheckId::UninitVar));
}

#[test]
fn published_section_is_auto_initialized() {
    let diagnostics = analyze(
        "class A { __published: int x; public: A() { } };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn removing_private_labels_never_increases_reports() {
    let with_labels = analyze(
        "class A { public: A() { } private: int x; void helper(); };",
    );
    let without_labels = analyze(
        "class A { public: A() { } int x; void helper(); };",
    );
    let count = |diags: &[Diagnostic], id: CheckId| {
        diags.iter().filter(|d| d.id == id).count()
    };
    assert!(
        count(&without_labels, CheckId::UninitVar) <= count(&with_labels, CheckId::UninitVar)
    );
    assert!(
        count(&without_labels, CheckId::UnusedPrivateFunction)
            <= count(&with_labels, CheckId::UnusedPrivateFunction)
    );
}

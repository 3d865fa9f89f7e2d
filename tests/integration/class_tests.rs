//! Class-level integration tests: virtual destructors, byte primitives on
//! aggregates and unused private functions.

use classcheck::{
    run_raw_checks, run_simplified_checks, tokenize, tokenize_parts, CheckId, Diagnostic,
    Settings, Severity,
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

// =============================================================================
// Virtual destructor
// =============================================================================

#[test]
fn non_virtual_base_destructor_is_reported() {
    let diagnostics = analyze(
        "class B { public: ~B(){} };\n\
         class D : public B { public: ~D(){ delete p; } };",
    );
    assert_eq!(ids(&diagnostics), [CheckId::VirtualDestructor]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("Class B"));
    assert!(diagnostics[0].message.contains("class D"));
}

#[test]
fn virtual_base_destructor_is_fine() {
    let diagnostics = analyze(
        "class B { public: virtual ~B(){} };\n\
         class D : public B { public: ~D(){ delete p; } };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn empty_derived_destructor_is_tolerated() {
    let diagnostics = analyze(
        "class B { public: ~B(){} };\n\
         class D : public B { public: ~D(){} };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn private_inheritance_is_skipped() {
    let diagnostics = analyze(
        "class B { public: ~B(){} };\n\
         class D : private B { public: ~D(){ delete p; } };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn protected_base_destructor_cannot_be_deleted_through() {
    let diagnostics = analyze(
        "class B { protected: ~B(){} };\n\
         class D : public B { public: ~D(){ delete p; } };",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn base_with_own_bases_is_skipped() {
    let diagnostics = analyze(
        "class G { public: virtual ~G(){} };\n\
         class B : public G { public: ~B(){} };\n\
         class D : public B { public: ~D(){ delete p; } };",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::VirtualDestructor));
}

#[test]
fn missing_destructor_with_visible_class_is_reported() {
    let diagnostics = analyze(
        "class B { public: void f(); };\n\
         class D : public B { public: ~D(){ delete p; } };",
    );
    assert!(ids(&diagnostics).contains(&CheckId::VirtualDestructor));
}

#[test]
fn inconclusive_flag_gates_the_pass() {
    let stream = tokenize(
        "class B { public: ~B(){} };\n\
         class D : public B { public: ~D(){ delete p; } };",
    )
    .expect("tokenize");
    let settings = Settings::default();
    assert!(!settings.inconclusive);
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

// =============================================================================
// memset / memcpy / memmove on aggregates
// =============================================================================

#[test]
fn memset_on_struct_with_std_string() {
    let diagnostics = analyze(
        "struct T { std::string s; };\n\
         void f() { T t; memset(&t, 0, sizeof(T)); }",
    );
    assert_eq!(ids(&diagnostics), [CheckId::MemsetStruct]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(diagnostics[0].message.contains("'memset'"));
    assert!(diagnostics[0].message.contains("std::string"));
}

#[test]
fn memset_on_plain_struct_is_fine() {
    let diagnostics = analyze(
        "struct P { int x; char buf[8]; };\n\
         void f() { P p; memset(&p, 0, sizeof(P)); }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn memcpy_with_five_token_shape() {
    let diagnostics = analyze(
        "struct T { std::string s; };\n\
         void f(T* a, T* b) { memcpy(a, b, sizeof(T)); }",
    );
    assert!(diagnostics
        .iter()
        .any(|d| d.id == CheckId::MemsetStruct && d.message.contains("'memcpy'")));
}

#[test]
fn template_member_by_value_is_reported() {
    let diagnostics = analyze(
        "struct T { std::vector<int> v; };\n\
         void f(T* t) { memset(t, 0, sizeof(T)); }",
    );
    assert!(diagnostics
        .iter()
        .any(|d| d.id == CheckId::MemsetStruct && d.message.contains("std::vector")));
}

#[test]
fn template_member_pointer_is_harmless() {
    let diagnostics = analyze(
        "struct T { std::vector<int>* v; };\n\
         void f(T* t) { memset(t, 0, sizeof(T)); }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn sizeof_of_unrelated_type_is_ignored() {
    let diagnostics = analyze(
        "struct T { std::string s; };\n\
         void f(char* p) { memset(p, 0, sizeof(int)); }",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

// =============================================================================
// Unused private functions
// =============================================================================

#[test]
fn unused_private_function_is_reported() {
    let diagnostics = analyze(
        "class Fred { private: void unused(); public: Fred() { } };",
    );
    assert_eq!(ids(&diagnostics), [CheckId::UnusedPrivateFunction]);
    assert!(diagnostics[0].message.contains("Fred::unused"));
}

#[test]
fn called_private_function_is_used() {
    let diagnostics = analyze(
        "class Fred { private: void helper(); public: Fred() { helper(); } };",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

#[test]
fn call_from_out_of_line_member_counts() {
    let diagnostics = analyze(
        "class Fred { private: void helper(); public: void go(); };\n\
         void Fred::go() { helper(); }",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

#[test]
fn initializer_list_call_counts() {
    let diagnostics = analyze(
        "class Fred { int x; int compute(); public: Fred(); };\n\
         Fred::Fred() : x(compute()) { }",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

#[test]
fn friend_declaration_disables_the_check() {
    let diagnostics = analyze(
        "class Fred { friend class Other; private: void unused(); public: Fred() { } };",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

#[test]
fn function_pointer_use_counts() {
    let diagnostics = analyze(
        "class Fred { private: static void callback(); public: Fred() { } void go(); };\n\
         void Fred::go() { register_handler(callback); }",
    );
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

#[test]
fn classes_from_headers_are_not_checked() {
    let stream = tokenize_parts(&[
        "void nothing_here();",
        "class Fred { private: void unused(); public: Fred() { } };",
    ])
    .expect("tokenize");
    let settings = Settings::all();
    let mut diagnostics = Vec::new();
    run_simplified_checks(&stream, &settings, &mut diagnostics);
    assert!(ids(&diagnostics)
        .iter()
        .all(|&id| id != CheckId::UnusedPrivateFunction));
}

//! trybuild compile-time tests for syringe_macros

#[test]
fn trybuild_injectable_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.pass("tests/trybuild/injectable_generic_ok.rs");
}

#[test]
fn ui_injectable_interface_must_be_implemented() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/trybuild/injectable_missing_interface.rs");
}

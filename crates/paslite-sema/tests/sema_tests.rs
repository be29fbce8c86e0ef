//! Integration tests driving the resolver and type checker over real
//! source text.

use paslite_lexer::Scanner;
use paslite_parser::Parser;
use paslite_sema::{Resolver, TypeChecker};
use paslite_types::ast::Stmt;

fn parse(source: &str) -> Vec<Stmt> {
    let file = paslite_types::SourceFile::new("test.pas", source);
    let lexed = Scanner::new(&file).scan_tokens();
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let parsed = Parser::new(lexed.tokens).parse();
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    parsed.statements
}

fn check(source: &str) -> Result<(), paslite_types::PasError> {
    TypeChecker::new().check(&parse(source))
}

// ── Resolver ─────────────────────────────────────────────────────────

#[test]
fn test_resolver_records_local_distance() {
    let statements = parse(
        "begin\n\
           var A: Integer := 1;\n\
           Print A;\n\
         end",
    );
    let (locals, errors) = Resolver::new().resolve(&statements);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(locals.len(), 1);
    assert_eq!(locals.values().next(), Some(&0));
}

#[test]
fn test_resolver_globals_have_no_entry() {
    let statements = parse("var A: Integer := 1;\nPrint A;");
    let (locals, errors) = Resolver::new().resolve(&statements);
    assert!(errors.is_empty());
    assert!(locals.is_empty());
}

#[test]
fn test_resolver_inner_block_sees_outer_local() {
    let statements = parse(
        "begin\n\
           var Abc: Integer := 2;\n\
           begin\n\
             Abc := 1;\n\
           end;\n\
           Print Abc;\n\
         end",
    );
    let (locals, errors) = Resolver::new().resolve(&statements);
    assert!(errors.is_empty());
    // The inner assignment crosses one scope boundary.
    assert!(locals.values().any(|d| *d == 1));
}

#[test]
fn test_resolver_rejects_duplicate_in_scope() {
    let statements = parse(
        "begin\n\
           var A: Integer := 1;\n\
           var A: Integer := 2;\n\
         end",
    );
    let (_, errors) = Resolver::new().resolve(&statements);
    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .message
        .contains("Already a variable with this name in this scope."));
}

#[test]
fn test_resolver_rejects_top_level_exit() {
    let statements = parse("Exit 1;");
    let (_, errors) = Resolver::new().resolve(&statements);
    assert!(errors
        .iter()
        .any(|e| e.message == "Can't return from top-level code."));
}

#[test]
fn test_resolver_rejects_this_outside_class() {
    let statements = parse("Print this;");
    let (_, errors) = Resolver::new().resolve(&statements);
    assert!(errors
        .iter()
        .any(|e| e.message == "Can't use 'this' outside of a class."));
}

#[test]
fn test_resolver_rejects_self_inheritance() {
    let statements = parse("class Oops (Oops); begin end");
    let (_, errors) = Resolver::new().resolve(&statements);
    assert!(errors
        .iter()
        .any(|e| e.message == "A class can't inherit from itself."));
}

// ── Type checker ─────────────────────────────────────────────────────

#[test]
fn test_matching_declaration_passes() {
    assert!(check("var N: Integer := 1;").is_ok());
    assert!(check("var S: String := 'hi';").is_ok());
    assert!(check("var D: Double := 1.5;").is_ok());
}

#[test]
fn test_mismatched_declaration_fails() {
    let err = check("var N: Integer := 'hi';").unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_any_accepts_everything() {
    assert!(check("var X: Any := 1;\nX := 'text';").is_ok());
    assert!(check("var X := 1;\nX := 'text';").is_ok());
}

#[test]
fn test_assignment_checked_against_declared_type() {
    let err = check("var N: Integer := 1;\nN := 'hi';").unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_subclass_satisfies_superclass() {
    assert!(check(
        "class A; begin end\n\
         class B (A); begin end\n\
         var X: A := B();",
    )
    .is_ok());
}

#[test]
fn test_unrelated_class_fails() {
    let err = check(
        "class A; begin end\n\
         class B; begin end\n\
         var X: A := B();",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_function_return_type_checked() {
    assert!(check(
        "function F(): Integer;\n\
         begin\n\
           Exit 1;\n\
         end",
    )
    .is_ok());

    let err = check(
        "function F(): Integer;\n\
         begin\n\
           Exit 'no';\n\
         end",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_procedure_cannot_return_value() {
    let err = check(
        "procedure P();\n\
         begin\n\
           Exit 1;\n\
         end",
    )
    .unwrap_err();
    assert_eq!(err.message, "Can't return value from procedure.");
}

#[test]
fn test_call_reduces_to_declared_return_type() {
    let err = check(
        "function F(): String;\n\
         begin\n\
           Exit 'x';\n\
         end\n\
         var N: Integer := F();",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_enum_members_typed_by_enum_name() {
    assert!(check(
        "type Color = (Red, Green, Blue);\n\
         var C: Color := Red;",
    )
    .is_ok());

    let err = check(
        "type Color = (Red, Green, Blue);\n\
         var N: Integer := Red;",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_duplicate_enum_member_rejected() {
    let err = check(
        "type A = (Red);\n\
         type B = (Red);",
    )
    .unwrap_err();
    assert!(err.message.contains("already exists!!!"));
}

#[test]
fn test_inferred_type_flows_through_member_access() {
    // X is declared Any; the initializer pins its inferred class so
    // the field access resolves to Integer.
    let err = check(
        "class Point;\n\
         var\n\
           X: Integer;\n\
         begin\n\
         end\n\
         var P := Point();\n\
         var S: String := P.X;",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_string_concatenation_reduces_to_string() {
    assert!(check("var S: String := 'a' + 'b';").is_ok());
    assert!(check("var S: String := 'n = ' + Str(1);").is_ok());
}

#[test]
fn test_comparison_reduces_to_boolean() {
    assert!(check("var B: Boolean := 1 < 2;").is_ok());
    let err = check("var N: Integer := 1 < 2;").unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_subscript_on_typed_list_yields_element_type() {
    let err = check(
        "var Xs: List of Integer := List();\n\
         var S: String := Xs[0];",
    )
    .unwrap_err();
    assert_eq!(err.message, "Type mismatch!");
}

#[test]
fn test_string_subscript_yields_char() {
    assert!(check(
        "var S: String := 'abc';\n\
         var C: Char := S[0];",
    )
    .is_ok());
}

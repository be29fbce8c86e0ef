//! End-to-end evaluation tests: source text through the whole
//! pipeline, asserting on captured output or the runtime fault.

use paslite_eval::{Interpreter, RuntimeError, TestRunner};
use paslite_lexer::Scanner;
use paslite_parser::Parser;
use paslite_sema::Resolver;
use paslite_types::SourceFile;

fn run(source: &str) -> Result<String, RuntimeError> {
    let file = SourceFile::new("test.pas", source);
    let lexed = Scanner::new(&file).scan_tokens();
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let parsed = Parser::new(lexed.tokens).parse();
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    let (locals, errors) = Resolver::new().resolve(&parsed.statements);
    assert!(errors.is_empty(), "resolve errors: {errors:?}");

    let mut interpreter = Interpreter::new(locals);
    let output = interpreter.capture_output();
    interpreter.interpret(&parsed.statements)?;
    let text = output.borrow().clone();
    Ok(text)
}

fn output(source: &str) -> String {
    match run(source) {
        Ok(text) => text,
        Err(error) => panic!("runtime error: {}", error.message),
    }
}

fn fails(source: &str) -> RuntimeError {
    match run(source) {
        Ok(text) => panic!("expected runtime error, got output: {text:?}"),
        Err(error) => error,
    }
}

// ── Arithmetic and operators ─────────────────────────────────────────

#[test]
fn test_integer_arithmetic_stays_integer() {
    assert_eq!(output("WriteLn(1 + 2);"), "3\n");
    assert_eq!(output("WriteLn(7 / 2);"), "3\n");
    assert_eq!(output("WriteLn(2 * 3 - 1);"), "5\n");
}

#[test]
fn test_double_arithmetic() {
    assert_eq!(output("WriteLn(1.5 + 2.0);"), "3.5\n");
    assert_eq!(output("WriteLn(4.0 / 2.0);"), "2\n");
}

#[test]
fn test_mixed_numeric_operands_fault() {
    assert_eq!(
        fails("WriteLn(1 + 1.0);").message,
        "Operands must be two numbers, or two strings."
    );
    assert_eq!(fails("WriteLn(1 - 1.0);").message, "Operands must be numbers.");
}

#[test]
fn test_plus_mismatch_names_both_families() {
    assert_eq!(
        fails("WriteLn(True + 1);").message,
        "Operands must be two numbers, or two strings."
    );
}

#[test]
fn test_integer_division_by_zero_faults() {
    assert_eq!(fails("WriteLn(1 / 0);").message, "Division by zero.");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(output("WriteLn('a' + 'b');"), "ab\n");
    assert_eq!(output("WriteLn('n = ' + 1);"), "n = 1\n");
}

#[test]
fn test_integer_never_equals_double() {
    assert_eq!(output("WriteLn(1 = 1.0);"), "false\n");
    assert_eq!(output("WriteLn(1 = 1);"), "true\n");
    assert_eq!(output("WriteLn(1 <> 2);"), "true\n");
}

#[test]
fn test_char_arithmetic_yields_integer_code_points() {
    assert_eq!(output("WriteLn(#66 - #65);"), "1\n");
    assert_eq!(output("WriteLn(#2 * #3);"), "6\n");
    assert_eq!(output("WriteLn(#66 / #2);"), "33\n");
    assert_eq!(fails("WriteLn(#65 / #0);").message, "Division by zero.");
}

#[test]
fn test_char_comparison() {
    assert_eq!(output("WriteLn(#66 > #65);"), "true\n");
    assert_eq!(output("WriteLn(#65 > #65);"), "false\n");
    assert_eq!(output("WriteLn(#65 <= #66);"), "true\n");
}

#[test]
fn test_logical_operators_short_circuit() {
    assert_eq!(output("WriteLn(False and True);"), "false\n");
    assert_eq!(output("WriteLn(True or False);"), "true\n");
    assert_eq!(output("WriteLn(nil or 'fallback');"), "fallback\n");
}

#[test]
fn test_unary_operators() {
    assert_eq!(output("WriteLn(-3);"), "-3\n");
    assert_eq!(output("WriteLn(not True);"), "false\n");
    assert_eq!(output("WriteLn(not nil);"), "true\n");
}

// ── Variables and scope ──────────────────────────────────────────────

#[test]
fn test_block_assignment_writes_outer_variable() {
    let source = "var Abc := 2;\n\
                  begin\n\
                    Abc := 1;\n\
                  end\n\
                  WriteLn(Abc);";
    assert_eq!(output(source), "1\n");
}

#[test]
fn test_block_declaration_shadows() {
    let source = "var Abc := 2;\n\
                  begin\n\
                    var Abc := 1;\n\
                    WriteLn(Abc);\n\
                  end\n\
                  WriteLn(Abc);";
    assert_eq!(output(source), "1\n2\n");
}

#[test]
fn test_uninitialized_variable_is_nil() {
    assert_eq!(output("var X: Any;\nWriteLn(X);"), "nil\n");
}

#[test]
fn test_undefined_variable_faults() {
    assert_eq!(fails("WriteLn(Missing);").message, "Undefined variable 'Missing'.");
}

#[test]
fn test_print_statement() {
    assert_eq!(output("Print 'hi';"), "hi\n");
}

// ── Control flow ─────────────────────────────────────────────────────

#[test]
fn test_while_with_break() {
    let source = "var I := 0;\n\
                  while I < 10 do\n\
                  begin\n\
                    I := I + 1;\n\
                    if I = 3 then break;\n\
                  end\n\
                  WriteLn(I);";
    assert_eq!(output(source), "3\n");
}

#[test]
fn test_for_loop_desugars_to_while() {
    let source = "var Total := 0;\n\
                  for var I := 0; I < 5; I := I + 1 do\n\
                  begin\n\
                    Total := Total + I;\n\
                  end\n\
                  WriteLn(Total);";
    assert_eq!(output(source), "10\n");
}

#[test]
fn test_case_selects_matching_arm() {
    let source = "var X := 2;\n\
                  case X of\n\
                    1: WriteLn('one');\n\
                    2, 3: WriteLn('two or three');\n\
                    else WriteLn('other');\n\
                  end";
    assert_eq!(output(source), "two or three\n");

    let source = "var X := 9;\n\
                  case X of\n\
                    1: WriteLn('one');\n\
                    else WriteLn('other');\n\
                  end";
    assert_eq!(output(source), "other\n");
}

// ── Functions and overloads ──────────────────────────────────────────

#[test]
fn test_function_call_and_return() {
    let source = "function Add(A: Integer, B: Integer): Integer;\n\
                  begin\n\
                    Exit A + B;\n\
                  end\n\
                  WriteLn(Add(2, 3));";
    assert_eq!(output(source), "5\n");
}

#[test]
fn test_overload_dispatch_by_argument_type() {
    let source = "function F(X: Integer): String;\n\
                  begin\n\
                    Exit 'int';\n\
                  end\n\
                  function F(X: String): String;\n\
                  begin\n\
                    Exit 'str';\n\
                  end\n\
                  function F(X: Boolean): String;\n\
                  begin\n\
                    Exit 'bool';\n\
                  end\n\
                  WriteLn(F(1));\n\
                  WriteLn(F('x'));\n\
                  WriteLn(F(True));";
    assert_eq!(output(source), "int\nstr\nbool\n");
}

#[test]
fn test_no_matching_signature_faults() {
    let source = "function F(X: Integer): String;\n\
                  begin\n\
                    Exit 'int';\n\
                  end\n\
                  WriteLn(F(1.5));";
    assert_eq!(fails(source).message, "No matching signature for function.");
}

#[test]
fn test_any_parameter_accepts_everything() {
    let source = "function Id(X): Any;\n\
                  begin\n\
                    Exit X;\n\
                  end\n\
                  WriteLn(Id(1));\n\
                  WriteLn(Id('s'));";
    assert_eq!(output(source), "1\ns\n");
}

#[test]
fn test_procedure_returns_nil() {
    let source = "procedure Noop();\n\
                  begin\n\
                  end\n\
                  WriteLn(Noop());";
    assert_eq!(output(source), "nil\n");
}

#[test]
fn test_closure_captures_environment() {
    let source = "function Counter(): Any;\n\
                  var N := 0;\n\
                  begin\n\
                    function Bump(): Integer;\n\
                    begin\n\
                      N := N + 1;\n\
                      Exit N;\n\
                    end\n\
                    Exit Bump;\n\
                  end\n\
                  var B := Counter();\n\
                  WriteLn(B());\n\
                  WriteLn(B());";
    assert_eq!(output(source), "1\n2\n");
}

// ── Classes ──────────────────────────────────────────────────────────

#[test]
fn test_constructor_and_implicit_this_fields() {
    let source = "class Point;\n\
                  var X: Integer;\n\
                  var Y: Integer;\n\
                  begin\n\
                    constructor Init(AX: Integer, AY: Integer);\n\
                    begin\n\
                      X := AX;\n\
                      Y := AY;\n\
                    end\n\
                    function Sum(): Integer;\n\
                    begin\n\
                      Exit X + Y;\n\
                    end\n\
                  end\n\
                  var P := Point(3, 4);\n\
                  WriteLn(P.Sum());";
    assert_eq!(output(source), "7\n");
}

#[test]
fn test_field_initializers_run_at_construction() {
    let source = "class Greeter;\n\
                  var Name: String := 'World';\n\
                  begin\n\
                    function Greet(): String;\n\
                    begin\n\
                      Exit 'Hello, ' + Name;\n\
                    end\n\
                  end\n\
                  var G := Greeter();\n\
                  WriteLn(G.Greet());";
    assert_eq!(output(source), "Hello, World\n");
}

#[test]
fn test_inheritance_and_super() {
    let source = "class A;\n\
                  begin\n\
                    function Speak(): String;\n\
                    begin\n\
                      Exit 'A';\n\
                    end\n\
                  end\n\
                  class B (A);\n\
                  begin\n\
                    function Speak(): String;\n\
                    begin\n\
                      Exit super.Speak() + 'B';\n\
                    end\n\
                  end\n\
                  var X := B();\n\
                  WriteLn(X.Speak());";
    assert_eq!(output(source), "AB\n");
}

#[test]
fn test_method_overloads_dispatch_through_instance() {
    let source = "class Fmt;\n\
                  begin\n\
                    function Show(X: Integer): String;\n\
                    begin\n\
                      Exit 'int';\n\
                    end\n\
                    function Show(X: String): String;\n\
                    begin\n\
                      Exit 'str';\n\
                    end\n\
                  end\n\
                  var F := Fmt();\n\
                  WriteLn(F.Show(1));\n\
                  WriteLn(F.Show('a'));";
    assert_eq!(output(source), "int\nstr\n");
}

#[test]
fn test_method_calls_sibling_method_without_this() {
    let source = "class C;\n\
                  begin\n\
                    function A(): Integer;\n\
                    begin\n\
                      Exit B() + 1;\n\
                    end\n\
                    function B(): Integer;\n\
                    begin\n\
                      Exit 5;\n\
                    end\n\
                  end\n\
                  var O := C();\n\
                  WriteLn(O.A());";
    assert_eq!(output(source), "6\n");
}

#[test]
fn test_initializer_returns_instance() {
    let source = "class P;\n\
                  begin\n\
                    constructor Init();\n\
                    begin\n\
                      Exit;\n\
                    end\n\
                  end\n\
                  WriteLn(P());";
    assert_eq!(output(source), "P instance\n");
}

#[test]
fn test_undefined_property_faults() {
    let source = "class C;\n\
                  begin\n\
                  end\n\
                  var O := C();\n\
                  WriteLn(O.Missing);";
    assert_eq!(fails(source).message, "Undefined property 'Missing'.");
}

#[test]
fn test_property_on_non_instance_faults() {
    assert_eq!(fails("WriteLn(1 .X);").message, "Only instances have properties.");
}

// ── Enums ────────────────────────────────────────────────────────────

#[test]
fn test_enum_members_display_and_truthiness() {
    let source = "type Color = (Red, Green, Blue);\n\
                  WriteLn(Red);\n\
                  WriteLn(Blue);\n\
                  if Green then WriteLn('green is truthy');\n\
                  if Red then WriteLn('no') else WriteLn('red is falsey');";
    assert_eq!(
        output(source),
        "Red\nBlue\ngreen is truthy\nred is falsey\n"
    );
}

#[test]
fn test_enum_equality() {
    let source = "type Color = (Red, Green, Blue);\n\
                  WriteLn(Green = Green);\n\
                  WriteLn(Green = Blue);";
    assert_eq!(output(source), "true\nfalse\n");
}

// ── Exceptions ───────────────────────────────────────────────────────

#[test]
fn test_raise_caught_by_matching_clause() {
    let source = "try\n\
                    raise 'boom';\n\
                  except\n\
                    on E: String do WriteLn('caught ' + E);\n\
                  end";
    assert_eq!(output(source), "caught boom\n");
}

#[test]
fn test_unmatched_clause_falls_to_default() {
    let source = "try\n\
                    raise 42;\n\
                  except\n\
                    on E: String do WriteLn('string');\n\
                    WriteLn('default');\n\
                  end";
    assert_eq!(output(source), "default\n");
}

#[test]
fn test_unhandled_raise_propagates() {
    let source = "try\n\
                    raise 42;\n\
                  except\n\
                    on E: String do WriteLn('string');\n\
                  end";
    assert_eq!(fails(source).message, "42");
}

#[test]
fn test_clause_matches_superclass_of_raised_instance() {
    let source = "class Failure;\n\
                  begin\n\
                  end\n\
                  class IoFailure (Failure);\n\
                  begin\n\
                  end\n\
                  try\n\
                    raise IoFailure();\n\
                  except\n\
                    on E: Failure do WriteLn('caught');\n\
                  end";
    assert_eq!(output(source), "caught\n");
}

#[test]
fn test_runtime_fault_is_catchable() {
    let source = "try\n\
                    WriteLn(1 / 0);\n\
                  except\n\
                    on E do WriteLn('caught: ' + E);\n\
                  end";
    assert_eq!(output(source), "caught: Division by zero.\n");
}

// ── Containers and subscripts ────────────────────────────────────────

#[test]
fn test_list_operations() {
    let source = "var Xs := List();\n\
                  Xs.add(1);\n\
                  Xs.add(2);\n\
                  WriteLn(Xs.length);\n\
                  WriteLn(Xs[1]);\n\
                  WriteLn(Xs);";
    assert_eq!(output(source), "2\n2\n[1, 2]\n");
}

#[test]
fn test_list_literal() {
    assert_eq!(output("WriteLn([1, 2, 3]);"), "[1, 2, 3]\n");
    assert_eq!(output("WriteLn([]);"), "[]\n");
}

#[test]
fn test_map_operations() {
    let source = "var M := Map();\n\
                  M.put('a', 1);\n\
                  WriteLn(M.get('a'));\n\
                  WriteLn(M.contains('b'));\n\
                  WriteLn(M);";
    assert_eq!(output(source), "1\nfalse\n<map>\n");
}

#[test]
fn test_map_literal() {
    let source = "var M := ['a': 1];\n\
                  WriteLn(M.get('a'));";
    assert_eq!(output(source), "1\n");
}

#[test]
fn test_array_operations() {
    let source = "var A := Array(3);\n\
                  A.set(0, 'x');\n\
                  WriteLn(A.get(0));\n\
                  WriteLn(A.length);\n\
                  WriteLn(A[1]);";
    assert_eq!(output(source), "x\n3\nnil\n");
}

#[test]
fn test_stack_operations() {
    let source = "var S := Stack();\n\
                  S.push(1);\n\
                  S.push(2);\n\
                  WriteLn(S.peek());\n\
                  WriteLn(S.pop());\n\
                  WriteLn(S.length);\n\
                  WriteLn(S.isempty());";
    assert_eq!(output(source), "2\n2\n1\nfalse\n");
}

#[test]
fn test_containers_are_shared_references() {
    let source = "procedure Fill(Xs: List);\n\
                  begin\n\
                    Xs.add(9);\n\
                  end\n\
                  var Xs := List();\n\
                  Fill(Xs);\n\
                  WriteLn(Xs.length);";
    assert_eq!(output(source), "1\n");
}

#[test]
fn test_string_subscript_yields_char() {
    assert_eq!(output("WriteLn('abc'[1]);"), "b\n");
}

#[test]
fn test_subscript_out_of_range_faults() {
    assert_eq!(fails("WriteLn('abc'[5]);").message, "Subscript out of range.");
}

#[test]
fn test_subscript_on_non_ordinal_faults() {
    assert_eq!(
        fails("WriteLn(1[0]);").message,
        "Subscript target should be an ordinal."
    );
}

#[test]
fn test_cannot_set_properties_on_containers() {
    let source = "var Xs := List();\n\
                  Xs.Size := 3;";
    assert_eq!(fails(source).message, "Can't add properties to lists.");
}

// ── Natives ──────────────────────────────────────────────────────────

#[test]
fn test_str_copy_length() {
    assert_eq!(output("WriteLn(Str(42));"), "42\n");
    assert_eq!(output("WriteLn(Str(nil));"), "nil\n");
    assert_eq!(output("WriteLn(Copy('paslite', 0, 3));"), "pas\n");
    assert_eq!(output("WriteLn(Length('abcd'));"), "4\n");
}

#[test]
fn test_write_does_not_append_newline() {
    assert_eq!(output("Write('a');\nWrite('b');"), "ab");
}

#[test]
fn test_calling_a_non_callable_faults() {
    assert_eq!(fails("var X := 1;\nX();").message, "Can only call functions and classes.");
}

#[test]
fn test_arity_mismatch_faults() {
    let source = "function F(X: Integer): Integer;\n\
                  begin\n\
                    Exit X;\n\
                  end\n\
                  F(1, 2);";
    assert_eq!(fails(source).message, "No matching signature for function.");
}

// ── Inline tests ─────────────────────────────────────────────────────

#[test]
fn test_runner_reports_pass_and_fail() {
    let source = "function Add(A: Integer, B: Integer): Integer;\n\
                  begin\n\
                    Exit A + B;\n\
                  end\n\
                  test 'addition works';\n\
                  begin\n\
                    AssertEqual(4, Add(2, 2));\n\
                  end\n\
                  test 'this one fails';\n\
                  begin\n\
                    AssertTrue(False);\n\
                  end";
    let file = SourceFile::new("test.pas", source);
    let lexed = Scanner::new(&file).scan_tokens();
    assert!(lexed.errors.is_empty());
    let parsed = Parser::new(lexed.tokens).parse();
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    let (locals, errors) = Resolver::new().resolve(&parsed.statements);
    assert!(errors.is_empty(), "{errors:?}");

    let mut runner = TestRunner::new(locals);
    let summary = runner.run(&parsed.statements).unwrap();

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.passed(), 1);
    assert_eq!(summary.failed(), 1);
    assert!(!summary.all_passed());
    assert_eq!(summary.results[0].name, "addition works");
    assert!(summary.results[0].passed);
    assert_eq!(summary.results[1].name, "this one fails");
    assert_eq!(
        summary.results[1].message.as_deref(),
        Some("Assertion 'left = right' failed.")
    );
    assert!(format!("{summary}").contains("1 passed, 1 failed"));
}

#[test]
fn test_assert_equal_message_carries_both_values() {
    let source = "test 'mismatch';\n\
                  begin\n\
                    AssertEqual(1, 2);\n\
                  end";
    let file = SourceFile::new("test.pas", source);
    let lexed = Scanner::new(&file).scan_tokens();
    let parsed = Parser::new(lexed.tokens).parse();
    let (locals, _) = Resolver::new().resolve(&parsed.statements);

    let mut runner = TestRunner::new(locals);
    let summary = runner.run(&parsed.statements).unwrap();
    assert_eq!(
        summary.results[0].message.as_deref(),
        Some("Assertion 'left = right' failed.  Expected '1' but got '2'.")
    );
}

use ebs_eval::{ControlFlowError, RunError, ScriptErrorKind};
use ebs_ir::ExceptionKind;
use pretty_assertions::assert_eq;

use crate::common::run;

fn raised_kind(error: &RunError) -> ScriptErrorKind {
    match error {
        RunError::Runtime(error) => error.kind.clone(),
        RunError::ControlFlow(error) => panic!("expected a runtime error, got {error}"),
    }
}

// Exceptions

#[test]
fn test_math_error_in_typed_declaration_is_caught() {
    let run = run("try { var x: int = 10 / 0; } exceptions { when MATH_ERROR { print \"caught\"; } }");
    assert_eq!(run.lines(), vec!["caught"]);
}

#[test]
fn test_custom_exception_single_capture_gets_first_argument() {
    let run = run("try { raise exception Boom(\"a\", 1, 2); } exceptions { when Boom(m) { print m; } }");
    assert_eq!(run.lines(), vec!["a"]);
}

#[test]
fn test_validation_message_is_captured() {
    let run = run(
        "try { raise exception VALIDATION_ERROR(\"x\"); } exceptions {\n\
           when VALIDATION_ERROR(m) { print m == \"x\"; }\n\
         }",
    );
    assert_eq!(run.lines(), vec!["true"]);
}

#[test]
fn test_only_first_matching_handler_runs() {
    let run = run(
        "try { var s = \"a\" - 1; } exceptions {\n\
           when TYPE_ERROR { print \"type\"; }\n\
           when ANY_ERROR { print \"any\"; }\n\
         }",
    );
    assert_eq!(run.lines(), vec!["type"]);
}

#[test]
fn test_uncaught_custom_exception_message() {
    let run = run("raise exception Boom(\"disk\", 3);");
    let RunError::Runtime(error) = run.error() else {
        panic!("expected a runtime error");
    };
    assert_eq!(error.kind, ScriptErrorKind::Custom("Boom".to_string()));
    assert_eq!(error.message, "Boom: disk, 3");
}

#[test]
fn test_nested_try_rethrows_outward() {
    let run = run(
        "try {\n\
           try { var z = 1 % 0; } exceptions { when TYPE_ERROR { print \"inner\"; } }\n\
         } exceptions { when MATH_ERROR(m) { print \"outer: \" + m; } }",
    );
    assert_eq!(run.lines(), vec!["outer: modulo by zero"]);
}

// Scoping

#[test]
fn test_while_body_variable_is_gone_after_loop() {
    let run = run("var i = 0;\nwhile i < 2 { var inner = i; i++; }\nprint inner;");
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::NotFound)
    );
}

#[test]
fn test_caller_local_is_invisible_in_callee() {
    let run = run(
        "callee { print local; }\n\
         caller { var local = 1; call callee(); }\n\
         call caller();",
    );
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::NotFound)
    );
}

#[test]
fn test_passing_a_local_makes_it_visible() {
    let run = run(
        "callee(local: int) { print local; }\n\
         caller { var local = 1; call callee(local); }\n\
         call caller();",
    );
    assert_eq!(run.lines(), vec!["1"]);
}

#[test]
fn test_forward_reference_to_named_block() {
    let run = run("print square(5);\nsquare(n: int) return int { return n * n; }");
    assert_eq!(run.lines(), vec!["25"]);
}

#[test]
fn test_recursion() {
    let run = run(
        "fact(n: long) return long { if n <= 1 { return 1; } return n * fact(n - 1); }\n\
         print fact(20);",
    );
    assert_eq!(run.lines(), vec!["2432902008176640000"]);
}

#[test]
fn test_return_outside_block_is_control_flow_error() {
    let run = run("return;");
    assert_eq!(
        run.error(),
        &RunError::ControlFlow(ControlFlowError::Return)
    );
}

// Arithmetic and comparison

#[test]
fn test_zero_divided_by_nonzero_keeps_promoted_type() {
    let run = run("print 0 / 7; print 0 / 2.5; print typeof (0 / 2.5); print typeof (0L / 3);");
    assert_eq!(run.lines(), vec!["0", "0.0", "double", "long"]);
}

#[test]
fn test_division_by_zero_for_every_numeric_kind() {
    for source in ["print 1 / 0;", "print 1L / 0;", "print 1.5 / 0;", "print 2 / 0.0;"] {
        let run = run(source);
        assert_eq!(
            raised_kind(run.error()),
            ScriptErrorKind::Standard(ExceptionKind::Math),
            "{source}"
        );
    }
}

#[test]
fn test_integer_overflow_is_math_error() {
    let run = run("var big: int = 2147483647; big += 1;");
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::Math)
    );
}

#[test]
fn test_power_and_chained_comparison() {
    let run = run("print 2 ^ 10; print typeof (2 ^ -1); var x = 2; print 1 < x <= 2; print 3 < x < 9;");
    assert_eq!(run.lines(), vec!["1024", "double", "true", "false"]);
}

#[test]
fn test_numeric_equality_promotes() {
    let run = run("print 1 == 1.0; print 2L == 2; print \"1\" == 1; print null == null;");
    assert_eq!(run.lines(), vec!["true", "true", "false", "true"]);
}

#[test]
fn test_logical_operators_need_booleans() {
    let run = run("print true && 1;");
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::Type)
    );
}

// Values

#[test]
fn test_stringification() {
    let run = run(
        "print 2.0; print true; print null; print \"2024-03-01\";\n\
         print {1, \"a\"}; print { name: \"Ann\", age: 3 };\n\
         print \"n=\" + 4;",
    );
    assert_eq!(
        run.lines(),
        vec![
            "2.0",
            "true",
            "null",
            "2024-03-01",
            "[1, \"a\"]",
            "{name: \"Ann\", age: 3}",
            "n=4",
        ]
    );
}

#[test]
fn test_typeof_names() {
    let run = run(
        "var a: int[3]; var b: string[]; var g: int[3, 4];\n\
         var p: record { a: int, b: string };\n\
         typedef flags = bitmap { on: 0, level: 1-3 };\n\
         var f: flags;\n\
         print typeof a; print typeof b; print typeof g; print typeof p; print typeof f;",
    );
    assert_eq!(
        run.lines(),
        vec![
            "array.int[3]",
            "array.string[]",
            "array.int[3,4]",
            "record {a:int, b:string}",
            "bitmap flags",
        ]
    );
}

#[test]
fn test_casts() {
    let run = run(
        "print int(\"42\") + 1; print double(3); print boolean(\"yes\"); print string(7) + \"!\";\n\
         print typeof date(\"2024-01-02\"); print record(\"{\\\"a\\\": 1}\").a;",
    );
    assert_eq!(run.lines(), vec!["43", "3.0", "true", "7!", "date", "1"]);
}

#[test]
fn test_failed_cast_is_type_error() {
    let run = run("print int(\"forty\");");
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::Type)
    );
}

#[test]
fn test_core_builtins_from_script() {
    let run = run(
        "print str.toupper(\"abc\"); print math.max(3, 9, 4);\n\
         var xs = {3, 1, 2}; xs = array.sort(xs); print xs;\n\
         print str.join(str.split(\"a,b\", \",\"), \"-\");",
    );
    assert_eq!(run.lines(), vec!["ABC", "9", "[1, 2, 3]", "a-b"]);
}

#[test]
fn test_builtin_arity_is_type_error() {
    let run = run("print str.toupper();");
    assert_eq!(
        raised_kind(run.error()),
        ScriptErrorKind::Standard(ExceptionKind::Type)
    );
}

#[test]
fn test_length_of_strings_and_arrays() {
    let run = run("var xs: int[4]; print xs.length; print \"hello\".length;");
    assert_eq!(run.lines(), vec!["4", "5"]);
}

#[test]
fn test_array_builtins_from_script() {
    let run = run(
        "var xs = [3, 1, 2];\n\
         print array.sort(xs);\n\
         call array.add(xs, 9);\n\
         xs = array.add(xs, 4);\n\
         xs = #array.remove(xs, 0);\n\
         print xs;\n\
         var zeros: int[3];\n\
         print array.fill(zeros, 7);",
    );
    assert_eq!(run.lines(), vec!["[1, 2, 3]", "[1, 2, 4]", "[7, 7, 7]"]);
}

#[test]
fn test_map_builtins_from_script() {
    let run = run(
        "var m: map;\n\
         m[\"b\"] = 2; m[\"a\"] = 1;\n\
         print map.keys(m);\n\
         print map.has(m, \"a\");\n\
         m = map.remove(m, \"a\");\n\
         print Map.Has(m, \"a\");\n\
         if call map.has(m, \"b\") { print \"still b\"; }",
    );
    assert_eq!(
        run.lines(),
        vec!["[\"a\", \"b\"]", "true", "false", "still b"]
    );
}

#[test]
fn test_map_property_ignores_key_case() {
    let run = run(
        "var m = map(\"{\\\"Name\\\": 1}\");\n\
         print m.Name; print m.name; print m[\"Name\"];\n\
         m.NAME = 5;\n\
         print m;",
    );
    assert_eq!(run.lines(), vec!["1", "1", "1", "{Name: 5}"]);
}

#[test]
fn test_length_prefers_a_real_member() {
    let run = run(
        "var r = { size: 3, name: \"x\" };\n\
         print r.size; print r.length;\n\
         var m: map; m[\"length\"] = \"long\";\n\
         print m.length; print m.size;",
    );
    assert_eq!(run.lines(), vec!["3", "2", "long", "1"]);
}

#[test]
fn test_typeof_alias_declaration() {
    let run = run(
        "point typeof record { x: int, y: int };\n\
         var p: point;\n\
         p.x = 4;\n\
         print p; print typeof p;",
    );
    assert_eq!(run.lines(), vec!["{x: 4, y: 0}", "record {x:int, y:int}"]);
}

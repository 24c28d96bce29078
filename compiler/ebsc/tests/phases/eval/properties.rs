use proptest::prelude::*;

use crate::common::{parse_ok, run, run_program};

/// Cast targets whose `typeof` is exactly the cast keyword's type name.
const SCALAR_CASTS: [(&str, &str); 6] = [
    ("int", "int"),
    ("long", "long"),
    ("double", "double"),
    ("float", "float"),
    ("string", "string"),
    ("boolean", "bool"),
];

proptest! {
    #[test]
    fn prop_typeof_cast_is_target(n in -1000i32..1000, index in 0..SCALAR_CASTS.len()) {
        let (cast, name) = SCALAR_CASTS[index];
        let run = run(&format!("print typeof {cast}({n});"));
        prop_assert_eq!(run.lines(), vec![name]);
    }

    #[test]
    fn prop_int_addition_matches_rust(a in -100_000i32..100_000, b in -100_000i32..100_000) {
        let run = run(&format!("var a = {a}; var b = {b}; print a + b; print a * 1L + b;"));
        let sum = (a + b).to_string();
        prop_assert_eq!(run.lines(), vec![sum.as_str(), sum.as_str()]);
    }

    #[test]
    fn prop_int_promotes_to_double(a in -1000i32..1000) {
        let run = run(&format!("var x = {a} + 0.5; print typeof x;"));
        prop_assert_eq!(run.lines(), vec!["double"]);
    }

    #[test]
    fn prop_division_by_zero_always_raises(a in any::<i32>()) {
        let run = run(&format!(
            "try {{ print {a} / 0; }} exceptions {{ when MATH_ERROR {{ print \"math\"; }} }}"
        ));
        prop_assert_eq!(run.lines(), vec!["math"]);
    }

    #[test]
    fn prop_execution_is_deterministic(values in prop::collection::vec(0i32..50, 1..8)) {
        let items: Vec<String> = values.iter().map(ToString::to_string).collect();
        let source = format!(
            "var xs = {{{}}};\n\
             var total = 0;\n\
             foreach x in xs {{ total += x; }}\n\
             print array.sort(xs); print total;",
            items.join(", ")
        );
        let program = parse_ok(&source);
        let first = run_program(program.clone());
        let second = run_program(program);
        prop_assert_eq!(first.lines(), second.lines());
    }
}

#[test]
fn test_cast_of_string_literal_matches_value() {
    let run = run("var v = int(\"12\"); print v == 12;");
    assert_eq!(run.lines(), vec!["true"]);
}

use ebs_ir::Program;
use pretty_assertions::assert_eq;

use crate::common::{parse_ok, run_program};

const SCRIPT: &str = "typedef flags = bitmap { on: 0, level: 1-3 };\n\
                      var f: flags;\n\
                      f.level = 6;\n\
                      var stamp = \"2024-05-06\";\n\
                      describe(x: double, label: string = \"x\") return string {\n\
                          return label + \"=\" + x;\n\
                      }\n\
                      try { raise exception Boom(1, 2.5); }\n\
                      exceptions { when Boom(a, b) { print describe(b, \"b\"); } }\n\
                      for (var i = 0; i < 3; i++) { print i * i; }\n\
                      print f; print stamp; print { k: [1, 2] };";

#[test]
fn test_image_decodes_to_equal_program() {
    let program = parse_ok(SCRIPT);
    let bytes = program.to_bytes().unwrap();
    assert_eq!(Program::from_bytes(&bytes).unwrap(), program);
}

#[test]
fn test_image_runs_with_identical_output() {
    let program = parse_ok(SCRIPT);
    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    let original = run_program(program);
    let decoded = run_program(restored);
    assert_eq!(original.lines(), decoded.lines());
    assert_eq!(
        original.lines(),
        vec![
            "b=2.5",
            "0",
            "1",
            "4",
            "{on: 0, level: 6}",
            "2024-05-06",
            "{k: [1, 2]}",
        ]
    );
}

#[test]
fn test_truncated_image_is_rejected() {
    let bytes = parse_ok(SCRIPT).to_bytes().unwrap();
    assert!(Program::from_bytes(&bytes[..bytes.len() / 2]).is_err());
}

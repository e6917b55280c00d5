// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, rc::Rc, time::Duration};

use pretty_assertions::assert_eq;
use rstest::rstest;
use snek::{ScriptCache, Value};
use snek_interpreter::{CommandRegistry, Program, ProgramState, RuntimeError, RuntimeErrorKind};
use tests::{program, TestDebugger};

fn run_until_error(program: &mut Program<TestDebugger>) -> RuntimeError {
    for _ in 0..100 {
        if let Err(error) = program.cycle() {
            return error;
        }
    }

    panic!("program did not fail");
}

#[rstest]
#[case("x = 'a' - 1;", "TypeMismatch")]
#[case("x = -'a';", "UnaryTypeMismatch")]
#[case("x = 1 // 0;", "DivisionByZero")]
#[case("x = 9223372036854775807 + 1;", "IntegerOverflow")]
#[case("wait(-1);", "InvalidArgument")]
#[case("wait(10.0 ** 300);", "InvalidArgument")]
#[case("x = nope();", "UnknownCommand")]
#[case("}", "UnmatchedBlockEnd")]
#[case("case 1 { }", "CaseWithoutSwitch")]
#[case("if 0 {", "UnterminatedBlock")]
fn runtime_errors(#[case] source: &str, #[case] expected: &str) {
    let mut program = program(source);
    let error = run_until_error(&mut program);
    assert_eq!(error.kind.name(), expected);
}

#[test]
fn case_without_switch_is_fatal() {
    let mut program = program("write('a');\ncase 1 {\n    write('b');\n}\nwrite('c');");

    program.cycle().unwrap();
    let error = program.cycle().unwrap_err();
    assert_eq!(error.kind, RuntimeErrorKind::CaseWithoutSwitch);
    assert_eq!(error.line(), 2);

    assert!(program.done());
    assert_eq!(program.state(), ProgramState::Failed);
    assert_eq!(program.error(), Some(&error));

    for _ in 0..5 {
        assert_eq!(program.cycle(), Err(error.clone()));
    }

    assert_eq!(program.program_counter(), 1);
    assert_eq!(program.debugger().output, ["a"]);
    assert_eq!(program.debugger().errors, [error]);
}

#[test]
fn unknown_command_names_script_and_line() {
    let mut program = program("x = 1;\n\nlaunch_rocket(3);").named("quest.snek");

    let error = run_until_error(&mut program);
    assert_eq!(error.kind, RuntimeErrorKind::UnknownCommand { name: "launch_rocket".into() });
    assert_eq!(error.script, "quest.snek");
    assert_eq!(error.line(), 3);
    assert_eq!(error.to_string(), "unknown command `launch_rocket` (in quest.snek:3)");

    assert_eq!(program.namespace().get("x"), Some(&Value::Integer(1)));
}

#[test]
fn error_inside_nested_argument() {
    let mut program = program("if 1 {\n    write(upper(1 + 'x'));\n}");

    let error = run_until_error(&mut program);
    assert_eq!(error.line(), 2);
    assert!(matches!(error.kind, RuntimeErrorKind::TypeMismatch { .. }));
    assert!(program.debugger().output.is_empty());
}

#[test]
fn run_reports_failure() {
    let mut program = program("x = 1;\ny = x / 0;");

    let error = program.run(Duration::ZERO).unwrap_err();
    assert_eq!(error.kind, RuntimeErrorKind::DivisionByZero);
    assert_eq!(program.state(), ProgramState::Failed);
}

#[test]
fn parse_errors_are_reported_at_construction() {
    let result = Program::new(
        Rc::new(ScriptCache::new()),
        "x = 1;\ny = (1 + ;",
        HashMap::<String, Value>::new(),
        CommandRegistry::with_builtins(),
    );

    let Err(error) = result else {
        panic!("script should not parse");
    };

    assert_eq!(error.name(), "UnknownStartOfExpression");
    assert_eq!(error.location().line(), 1);
}

#[test]
fn lexer_errors_are_reported_at_construction() {
    let result = Program::new(
        Rc::new(ScriptCache::new()),
        "x = 'unterminated;",
        HashMap::<String, Value>::new(),
        CommandRegistry::with_builtins(),
    );

    let Err(error) = result else {
        panic!("script should not parse");
    };

    assert_eq!(error.name(), "Lexer");
}

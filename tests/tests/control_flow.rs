// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;
use snek::Value;
use tests::{interpret_and_return_stdout, program, run_to_completion};

#[rstest]
#[case(
    r#"
        write("Hello!");
    "#,
    &[
        "Hello!",
    ],
)]
#[case(
    r#"
        if 0 { write("never"); }
        write("after");
    "#,
    &[
        "after",
    ],
)]
#[case(
    r#"
        if 1 {
            write("then");
        }
        write("after");
    "#,
    &[
        "then",
        "after",
    ],
)]
#[case(
    r#"
        i = 0;
        while i < 3 {
            write(format("i = {}", i));
            i = i + 1;
        }
    "#,
    &[
        "i = 0",
        "i = 1",
        "i = 2",
    ],
)]
#[case(
    r#"
        # nested loops
        i = 0;
        while i < 2 {
            j = 0;
            while j < 2 {
                write(i, j);
                j = j + 1;
            }
            i = i + 1;
        }
    "#,
    &[
        "0 0",
        "0 1",
        "1 0",
        "1 1",
    ],
)]
#[case(
    r#"
        weather = "rain";
        switch weather {
            case "sun" {
                write("sunglasses");
            }
            case "rain" {
                write("umbrella");
            }
            case "snow" {
                write("scarf");
            }
        }
        write("done");
    "#,
    &[
        "umbrella",
        "done",
    ],
)]
#[case(
    r#"
        switch 42 {
            case 1 { write("one"); }
            case 2 { write("two"); }
        }
        write("no match");
    "#,
    &[
        "no match",
    ],
)]
#[case(
    r#"
        switch "anything" {
            case "something" { write("something"); }
            case _ { write("default"); }
        }
    "#,
    &[
        "default",
    ],
)]
#[case(
    r#"
        switch 1 {
            case 1 { write("first"); }
            case 1 { write("second"); }
        }
    "#,
    &[
        "first",
    ],
)]
#[case(
    r#"
        n = 2;
        switch n {
            case 2 {
                if n > 1 {
                    switch n * 2 {
                        case 4 { write("inner"); }
                    }
                }
                write("outer");
            }
        }
    "#,
    &[
        "inner",
        "outer",
    ],
)]
fn stdout(#[case] input: &str, #[case] expected: &[&str]) {
    let actual = interpret_and_return_stdout(input);
    assert_eq!(actual, expected);
}

#[test]
fn while_runs_body_exactly_n_times() {
    let mut program = program(r#"
        counter = 0;
        iterations = 0;
        while counter < 7 {
            counter = counter + 1;
            iterations = iterations + 1;
        }
    "#);

    run_to_completion(&mut program, 1000);

    assert_eq!(program.namespace().get("counter"), Some(&Value::Integer(7)));
    assert_eq!(program.namespace().get("iterations"), Some(&Value::Integer(7)));
    assert_eq!(program.call_stack_depth(), 0);
    assert_eq!(program.debugger().frames_pushed, 7);
    assert_eq!(program.debugger().frames_popped, 7);
}

#[test]
fn skipped_body_is_never_visited() {
    let mut program = program("if 0 {\n write(\"never\");\n}\nx = 1;");
    run_to_completion(&mut program, 100);

    assert_eq!(program.debugger().lines, [0, 3]);
    assert_eq!(program.namespace().get("x"), Some(&Value::Integer(1)));
}

#[test]
fn and_or_evaluate_both_operands() {
    let output = interpret_and_return_stdout(r#"
        a = 0 and write("right of and");
        b = 1 or write("right of or");
        write(a, b);
    "#);

    assert_eq!(output, [
        "right of and",
        "right of or",
        "0 1",
    ]);
}

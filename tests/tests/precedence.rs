// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;
use snek::Value;
use tests::interpret_expression;

#[rstest]
#[case("-1 + 3 * -4", Value::Integer(-13))]
#[case("2 >= 1 - 2", Value::Bool(true))]
#[case("1 // 8 + 2", Value::Integer(2))]
#[case("10 * 4 + 5", Value::Integer(45))]
#[case("10 + 4 * 5", Value::Integer(30))]
#[case("(10 + 4) * 5", Value::Integer(70))]
#[case("2 ** 3 * 2", Value::Integer(16))]
#[case("-3 ** 2", Value::Integer(-9))]
#[case("2 ** -1", Value::Float(0.5))]
#[case("7 % 4 * 2", Value::Integer(6))]
#[case("1 << 2 + 1", Value::Integer(8))]
#[case("5 & 3 | 8", Value::Integer(9))]
#[case("~0 + 1", Value::Integer(0))]
#[case("1e3 + .5", Value::Float(1000.5))]
#[case("2.5e-1 * 4", Value::Float(1.0))]
fn arithmetic(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}

#[rstest]
#[case("1 < 2 and 2 < 3", Value::Bool(true))]
#[case("1 > 2 or 0", Value::Integer(0))]
#[case("not 1 > 2 and 3", Value::Integer(3))]
#[case("!0 == 1", Value::Bool(true))]
#[case("'ell' in 'hello' and 'x' not in 'hello'", Value::Bool(true))]
#[case("1 or 2 and 0", Value::Integer(1))]
#[case("null == _", Value::Bool(true))]
#[case("_ > 3", Value::Bool(false))]
#[case("'abc' < 'abd'", Value::Bool(true))]
fn logic(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}

#[rstest]
#[case("abs(-5) + sub(10, 4)", Value::Integer(11))]
#[case("div(7, 2) + fdiv(1, 4)", Value::Float(3.25))]
#[case("upper('snek') + lower('!')", Value::String("SNEK!".into()))]
#[case("format('{} has {} lives', 'snek', 2 + 1)", Value::String("snek has 3 lives".into()))]
#[case("bool(len(''))", Value::Bool(false))]
#[case("max(1, min(5, 3), 2)", Value::Integer(3))]
#[case("str(int('12') * 2)", Value::String("24".into()))]
#[case("title(capitalize('the SNEK'))", Value::String("The Snek".into()))]
fn calls(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(interpret_expression(input), expected);
}

#[test]
fn unknown_identifiers_are_strings() {
    assert_eq!(interpret_expression("upper(player)"), Value::String("PLAYER".into()));
}

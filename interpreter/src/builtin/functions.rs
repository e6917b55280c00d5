// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::cmp::Ordering;

use rand::Rng;
use snek::{BiOperator, Value};

use crate::{operators::apply_binary, RuntimeErrorKind};

type FunctionResult = Result<Value, RuntimeErrorKind>;

fn arguments<const N: usize>(command: &str, arguments: Vec<Value>) -> Result<[Value; N], RuntimeErrorKind> {
    <[Value; N]>::try_from(arguments).map_err(|arguments| {
        RuntimeErrorKind::invalid_argument(command, format!("expected {N} argument(s), got {}", arguments.len()))
    })
}

fn string_argument(command: &str, arguments: Vec<Value>) -> Result<String, RuntimeErrorKind> {
    match self::arguments::<1>(command, arguments)? {
        [Value::String(str)] => Ok(str),
        [other] => Err(RuntimeErrorKind::invalid_argument(command, format!("expected a string, got {}", other.type_name()))),
    }
}

fn binary(command: &str, operator: BiOperator, args: Vec<Value>) -> FunctionResult {
    let [lhs, rhs] = arguments::<2>(command, args)?;
    apply_binary(operator, lhs, rhs)
}

pub fn abs(args: Vec<Value>) -> FunctionResult {
    match arguments::<1>("abs", args)? {
        [Value::Integer(i)] => i.checked_abs().map(Value::Integer).ok_or(RuntimeErrorKind::IntegerOverflow { operator: "abs" }),
        [Value::Float(f)] => Ok(Value::Float(f.abs())),
        [other] => Err(RuntimeErrorKind::invalid_argument("abs", format!("expected a number, got {}", other.type_name()))),
    }
}

pub fn add(args: Vec<Value>) -> FunctionResult {
    binary("add", BiOperator::Add, args)
}

pub fn sub(args: Vec<Value>) -> FunctionResult {
    binary("sub", BiOperator::Subtract, args)
}

pub fn mul(args: Vec<Value>) -> FunctionResult {
    binary("mul", BiOperator::Multiply, args)
}

pub fn div(args: Vec<Value>) -> FunctionResult {
    binary("div", BiOperator::FloorDivide, args)
}

pub fn fdiv(args: Vec<Value>) -> FunctionResult {
    binary("fdiv", BiOperator::Divide, args)
}

pub fn modulo(args: Vec<Value>) -> FunctionResult {
    binary("mod", BiOperator::Modulo, args)
}

fn extreme(command: &str, args: Vec<Value>, wanted: Ordering) -> FunctionResult {
    let mut args = args.into_iter();
    let Some(mut best) = args.next() else {
        return Err(RuntimeErrorKind::invalid_argument(command, "expected at least one argument"));
    };

    for candidate in args {
        let Some(ordering) = candidate.partial_cmp(&best) else {
            return Err(RuntimeErrorKind::TypeMismatch {
                operator: if wanted == Ordering::Less { "<" } else { ">" },
                lhs: candidate.type_name(),
                rhs: best.type_name(),
            });
        };

        if ordering == wanted {
            best = candidate;
        }
    }

    Ok(best)
}

pub fn min(args: Vec<Value>) -> FunctionResult {
    extreme("min", args, Ordering::Less)
}

pub fn max(args: Vec<Value>) -> FunctionResult {
    extreme("max", args, Ordering::Greater)
}

pub fn round(args: Vec<Value>) -> FunctionResult {
    let (number, digits) = match args.len() {
        1 => {
            let [number] = arguments::<1>("round", args)?;
            (number, None)
        }
        _ => {
            let [number, digits] = arguments::<2>("round", args)?;
            (number, Some(digits))
        }
    };

    match (number, digits) {
        (Value::Integer(i), None | Some(Value::Null)) => Ok(Value::Integer(i)),
        (Value::Float(f), None | Some(Value::Null)) => {
            let rounded = f.round_ties_even();
            if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
                return Err(RuntimeErrorKind::IntegerOverflow { operator: "round" });
            }
            Ok(Value::Integer(rounded as i64))
        }
        (number, Some(Value::Integer(digits))) => {
            let Some(f) = number.as_float() else {
                return Err(RuntimeErrorKind::invalid_argument("round", format!("expected a number, got {}", number.type_name())));
            };

            let factor = 10_f64.powi(digits.clamp(-308, 308) as i32);
            Ok(Value::Float((f * factor).round_ties_even() / factor))
        }
        (number, digits) => Err(RuntimeErrorKind::invalid_argument(
            "round",
            format!("expected a number and an optional integer, got {} and {}", number.type_name(), digits.map_or("nothing", |d| d.type_name())),
        )),
    }
}

pub fn int(args: Vec<Value>) -> FunctionResult {
    let value = match arguments::<1>("int", args)? {
        [Value::Integer(i)] => i,
        [Value::Float(f)] => {
            if !f.is_finite() || f.abs() >= i64::MAX as f64 {
                return Err(RuntimeErrorKind::IntegerOverflow { operator: "int" });
            }
            f.trunc() as i64
        }
        [Value::Bool(b)] => i64::from(b),
        [Value::String(str)] => str.trim().parse().map_err(|_| RuntimeErrorKind::invalid_argument("int", format!("`{str}` is not an integer")))?,
        [other] => return Err(RuntimeErrorKind::invalid_argument("int", format!("cannot convert {} to an integer", other.type_name()))),
    };

    Ok(Value::Integer(value))
}

pub fn float(args: Vec<Value>) -> FunctionResult {
    let value = match arguments::<1>("float", args)? {
        [Value::Integer(i)] => i as f64,
        [Value::Float(f)] => f,
        [Value::Bool(b)] => f64::from(u8::from(b)),
        [Value::String(str)] => str.trim().parse().map_err(|_| RuntimeErrorKind::invalid_argument("float", format!("`{str}` is not a number")))?,
        [other] => return Err(RuntimeErrorKind::invalid_argument("float", format!("cannot convert {} to a float", other.type_name()))),
    };

    Ok(Value::Float(value))
}

pub fn str(args: Vec<Value>) -> FunctionResult {
    let [value] = arguments::<1>("str", args)?;
    Ok(Value::String(value.to_string()))
}

pub fn bool(args: Vec<Value>) -> FunctionResult {
    let [value] = arguments::<1>("bool", args)?;
    Ok(Value::Bool(value.is_truthy()))
}

pub fn len(args: Vec<Value>) -> FunctionResult {
    let str = string_argument("len", args)?;
    Ok(Value::Integer(str.chars().count() as i64))
}

pub fn upper(args: Vec<Value>) -> FunctionResult {
    Ok(Value::String(string_argument("upper", args)?.to_uppercase()))
}

pub fn lower(args: Vec<Value>) -> FunctionResult {
    Ok(Value::String(string_argument("lower", args)?.to_lowercase()))
}

pub fn title(args: Vec<Value>) -> FunctionResult {
    let str = string_argument("title", args)?;

    let mut result = String::with_capacity(str.len());
    let mut previous_is_letter = false;

    for c in str.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }

        previous_is_letter = c.is_alphabetic();
    }

    Ok(Value::String(result))
}

pub fn capitalize(args: Vec<Value>) -> FunctionResult {
    let str = string_argument("capitalize", args)?;

    let mut chars = str.chars();
    let result = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    };

    Ok(Value::String(result))
}

pub fn print(args: Vec<Value>) -> FunctionResult {
    let line: Vec<String> = args.iter().map(ToString::to_string).collect();
    println!("{}", line.join(" "));
    Ok(Value::Null)
}

/// `{}` takes the next argument, `{N}` the argument at index `N`, and `{{`
/// and `}}` are literal braces.
pub fn format(args: Vec<Value>) -> FunctionResult {
    let mut args = args.into_iter();
    let template = match args.next() {
        Some(Value::String(template)) => template,
        Some(other) => return Err(RuntimeErrorKind::invalid_argument("format", format!("expected a template string, got {}", other.type_name()))),
        None => return Err(RuntimeErrorKind::invalid_argument("format", "expected a template string")),
    };
    let args: Vec<Value> = args.collect();

    let mut result = String::with_capacity(template.len());
    let mut next_index = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                result.push('{');
            }

            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                result.push('}');
            }

            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(digit) if digit.is_ascii_digit() => index.push(digit),
                        _ => return Err(RuntimeErrorKind::invalid_argument("format", "unterminated or invalid placeholder")),
                    }
                }

                let index = if index.is_empty() {
                    next_index += 1;
                    next_index - 1
                } else {
                    index.parse().map_err(|_| RuntimeErrorKind::invalid_argument("format", "placeholder index is too large"))?
                };

                let Some(value) = args.get(index) else {
                    return Err(RuntimeErrorKind::invalid_argument("format", format!("no argument for placeholder {index}")));
                };

                result += &value.to_string();
            }

            '}' => return Err(RuntimeErrorKind::invalid_argument("format", "unmatched `}` in template")),

            c => result.push(c),
        }
    }

    Ok(Value::String(result))
}

pub fn randint(args: Vec<Value>) -> FunctionResult {
    let [Value::Integer(low), Value::Integer(high)] = arguments::<2>("randint", args)? else {
        return Err(RuntimeErrorKind::invalid_argument("randint", "expected two integers"));
    };

    if low > high {
        return Err(RuntimeErrorKind::invalid_argument("randint", format!("empty range {low}..={high}")));
    }

    Ok(Value::Integer(rand::rng().random_range(low..=high)))
}

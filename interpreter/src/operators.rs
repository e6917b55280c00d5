// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use snek::{BiOperator, UnaryOperator, Value};

use crate::RuntimeErrorKind;

type OperatorResult = Result<Value, RuntimeErrorKind>;

enum Numbers {
    Integers(i64, i64),
    Floats(f64, f64),
}

impl Numbers {
    fn of(lhs: &Value, rhs: &Value) -> Option<Self> {
        match (lhs, rhs) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Some(Self::Integers(*lhs, *rhs)),
            _ => Some(Self::Floats(lhs.as_float()?, rhs.as_float()?)),
        }
    }
}

pub fn apply_unary(operator: UnaryOperator, operand: Value) -> OperatorResult {
    let value = match (operator, &operand) {
        (UnaryOperator::Not, _) => Value::Bool(!operand.is_truthy()),

        (UnaryOperator::Plus, Value::Integer(..) | Value::Float(..)) => operand,

        (UnaryOperator::Negate, Value::Integer(i)) => {
            Value::Integer(i.checked_neg().ok_or(RuntimeErrorKind::IntegerOverflow { operator: "-" })?)
        }
        (UnaryOperator::Negate, Value::Float(f)) => Value::Float(-f),

        (UnaryOperator::BitwiseNot, Value::Integer(i)) => Value::Integer(!i),

        _ => {
            return Err(RuntimeErrorKind::UnaryTypeMismatch {
                operator: operator.as_str(),
                operand: operand.type_name(),
            });
        }
    };

    Ok(value)
}

/// Both operands are already evaluated: `and` and `or` pick one of them
/// without short-circuiting.
pub fn apply_binary(operator: BiOperator, lhs: Value, rhs: Value) -> OperatorResult {
    match operator {
        BiOperator::And => Ok(if lhs.is_truthy() { rhs } else { lhs }),
        BiOperator::Or => Ok(if lhs.is_truthy() { lhs } else { rhs }),

        BiOperator::Comparison(comparison) => Ok(Value::Bool(lhs.compare(&rhs, comparison))),
        BiOperator::In => contains(&lhs, &rhs, operator).map(Value::Bool),
        BiOperator::NotIn => contains(&lhs, &rhs, operator).map(|b| Value::Bool(!b)),

        BiOperator::Add => add(lhs, rhs),
        BiOperator::Subtract => arithmetic(operator, &lhs, &rhs, i64::checked_sub, |a, b| a - b),
        BiOperator::Multiply => multiply(lhs, rhs),
        BiOperator::Divide => divide(&lhs, &rhs),
        BiOperator::FloorDivide => floor_divide(&lhs, &rhs),
        BiOperator::Modulo => modulo(&lhs, &rhs),
        BiOperator::Power => power(&lhs, &rhs),

        BiOperator::LeftShift | BiOperator::RightShift => shift(operator, &lhs, &rhs),

        BiOperator::BitwiseAnd | BiOperator::BitwiseXor | BiOperator::BitwiseOr => bitwise(operator, &lhs, &rhs),
    }
}

fn mismatch(operator: BiOperator, lhs: &Value, rhs: &Value) -> RuntimeErrorKind {
    RuntimeErrorKind::TypeMismatch {
        operator: operator.as_str(),
        lhs: lhs.type_name(),
        rhs: rhs.type_name(),
    }
}

fn overflow(operator: BiOperator) -> RuntimeErrorKind {
    RuntimeErrorKind::IntegerOverflow { operator: operator.as_str() }
}

fn arithmetic(
    operator: BiOperator,
    lhs: &Value,
    rhs: &Value,
    integers: fn(i64, i64) -> Option<i64>,
    floats: fn(f64, f64) -> f64,
) -> OperatorResult {
    match Numbers::of(lhs, rhs) {
        Some(Numbers::Integers(a, b)) => integers(a, b).map(Value::Integer).ok_or_else(|| overflow(operator)),
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(floats(a, b))),
        None => Err(mismatch(operator, lhs, rhs)),
    }
}

fn add(lhs: Value, rhs: Value) -> OperatorResult {
    match (lhs, rhs) {
        (Value::String(mut lhs), Value::String(rhs)) => {
            lhs.push_str(&rhs);
            Ok(Value::String(lhs))
        }
        (lhs, rhs) => arithmetic(BiOperator::Add, &lhs, &rhs, i64::checked_add, |a, b| a + b),
    }
}

fn multiply(lhs: Value, rhs: Value) -> OperatorResult {
    match (&lhs, &rhs) {
        (Value::String(str), Value::Integer(count)) | (Value::Integer(count), Value::String(str)) => {
            Ok(Value::String(str.repeat(usize::try_from(*count).unwrap_or(0))))
        }
        _ => arithmetic(BiOperator::Multiply, &lhs, &rhs, i64::checked_mul, |a, b| a * b),
    }
}

fn divide(lhs: &Value, rhs: &Value) -> OperatorResult {
    let (Some(a), Some(b)) = (lhs.as_float(), rhs.as_float()) else {
        return Err(mismatch(BiOperator::Divide, lhs, rhs));
    };

    if b == 0.0 {
        return Err(RuntimeErrorKind::DivisionByZero);
    }

    Ok(Value::Float(a / b))
}

fn floor_divide(lhs: &Value, rhs: &Value) -> OperatorResult {
    match Numbers::of(lhs, rhs) {
        Some(Numbers::Integers(_, 0)) => Err(RuntimeErrorKind::DivisionByZero),
        Some(Numbers::Integers(a, b)) => {
            let quotient = a.checked_div(b).ok_or_else(|| overflow(BiOperator::FloorDivide))?;
            let rounds_up = a % b != 0 && ((a < 0) != (b < 0));
            Ok(Value::Integer(if rounds_up { quotient - 1 } else { quotient }))
        }
        Some(Numbers::Floats(_, b)) if b == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
        Some(Numbers::Floats(a, b)) => Ok(Value::Float((a / b).floor())),
        None => Err(mismatch(BiOperator::FloorDivide, lhs, rhs)),
    }
}

/// The result takes the sign of the divisor.
fn modulo(lhs: &Value, rhs: &Value) -> OperatorResult {
    match Numbers::of(lhs, rhs) {
        Some(Numbers::Integers(_, 0)) => Err(RuntimeErrorKind::DivisionByZero),
        Some(Numbers::Integers(a, b)) => {
            let remainder = a.checked_rem(b).ok_or_else(|| overflow(BiOperator::Modulo))?;
            let adjust = remainder != 0 && ((remainder < 0) != (b < 0));
            Ok(Value::Integer(if adjust { remainder + b } else { remainder }))
        }
        Some(Numbers::Floats(_, b)) if b == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(a - b * (a / b).floor())),
        None => Err(mismatch(BiOperator::Modulo, lhs, rhs)),
    }
}

fn power(lhs: &Value, rhs: &Value) -> OperatorResult {
    match Numbers::of(lhs, rhs) {
        Some(Numbers::Integers(base, exponent)) if exponent >= 0 => {
            let exponent = u32::try_from(exponent).map_err(|_| overflow(BiOperator::Power))?;
            base.checked_pow(exponent).map(Value::Integer).ok_or_else(|| overflow(BiOperator::Power))
        }
        Some(Numbers::Integers(base, exponent)) => Ok(Value::Float((base as f64).powf(exponent as f64))),
        Some(Numbers::Floats(base, exponent)) => Ok(Value::Float(base.powf(exponent))),
        None => Err(mismatch(BiOperator::Power, lhs, rhs)),
    }
}

fn shift(operator: BiOperator, lhs: &Value, rhs: &Value) -> OperatorResult {
    let (Value::Integer(value), Value::Integer(amount)) = (lhs, rhs) else {
        return Err(mismatch(operator, lhs, rhs));
    };

    let Ok(amount) = u32::try_from(*amount) else {
        return Err(RuntimeErrorKind::invalid_argument(operator.as_str(), "negative shift count"));
    };

    let result = match operator {
        BiOperator::LeftShift => {
            let shifted = value.checked_shl(amount).ok_or_else(|| overflow(operator))?;
            if shifted >> amount != *value {
                return Err(overflow(operator));
            }
            shifted
        }
        _ => value >> amount.min(63),
    };

    Ok(Value::Integer(result))
}

fn bitwise(operator: BiOperator, lhs: &Value, rhs: &Value) -> OperatorResult {
    let value = match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(match operator {
            BiOperator::BitwiseAnd => a & b,
            BiOperator::BitwiseXor => a ^ b,
            _ => a | b,
        }),
        (Value::Bool(a), Value::Bool(b)) => Value::Bool(match operator {
            BiOperator::BitwiseAnd => a & b,
            BiOperator::BitwiseXor => a ^ b,
            _ => a | b,
        }),
        _ => return Err(mismatch(operator, lhs, rhs)),
    };

    Ok(value)
}

fn contains(needle: &Value, haystack: &Value, operator: BiOperator) -> Result<bool, RuntimeErrorKind> {
    match (needle, haystack) {
        (Value::String(needle), Value::String(haystack)) => Ok(haystack.contains(needle.as_str())),
        _ => Err(mismatch(operator, needle, haystack)),
    }
}

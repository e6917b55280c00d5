// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Debug, Display, Write};

use crate::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Value),

    /// An identifier. Resolved against the namespace, or passed on as a
    /// string when no such variable exists.
    Reference(String),

    Call(CallExpression),
    Unary(UnaryExpression),
    Binary(BiExpression),
}

impl Expression {
    /// The sub-expressions that must be reduced to a value before this one
    /// can be applied, in evaluation order.
    #[must_use]
    pub fn operand(&self, index: usize) -> Option<&Expression> {
        match self {
            Self::Literal(..) | Self::Reference(..) => None,
            Self::Call(call) => call.arguments.get(index),
            Self::Unary(unary) => (index == 0).then_some(&*unary.operand),
            Self::Binary(bi) => match index {
                0 => Some(&bi.lhs),
                1 => Some(&bi.rhs),
                _ => None,
            },
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(Value::String(str)) => f.write_fmt(format_args!("{str:?}")),
            Self::Literal(value) => Display::fmt(value, f),
            Self::Reference(name) => f.write_str(name),
            Self::Call(call) => Display::fmt(call, f),
            Self::Unary(unary) => Display::fmt(unary, f),
            Self::Binary(bi) => Display::fmt(bi, f),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        f.write_char('(')?;

        for (idx, argument) in self.arguments.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }

            Display::fmt(argument, f)?;
        }

        f.write_char(')')
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

impl Display for UnaryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.operator.as_str())?;
        if self.operator == UnaryOperator::Not {
            f.write_char(' ')?;
        }
        Display::fmt(&self.operand, f)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BiExpression {
    pub operator: BiOperator,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
}

impl Display for BiExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({} {} {})", self.lhs, self.operator, self.rhs))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Negate,
    BitwiseNot,
    Not,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::BitwiseNot => "~",
            Self::Not => "not",
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiOperator {
    Power,

    Multiply,
    Divide,
    FloorDivide,
    Modulo,

    Add,
    Subtract,

    LeftShift,
    RightShift,

    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,

    Comparison(Comparison),
    In,
    NotIn,

    And,
    Or,
}

impl BiOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "**",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::FloorDivide => "//",
            Self::Modulo => "%",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitwiseAnd => "&",
            Self::BitwiseXor => "^",
            Self::BitwiseOr => "|",
            Self::Comparison(comp) => comp.as_str(),
            Self::In => "in",
            Self::NotIn => "not in",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl Display for BiOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Equality,
    Inequality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Comparison {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equality => "==",
            Self::Inequality => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

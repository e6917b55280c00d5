// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Punctuator {
    #[strum(serialize = "comma")]
    Comma,
    #[strum(serialize = "left parenthesis")]
    LeftParenthesis,
    #[strum(serialize = "right parenthesis")]
    RightParenthesis,
    #[strum(serialize = "left curly bracket")]
    LeftCurlyBracket,
    #[strum(serialize = "right curly bracket")]
    RightCurlyBracket,
    #[strum(serialize = "semicolon")]
    Semicolon,
    #[strum(serialize = "assignment")]
    Assignment,

    #[strum(serialize = "plus")]
    PlusSign,
    #[strum(serialize = "minus")]
    HyphenMinus,
    #[strum(serialize = "asterisk")]
    Asterisk,
    #[strum(serialize = "double asterisk")]
    DoubleAsterisk,
    #[strum(serialize = "solidus")]
    Solidus,
    #[strum(serialize = "double solidus")]
    DoubleSolidus,
    #[strum(serialize = "percentage sign")]
    PercentageSign,
    #[strum(serialize = "tilde")]
    Tilde,

    #[strum(serialize = "left shift")]
    LeftShift,
    #[strum(serialize = "right shift")]
    RightShift,
    #[strum(serialize = "bitwise and")]
    BitwiseAnd,
    #[strum(serialize = "bitwise or")]
    BitwiseOr,
    #[strum(serialize = "bitwise xor")]
    BitwiseXor,

    #[strum(serialize = "equals")]
    Equals,
    #[strum(serialize = "not equals")]
    NotEquals,
    #[strum(serialize = "less than")]
    LessThan,
    #[strum(serialize = "less than or equal")]
    LessThanOrEqual,
    #[strum(serialize = "greater than")]
    GreaterThan,
    #[strum(serialize = "greater than or equal")]
    GreaterThanOrEqual,
    #[strum(serialize = "exclamation mark")]
    ExclamationMark,
}

impl Punctuator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::LeftCurlyBracket => "{",
            Self::RightCurlyBracket => "}",
            Self::Semicolon => ";",
            Self::Assignment => "=",
            Self::PlusSign => "+",
            Self::HyphenMinus => "-",
            Self::Asterisk => "*",
            Self::DoubleAsterisk => "**",
            Self::Solidus => "/",
            Self::DoubleSolidus => "//",
            Self::PercentageSign => "%",
            Self::Tilde => "~",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::ExclamationMark => "!",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Display for Punctuator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

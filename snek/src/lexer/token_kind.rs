// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use super::{Keyword, Punctuator};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),

    Identifier(String),
    StringLiteral(String),
    Integer(i64),
    Float(f64),

    Punctuator(Punctuator),
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(..) => "keyword",

            Self::Identifier(..) => "identifier",
            Self::StringLiteral(..) => "string",
            Self::Integer(..) => "integer",
            Self::Float(..) => "float",

            Self::Punctuator(punctuator) => punctuator.name(),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => f.write_str(ident),
            Self::Integer(int) => int.fmt(f),
            Self::Float(float) => float.fmt(f),
            Self::Keyword(keyword) => f.write_str(keyword.as_ref()),
            Self::Punctuator(punctuator) => punctuator.fmt(f),
            Self::StringLiteral(str) => f.write_fmt(format_args!("{str:?}")),
        }
    }
}

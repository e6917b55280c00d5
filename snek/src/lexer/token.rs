// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use crate::{FileLocation, FileRange};

use super::{Keyword, Punctuator, TokenKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub begin: FileLocation,
    pub end: FileLocation,
}

impl Token {
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        let TokenKind::Identifier(ident) = &self.kind else {
            return None;
        };

        Some(ident)
    }

    #[must_use]
    pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
        self.kind == TokenKind::Punctuator(punctuator)
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    #[must_use]
    pub fn range(&self) -> FileRange {
        (self.begin, self.end).into()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

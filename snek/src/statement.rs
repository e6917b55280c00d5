// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use strum::{AsRefStr, IntoStaticStr};

use crate::{util::FileRange, Expression, Keyword};

/// One line of a script. Blocks are not nested in the tree: a header opens
/// one and a later [`StatementKind::BlockEnd`] closes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub range: FileRange,
    pub kind: StatementKind,
}

impl Statement {
    /// Zero-based line in the source text.
    #[must_use]
    pub const fn source_line(&self) -> usize {
        self.range.start().line()
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Assignment(AssignStatement),
    Expression(Expression),
    Header(BlockHeader),
    BlockEnd,
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment(assign) => f.write_fmt(format_args!("{} = {};", assign.name, assign.expression)),
            Self::Expression(expression) => f.write_fmt(format_args!("{expression};")),
            Self::Header(header) => f.write_fmt(format_args!("{} {} {{", header.keyword.as_ref(), header.expression)),
            Self::BlockEnd => f.write_str("}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub name: String,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockHeader {
    pub keyword: BlockKeyword,
    pub expression: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BlockKeyword {
    If,
    Switch,
    Case,
    While,
}

impl TryFrom<Keyword> for BlockKeyword {
    type Error = Keyword;

    fn try_from(value: Keyword) -> Result<Self, Self::Error> {
        match value {
            Keyword::If => Ok(Self::If),
            Keyword::Switch => Ok(Self::Switch),
            Keyword::Case => Ok(Self::Case),
            Keyword::While => Ok(Self::While),
            other => Err(other),
        }
    }
}

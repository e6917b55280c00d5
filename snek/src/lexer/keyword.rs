// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Keyword {
    And,
    Case,
    False,
    If,
    In,
    Not,
    Null,
    Or,
    Switch,
    True,
    While,
}

impl Keyword {
    pub fn iter_variants() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref() == input)
    }

    /// Whether this keyword opens a block, e.g. `while x < 3 {`.
    #[must_use]
    pub const fn is_block_header(&self) -> bool {
        matches!(self, Self::If | Self::Switch | Self::Case | Self::While)
    }

    #[must_use]
    pub fn documentation(&self) -> &'static str {
        match self {
            Self::And => "Logical conjunction. Both operands are always evaluated.",
            Self::Case => "Run the block when its value equals the scrutinee of the enclosing `switch`.",
            Self::False => "The boolean `false`.",
            Self::If => "Run the block when the condition holds.",
            Self::In => "Substring test, e.g. `\"ell\" in \"hello\"`.",
            Self::Not => "Logical negation, also usable as `not in`.",
            Self::Null => "The absence of a value.",
            Self::Or => "Logical disjunction. Both operands are always evaluated.",
            Self::Switch => "Select one of the `case` blocks inside by value.",
            Self::True => "The boolean `true`.",
            Self::While => "Repeat the block as long as the condition holds.",
        }
    }
}

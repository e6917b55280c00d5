// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use snek::{BlockKeyword, Value};

/// An open block on the call stack of a [`Program`](crate::Program).
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    If,

    Switch {
        scrutinee: Value,

        /// Set once a `case` matched; later cases are skipped.
        matched: bool,
    },

    Case,

    While {
        /// Index of the `while` header, re-executed when the block closes.
        line: usize,
    },
}

impl Frame {
    #[must_use]
    pub const fn keyword(&self) -> BlockKeyword {
        match self {
            Self::If => BlockKeyword::If,
            Self::Switch { .. } => BlockKeyword::Switch,
            Self::Case => BlockKeyword::Case,
            Self::While { .. } => BlockKeyword::While,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.keyword().into()
    }
}

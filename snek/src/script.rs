// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Statement, StatementKind};

/// The parsed form of a source text: a flat list of statement lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    lines: Vec<Statement>,
}

impl Script {
    #[must_use]
    pub fn new(lines: Vec<Statement>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn lines(&self) -> &[Statement] {
        &self.lines
    }

    /// Finds the `}` that closes the block opened at `header`, counting the
    /// headers and block ends in between.
    #[must_use]
    pub fn matching_block_end(&self, header: usize) -> Option<usize> {
        let mut depth = 0_usize;

        for (index, statement) in self.lines.iter().enumerate().skip(header) {
            match &statement.kind {
                StatementKind::Header(..) => depth += 1,
                StatementKind::BlockEnd => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => (),
            }
        }

        None
    }
}

// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use colored::{ColoredString, Colorize};
use snek::{FileRange, ParseError};
use strum::AsRefStr;
use thiserror::Error;

pub struct ErrorPrinter<'source_code> {
    path: String,
    source_code: &'source_code str,
    range: FileRange,
    message: String,
    line_number: ColoredString,
}

impl<'source_code> ErrorPrinter<'source_code> {
    #[must_use = "Use the `print` method to actually print"]
    pub fn new(path: impl Display, source_code: &'source_code str, range: FileRange, message: impl Display) -> Self {
        Self {
            path: path.to_string(),
            source_code,
            range,
            message: message.to_string(),
            line_number: format!("{}", range.start().line() + 1).blue().bold(),
        }
    }

    pub fn print(self) {
        self.print_prelude();

        self.print_lines();

        self.print_postlude();
    }

    fn print_prelude(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message.bold());

        eprintln!();
    }

    fn print_lines(&self) {
        let first = self.range.start().line().saturating_sub(1);
        let lines: Vec<&str> = self.source_code.lines().skip(first).take(3).collect();

        // The offending line is the second one, unless it is the first line of the file.
        let primary = self.range.start().line() - first;

        for (idx, line) in lines.iter().enumerate() {
            if idx < primary && line.trim().is_empty() {
                continue;
            }

            self.print_line(idx == primary, line);

            if idx == primary {
                self.print_error_indicator();
            }
        }
    }

    fn print_line(&self, is_primary: bool, line: &str) {
        self.print_line_prefix(is_primary);
        eprintln!("{line}");
    }

    fn print_error_indicator(&self) {
        let spaces = " ".repeat(self.range.start().column());
        let caret = "^".red().bold();
        let tildes = "~".repeat(self.range.len().saturating_sub(1)).red();

        self.print_line_prefix(false);
        eprintln!("{spaces}{caret}{tildes}");
    }

    fn print_line_prefix(&self, is_primary: bool) {
        let separator = " | ".blue().bold();

        if is_primary {
            eprint!("{} {separator}", self.line_number);
        } else {
            eprint!("{} {separator}", " ".repeat(self.line_number.len()));
        }
    }

    fn print_postlude(&self) {
        eprintln!();

        let line = self.range.start().line() + 1;
        let column = self.range.start().column() + 1;

        eprintln!("In {}:{line}:{column}\n", self.path);
    }
}

/// A failure that aborts the whole program.
#[derive(Debug, Clone, PartialEq, Error, AsRefStr)]
pub enum RuntimeErrorKind {
    #[error("`case` without an enclosing `switch` block")]
    CaseWithoutSwitch,

    #[error("`}}` without an open block")]
    UnmatchedBlockEnd,

    #[error("`{keyword}` block is never closed")]
    UnterminatedBlock { keyword: &'static str },

    #[error("unknown command `{name}`")]
    UnknownCommand { name: String },

    #[error("cannot apply `{operator}` to {lhs} and {rhs}")]
    TypeMismatch { operator: &'static str, lhs: &'static str, rhs: &'static str },

    #[error("cannot apply `{operator}` to {operand}")]
    UnaryTypeMismatch { operator: &'static str, operand: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{operator}`")]
    IntegerOverflow { operator: &'static str },

    #[error("invalid argument for `{command}`: {message}")]
    InvalidArgument { command: String, message: String },

    #[error("could not parse requested expression `{request}`: {error}")]
    ContextParse { request: String, error: ParseError },
}

impl RuntimeErrorKind {
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }

    #[must_use]
    pub fn invalid_argument(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            command: command.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub script: String,
    pub range: FileRange,
    pub kind: RuntimeErrorKind,
}

impl RuntimeError {
    /// One-based line number of the statement that failed.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.range.start().line() + 1
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} (in {}:{})", self.kind, self.script, self.line()))
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

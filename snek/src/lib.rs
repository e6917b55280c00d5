// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod context;
mod expression;
mod lexer;
mod parser;
mod script;
mod statement;
mod util;
mod value;

pub use self::{
    context::ScriptCache,
    expression::*,
    lexer::{Keyword, Lexer, LexerError, LexerErrorKind, Punctuator, Token, TokenKind},
    parser::{parse_expression_source, parse_script, ParseError, ParseResult, Parser},
    script::Script,
    statement::{AssignStatement, BlockHeader, BlockKeyword, Statement, StatementKind},
    util::{FileLocation, FileRange},
    value::{HostValue, Value},
};

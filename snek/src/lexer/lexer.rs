// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{error::Error, fmt::Display, str::CharIndices};

use strum::AsRefStr;
use thiserror::Error;

use crate::{FileLocation, Keyword, Punctuator, Token, TokenKind};

pub struct Lexer<'source_code> {
    input: &'source_code str,
    chars: CharIndices<'source_code>,

    current: Option<(FileLocation, char)>,
    line: usize,
    column: usize,
    errors: Vec<LexerError>,
}

impl<'source_code> Lexer<'source_code> {
    pub fn new(input: &'source_code str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
            current: None,
            line: 0,
            column: 0,
            errors: Vec::new(),
        }
    }

    pub fn next(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace_and_comments();

            let ch = self.peek_char()?;
            return match ch {
                '"' | '\'' => self.consume_string(),

                'a'..='z' | 'A'..='Z' | '_' => self.consume_identifier_or_keyword(),
                '0'..='9' => self.consume_number(),
                '.' if self.rest_starts_with_digit(1) => self.consume_number(),

                '(' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::LeftParenthesis)),
                ')' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::RightParenthesis)),
                '{' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::LeftCurlyBracket)),
                '}' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::RightCurlyBracket)),
                ';' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::Semicolon)),
                ',' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::Comma)),
                '+' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::PlusSign)),
                '-' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::HyphenMinus)),
                '%' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::PercentageSign)),
                '~' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::Tilde)),
                '&' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::BitwiseAnd)),
                '|' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::BitwiseOr)),
                '^' => self.consume_single_char_token(TokenKind::Punctuator(Punctuator::BitwiseXor)),
                '*' => self.consume_single_or_double_char_token(Punctuator::Asterisk, Punctuator::DoubleAsterisk),
                '/' => self.consume_single_or_double_char_token(Punctuator::Solidus, Punctuator::DoubleSolidus),
                '=' => self.consume_single_or_double_char_token(Punctuator::Assignment, Punctuator::Equals),
                '!' => self.consume_exclamation_mark(),
                '<' => self.consume_triple(Punctuator::LessThan, Punctuator::LessThanOrEqual, Punctuator::LeftShift),
                '>' => self.consume_triple(Punctuator::GreaterThan, Punctuator::GreaterThanOrEqual, Punctuator::RightShift),

                _ => {
                    let location = self.current_location();
                    self.consume_char();
                    self.errors.push(LexerError {
                        location,
                        kind: LexerErrorKind::IllegalCharacter(ch),
                    });
                    continue;
                }
            };
        }
    }

    #[must_use]
    fn consume_single_char_token(&mut self, kind: TokenKind) -> Option<Token> {
        let begin = self.current_location();

        self.consume_char();

        let end = self.current_location();

        Some(Token {
            kind,
            begin,
            end,
        })
    }

    fn consume_single_or_double_char_token(&mut self, single: Punctuator, double: Punctuator) -> Option<Token> {
        let begin = self.current_location();

        let char = self.next_char()?;

        let kind = if self.peek_char() == Some(char) {
            self.consume_char();
            TokenKind::Punctuator(double)
        } else {
            TokenKind::Punctuator(single)
        };

        let end = self.current_location();

        Some(Token {
            kind,
            begin,
            end,
        })
    }

    fn consume_exclamation_mark(&mut self) -> Option<Token> {
        let begin = self.current_location();
        self.consume_char();

        let kind = if self.peek_char() == Some('=') {
            self.consume_char();
            TokenKind::Punctuator(Punctuator::NotEquals)
        } else {
            TokenKind::Punctuator(Punctuator::ExclamationMark)
        };

        let end = self.current_location();

        Some(Token {
            kind,
            begin,
            end,
        })
    }

    fn consume_triple(&mut self, normal: Punctuator, normal_equals: Punctuator, double: Punctuator) -> Option<Token> {
        let begin = self.current_location();
        let ch = self.next_char()?;

        let punctuator = if self.peek_char() == Some(ch) {
            self.consume_char();
            double
        } else if self.peek_char() == Some('=') {
            self.consume_char();
            normal_equals
        } else {
            normal
        };

        let end = self.current_location();

        Some(Token {
            kind: TokenKind::Punctuator(punctuator),
            begin,
            end,
        })
    }

    fn consume_string(&mut self) -> Option<Token> {
        let begin = self.current_location();
        let quote = self.next_char()?;

        let mut str = String::new();

        loop {
            let Some(c) = self.peek_char() else {
                self.errors.push(LexerError {
                    location: begin,
                    kind: LexerErrorKind::UnterminatedString,
                });
                break;
            };

            self.consume_char();

            if c == quote {
                break;
            }

            if c != '\\' {
                str.push(c);
                continue;
            }

            let location = self.current_location();
            match self.next_char() {
                Some('"') => str.push('"'),
                Some('\'') => str.push('\''),
                Some('n') => str.push('\n'),
                Some('r') => str.push('\r'),
                Some('t') => str.push('\t'),
                Some('0') => str.push('\0'),
                Some('\\') => str.push('\\'),

                Some(invalid) => {
                    str.push('\\');
                    str.push(invalid);

                    self.errors.push(LexerError {
                        location,
                        kind: LexerErrorKind::InvalidEscape { invalid },
                    });
                }

                None => {
                    self.errors.push(LexerError {
                        location: begin,
                        kind: LexerErrorKind::UnterminatedString,
                    });
                    break;
                }
            }
        }

        let end = self.current_location();

        Some(Token {
            kind: TokenKind::StringLiteral(str),
            begin,
            end,
        })
    }

    fn consume_identifier_or_keyword(&mut self) -> Option<Token> {
        let begin = self.current_location();

        while let Some(c) = self.peek_char() {
            if !is_identifier_char(c) {
                break;
            }

            self.consume_char();
        }

        let end = self.current_location();
        let str = &self.input[begin.offset()..end.offset()];

        let kind = match Keyword::parse(str) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(str.to_string()),
        };

        Some(Token {
            kind,
            begin,
            end,
        })
    }

    fn consume_number(&mut self) -> Option<Token> {
        let begin = self.current_location();

        if self.input[begin.offset()..].starts_with("0x") {
            return self.consume_hexadecimal_number(begin);
        }

        self.consume_digits();

        let mut is_float = false;
        if self.peek_char() == Some('.') {
            is_float = true;
            self.consume_char();
            self.consume_digits();
        }

        if matches!(self.peek_char(), Some('e' | 'E')) && self.rest_starts_with_exponent() {
            is_float = true;
            self.consume_char();

            if matches!(self.peek_char(), Some('+' | '-')) {
                self.consume_char();
            }

            self.consume_digits();
        }

        let end = self.current_location();
        let str = &self.input[begin.offset()..end.offset()];

        let kind = if is_float {
            str.parse::<f64>().ok().filter(|float| float.is_finite()).map(TokenKind::Float)
        } else {
            str.parse().map(TokenKind::Integer).ok()
        };

        let kind = kind.unwrap_or_else(|| {
            self.errors.push(LexerError {
                location: begin,
                kind: LexerErrorKind::InvalidNumber,
            });
            TokenKind::Integer(0)
        });

        Some(Token {
            kind,
            begin,
            end,
        })
    }

    fn consume_hexadecimal_number(&mut self, begin: FileLocation) -> Option<Token> {
        self.consume_char();
        self.consume_char();

        while let Some(c) = self.peek_char() {
            if !c.is_ascii_hexdigit() {
                break;
            }

            self.consume_char();
        }

        let end = self.current_location();
        let str = &self.input[begin.offset() + 2..end.offset()];

        let integer = match i64::from_str_radix(str, 16) {
            Ok(int) => int,
            Err(..) => {
                self.errors.push(LexerError {
                    location: begin,
                    kind: LexerErrorKind::InvalidNumber,
                });
                0
            }
        };

        Some(Token {
            kind: TokenKind::Integer(integer),
            begin,
            end,
        })
    }

    /// Whether the input `skip` bytes past the current character starts
    /// with a digit.
    fn rest_starts_with_digit(&mut self, skip: usize) -> bool {
        let offset = self.current_location().offset() + skip;
        self.input.get(offset..).is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    }

    /// At an `e` or `E`: whether an exponent such as `e3` or `e-3` follows.
    fn rest_starts_with_exponent(&mut self) -> bool {
        let offset = self.current_location().offset() + 1;
        let Some(rest) = self.input.get(offset..) else {
            return false;
        };

        let rest = rest.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(rest);
        rest.starts_with(|c: char| c.is_ascii_digit())
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }

            self.consume_char();
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '#' {
                self.consume_until_end_of_line();
                continue;
            }

            if !c.is_whitespace() {
                break;
            }

            self.consume_char();
        }
    }

    fn consume_until_end_of_line(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        if let Some((_, c)) = self.current {
            return Some(c);
        }

        self.current = self.chars.next()
            .map(|(offset, char)| {
                let location = FileLocation::new(offset, self.line, self.column);

                if char == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }

                (location, char)
            });
        Some(self.current?.1)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.consume_char();
        Some(c)
    }

    fn consume_char(&mut self) {
        self.current = None;
        _ = self.peek_char();
    }

    fn current_location(&mut self) -> FileLocation {
        _ = self.peek_char();
        match self.current {
            Some((location, _)) => location,
            None => FileLocation::new(self.input.len(), self.line, self.column),
        }
    }

    pub fn collect_all(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = Vec::new();

        while let Some(token) = self.next() {
            tokens.push(token);
        }

        (tokens, self.errors)
    }
}

impl<'source_code> Iterator for Lexer<'source_code> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next()
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerError {
    pub location: FileLocation,
    pub kind: LexerErrorKind,
}

impl Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

impl Error for LexerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, AsRefStr)]
pub enum LexerErrorKind {
    #[error("illegal character `{0}`")]
    IllegalCharacter(char),

    #[error("invalid number")]
    InvalidNumber,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape `\\{invalid}`, only `\\\"`, `\\'`, `\\\\`, `\\0`, `\\n`, `\\r` and `\\t` are allowed")]
    InvalidEscape { invalid: char },
}

impl LexerErrorKind {
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::AsRefStr;
use thiserror::Error;

use crate::{
    AssignStatement, BiExpression, BiOperator, BlockHeader, BlockKeyword, CallExpression, Comparison, Expression, FileLocation, FileRange, Keyword, Lexer, LexerError, Punctuator, Script, Statement, StatementKind, Token, TokenKind, UnaryExpression, UnaryOperator, Value
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Tokenizes and parses a complete script. The first error aborts parsing.
pub fn parse_script(source: &str) -> ParseResult<Script> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);

    let mut lines = Vec::new();
    while !parser.is_at_end() {
        lines.push(parser.parse_statement()?);
    }

    Ok(Script::new(lines))
}

/// Parses a single expression, optionally followed by a `;`.
pub fn parse_expression_source(source: &str) -> ParseResult<Expression> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);

    let expression = parser.parse_expression()?;

    if parser.peek_punctuator() == Some(Punctuator::Semicolon) {
        parser.consume_token("`;`")?;
    }

    if let Ok(token) = parser.peek_token("end of expression") {
        return Err(ParseError::ResidualTokens { token: token.clone() });
    }

    Ok(expression)
}

fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let (tokens, errors) = Lexer::new(source).collect_all();

    match errors.into_iter().next() {
        Some(error) => Err(ParseError::Lexer(error)),
        None => Ok(tokens),
    }
}

#[derive(Clone)]
pub struct Parser<'tokens> {
    tokens: &'tokens [Token],
    pub cursor: usize,
}

impl<'tokens> Parser<'tokens> {
    pub fn new(tokens: &'tokens [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
        }
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let first = self.peek_token("statement")?.clone();
        let start = first.begin;

        let kind = match &first.kind {
            TokenKind::Punctuator(Punctuator::RightCurlyBracket) => {
                self.consume_token("`}`")?;
                StatementKind::BlockEnd
            }

            TokenKind::Keyword(keyword) if keyword.is_block_header() => {
                self.consume_token("block keyword")?;
                StatementKind::Header(self.parse_block_header(*keyword)?)
            }

            TokenKind::Identifier(name) if self.peek_nth_punctuator(1) == Some(Punctuator::Assignment) => {
                let name = name.clone();
                self.consume_token("variable name")?;
                self.consume_token("`=`")?;

                let expression = self.parse_expression()?;
                self.expect_punctuator(Punctuator::Semicolon, "`;` after assignment")?;
                StatementKind::Assignment(AssignStatement { name, expression })
            }

            _ => {
                let expression = self.parse_expression()?;
                self.expect_punctuator(Punctuator::Semicolon, "`;` after expression")?;
                StatementKind::Expression(expression)
            }
        };

        Ok(Statement {
            range: FileRange::new(start, self.previous_end()),
            kind,
        })
    }

    fn parse_block_header(&mut self, keyword: Keyword) -> ParseResult<BlockHeader> {
        let keyword = BlockKeyword::try_from(keyword)
            .map_err(|_| ParseError::Expected { expected: "block keyword", token: self.tokens[self.cursor - 1].clone() })?;

        let expression = self.parse_expression()?;
        self.expect_punctuator(Punctuator::LeftCurlyBracket, "`{` after block header")?;

        Ok(BlockHeader { keyword, expression })
    }

    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        self.parse_keyword_bi_expression(Self::parse_and_expression, Keyword::Or, BiOperator::Or)
    }

    fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        self.parse_keyword_bi_expression(Self::parse_not_expression, Keyword::And, BiOperator::And)
    }

    fn parse_not_expression(&mut self) -> ParseResult<Expression> {
        let is_not = self.peek_token("expression")
            .is_ok_and(|token| token.is_keyword(Keyword::Not) || token.is_punctuator(Punctuator::ExclamationMark));

        if !is_not {
            return self.parse_comparison_expression();
        }

        self.consume_token("`not`")?;
        let operand = self.parse_not_expression()?;

        Ok(Expression::Unary(UnaryExpression {
            operator: UnaryOperator::Not,
            operand: Box::new(operand),
        }))
    }

    fn parse_comparison_expression(&mut self) -> ParseResult<Expression> {
        const OPERATORS: &[(Punctuator, BiOperator)] = &[
            (Punctuator::Equals, BiOperator::Comparison(Comparison::Equality)),
            (Punctuator::NotEquals, BiOperator::Comparison(Comparison::Inequality)),
            (Punctuator::GreaterThan, BiOperator::Comparison(Comparison::GreaterThan)),
            (Punctuator::GreaterThanOrEqual, BiOperator::Comparison(Comparison::GreaterThanOrEqual)),
            (Punctuator::LessThan, BiOperator::Comparison(Comparison::LessThan)),
            (Punctuator::LessThanOrEqual, BiOperator::Comparison(Comparison::LessThanOrEqual)),
        ];

        self.parse_operator_chain(Self::parse_bitwise_expression, |token, next| {
            if token.is_keyword(Keyword::In) {
                return Some((BiOperator::In, 1));
            }

            if token.is_keyword(Keyword::Not) && next.is_some_and(|next| next.is_keyword(Keyword::In)) {
                return Some((BiOperator::NotIn, 2));
            }

            find_punctuator_operator(token, OPERATORS)
        })
    }

    fn parse_bitwise_expression(&mut self) -> ParseResult<Expression> {
        self.parse_bi_expression(Self::parse_shift_expression, &[
            (Punctuator::BitwiseAnd, BiOperator::BitwiseAnd),
            (Punctuator::BitwiseXor, BiOperator::BitwiseXor),
            (Punctuator::BitwiseOr, BiOperator::BitwiseOr),
        ])
    }

    fn parse_shift_expression(&mut self) -> ParseResult<Expression> {
        self.parse_bi_expression(Self::parse_additive_expression, &[
            (Punctuator::LeftShift, BiOperator::LeftShift),
            (Punctuator::RightShift, BiOperator::RightShift),
        ])
    }

    fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        self.parse_bi_expression(Self::parse_multiplicative_expression, &[
            (Punctuator::PlusSign, BiOperator::Add),
            (Punctuator::HyphenMinus, BiOperator::Subtract),
        ])
    }

    fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        self.parse_bi_expression(Self::parse_unary_expression, &[
            (Punctuator::Asterisk, BiOperator::Multiply),
            (Punctuator::Solidus, BiOperator::Divide),
            (Punctuator::DoubleSolidus, BiOperator::FloorDivide),
            (Punctuator::PercentageSign, BiOperator::Modulo),
        ])
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let operator = match self.peek_punctuator() {
            Some(Punctuator::PlusSign) => UnaryOperator::Plus,
            Some(Punctuator::HyphenMinus) => UnaryOperator::Negate,
            Some(Punctuator::Tilde) => UnaryOperator::BitwiseNot,
            _ => return self.parse_power_expression(),
        };

        self.consume_token("unary operator")?;
        let operand = self.parse_unary_expression()?;

        Ok(Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
        }))
    }

    /// Right associative, and binds tighter than a unary operator on its
    /// left but looser than one on its right: `-2 ** -1` is `-(2 ** (-1))`.
    fn parse_power_expression(&mut self) -> ParseResult<Expression> {
        let base = self.parse_primary_expression()?;

        if self.peek_punctuator() != Some(Punctuator::DoubleAsterisk) {
            return Ok(base);
        }

        self.consume_token("`**`")?;
        let exponent = self.parse_unary_expression()?;

        Ok(Expression::Binary(BiExpression {
            operator: BiOperator::Power,
            lhs: Box::new(base),
            rhs: Box::new(exponent),
        }))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let token = self.consume_token("expression")?;

        let expression = match token.kind {
            TokenKind::Integer(integer) => Expression::Literal(Value::Integer(integer)),
            TokenKind::Float(float) => Expression::Literal(Value::Float(float)),
            TokenKind::StringLiteral(str) => Expression::Literal(Value::String(str)),

            TokenKind::Keyword(Keyword::Null) => Expression::Literal(Value::Null),
            TokenKind::Keyword(Keyword::True) => Expression::Literal(Value::Bool(true)),
            TokenKind::Keyword(Keyword::False) => Expression::Literal(Value::Bool(false)),

            TokenKind::Identifier(name) => {
                if self.peek_punctuator() == Some(Punctuator::LeftParenthesis) {
                    self.consume_token("`(`")?;
                    let arguments = self.parse_argument_list()?;
                    Expression::Call(CallExpression { name, arguments })
                } else {
                    Expression::Reference(name)
                }
            }

            TokenKind::Punctuator(Punctuator::LeftParenthesis) => {
                let expression = self.parse_expression()?;
                self.expect_punctuator(Punctuator::RightParenthesis, "`)` after parenthesized expression")?;
                expression
            }

            _ => return Err(ParseError::UnknownStartOfExpression { token }),
        };

        Ok(expression)
    }

    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();

        if self.peek_punctuator() == Some(Punctuator::RightParenthesis) {
            self.consume_token("`)`")?;
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);

            let token = self.consume_token("`,` or `)` in argument list")?;
            match token.kind {
                TokenKind::Punctuator(Punctuator::Comma) => continue,
                TokenKind::Punctuator(Punctuator::RightParenthesis) => break,
                _ => return Err(ParseError::Expected { expected: "`,` or `)` in argument list", token }),
            }
        }

        Ok(arguments)
    }

    fn parse_keyword_bi_expression<F>(&mut self, operand: F, keyword: Keyword, operator: BiOperator) -> ParseResult<Expression>
            where F: FnMut(&mut Self) -> ParseResult<Expression> {
        self.parse_operator_chain(operand, |token, _| {
            token.is_keyword(keyword).then_some((operator, 1))
        })
    }

    fn parse_bi_expression<F>(&mut self, operand: F, operators: &[(Punctuator, BiOperator)]) -> ParseResult<Expression>
            where F: FnMut(&mut Self) -> ParseResult<Expression> {
        self.parse_operator_chain(operand, |token, _| find_punctuator_operator(token, operators))
    }

    /// Left-associative chain of `operand (operator operand)*`. The matcher
    /// sees the current and the next token and reports the operator and how
    /// many tokens it spans.
    fn parse_operator_chain<F, M>(&mut self, mut operand: F, matcher: M) -> ParseResult<Expression>
            where F: FnMut(&mut Self) -> ParseResult<Expression>,
                  M: Fn(&Token, Option<&Token>) -> Option<(BiOperator, usize)> {
        let mut expr = operand(self)?;

        loop {
            let Some(next) = self.tokens.get(self.cursor) else {
                break;
            };

            let Some((operator, token_count)) = matcher(next, self.tokens.get(self.cursor + 1)) else {
                break;
            };

            self.cursor += token_count;

            let lhs = expr;
            let rhs = operand(self)?;

            expr = Expression::Binary(BiExpression {
                operator,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }

        Ok(expr)
    }

    fn peek_token(&self, expected: &'static str) -> ParseResult<&Token> {
        match self.tokens.get(self.cursor) {
            Some(token) => Ok(token),
            None => Err(ParseError::EndOfFile { expected, location: self.previous_end() }),
        }
    }

    fn peek_punctuator(&self) -> Option<Punctuator> {
        self.peek_nth_punctuator(0)
    }

    fn peek_nth_punctuator(&self, n: usize) -> Option<Punctuator> {
        match self.tokens.get(self.cursor + n)?.kind {
            TokenKind::Punctuator(punctuator) => Some(punctuator),
            _ => None,
        }
    }

    fn consume_token(&mut self, expected: &'static str) -> ParseResult<Token> {
        let token = self.peek_token(expected)?.clone();
        self.cursor += 1;
        Ok(token)
    }

    fn expect_punctuator(&mut self, punctuator: Punctuator, expected: &'static str) -> ParseResult<()> {
        let token = self.consume_token(expected)?;

        if !token.is_punctuator(punctuator) {
            return Err(ParseError::Expected { expected, token });
        }

        Ok(())
    }

    fn previous_end(&self) -> FileLocation {
        match self.cursor.checked_sub(1).and_then(|idx| self.tokens.get(idx)) {
            Some(token) => token.end,
            None => self.tokens.last().map(|token| token.end).unwrap_or_default(),
        }
    }
}

fn find_punctuator_operator(token: &Token, operators: &[(Punctuator, BiOperator)]) -> Option<(BiOperator, usize)> {
    operators.iter()
        .find(|(punctuator, _)| token.is_punctuator(*punctuator))
        .map(|(_, operator)| (*operator, 1))
}

#[derive(Clone, Debug, PartialEq, Error, AsRefStr)]
pub enum ParseError {
    #[error("{} at {}", .0, .0.location)]
    Lexer(LexerError),

    #[error("unexpected end of file at {location}, expected {expected}")]
    EndOfFile { expected: &'static str, location: FileLocation },

    #[error("expected {expected} at {}, but got: {token}", token.begin)]
    Expected { expected: &'static str, token: Token },

    #[error("unknown start of expression at {}: {token}", token.begin)]
    UnknownStartOfExpression { token: Token },

    #[error("residual token after expression at {}: {token}", token.begin)]
    ResidualTokens { token: Token },
}

impl ParseError {
    #[must_use]
    pub fn location(&self) -> FileLocation {
        match self {
            Self::Lexer(error) => error.location,
            Self::EndOfFile { location, .. } => *location,
            Self::Expected { token, .. } => token.begin,
            Self::UnknownStartOfExpression { token } => token.begin,
            Self::ResidualTokens { token } => token.begin,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

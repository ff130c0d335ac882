//! Recursive-descent parser for the Nouva source language.
//!
//! The parser consumes the token stream produced by the lexer with bounded
//! lookahead (current token plus one peek) and no backtracking. The first
//! error is fatal; there is no recovery.

pub mod expr;
pub mod stmt;

use crate::parser::ast::{Identifier, Program};
use crate::parser::token::{Span, Token};
use thiserror::Error;

/// Maximum statement/expression nesting depth before the parser bails out.
pub const MAX_PARSE_DEPTH: usize = 200;

/// Parser error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token '{found}' at {span}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },
    #[error("{reason} at {span}")]
    InvalidSyntax { reason: String, span: Span },
    #[error("Maximum nesting depth ({MAX_PARSE_DEPTH}) exceeded at {span}")]
    DepthExceeded { span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => span,
            ParseError::InvalidSyntax { span, .. } => span,
            ParseError::DepthExceeded { span } => span,
        }
    }
}

/// Main parser structure.
pub struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    pub(crate) depth: usize,
    /// Whether `{` may follow an expression as a map-getter suffix.
    /// Disabled while parsing control-block test expressions so that
    /// `if x { }` sees a block, not a getter.
    pub(crate) brace_suffix: bool,
}

impl Parser {
    /// Create a parser over a token stream. The stream must end with `Eof`.
    pub fn new(tokens: Vec<(Token, Span)>) -> Self {
        debug_assert!(matches!(tokens.last(), Some((Token::Eof, _))));
        Self {
            tokens,
            pos: 0,
            depth: 0,
            brace_suffix: true,
        }
    }

    /// Parse a whole program.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start_span = self.current_span();
        let mut units = Vec::new();
        while !self.at_eof() {
            units.push(stmt::parse_statement(self)?);
        }
        let span = self.combine_spans(&start_span, &self.current_span());
        Ok(Program::new(units, span))
    }

    // ── Token stream access ──────────────────────────────────────────

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Look one token past the current one.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1).map(|(t, _)| t)
    }

    /// Look `n` tokens past the current one.
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(t, _)| t)
    }

    pub fn advance(&mut self) -> Span {
        let span = self.current_span();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        span
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    pub fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    /// Consume the token if it matches.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the expected token or fail.
    pub fn expect(&mut self, token: &Token) -> Result<Span, ParseError> {
        if self.check(token) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&token.to_string()))
        }
    }

    /// Consume an identifier token or fail.
    pub fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        if let Token::Identifier(name) = self.current() {
            let name = name.clone();
            let span = self.advance();
            Ok(Identifier::new(name, span))
        } else {
            Err(self.unexpected_token("an identifier"))
        }
    }

    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        start.merge(end)
    }

    pub fn unexpected_token(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current().to_string(),
            expected: expected.to_string(),
            span: self.current_span(),
        }
    }

    pub(crate) fn check_depth(&self) -> Result<(), ParseError> {
        if self.depth > MAX_PARSE_DEPTH {
            Err(ParseError::DepthExceeded {
                span: self.current_span(),
            })
        } else {
            Ok(())
        }
    }
}

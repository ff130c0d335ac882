//! Nouva parser - lexer and parser for the Nouva source language.
//!
//! This module provides lexical analysis (tokenization) and syntactic
//! analysis (parsing) for Nouva source code. Parsing is a deterministic
//! single pass with bounded lookahead; identical input text always yields
//! a structurally identical AST.
//!
//! # Example
//!
//! ```ignore
//! use nouva_engine::parser::parse;
//!
//! let program = parse("func add(a, b) { return a + b; }").unwrap();
//! assert_eq!(program.len(), 1);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

// Re-exports for convenience
pub use ast::Program;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use token::{Span, Token};

use thiserror::Error;

/// A fatal syntax error: the grammar rejected the input.
///
/// Always carries the offending position; never recovered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> &Span {
        match self {
            SyntaxError::Lex(e) => e.span(),
            SyntaxError::Parse(e) => e.span(),
        }
    }
}

/// Parse a Nouva source string into its canonical AST.
pub fn parse(source: &str) -> Result<Program, SyntaxError> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    Ok(parser.parse_program()?)
}

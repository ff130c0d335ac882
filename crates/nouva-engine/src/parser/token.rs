//! Token definitions for the Nouva source language.
//!
//! This module defines all tokens that can appear in Nouva source code,
//! including keywords, operators, literals, and special tokens.

use serde::Serialize;
use std::fmt;

/// A token in the Nouva source language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Import,
    Var,
    Val,
    Func,
    Class,
    Init,

    // Control flow
    If,
    Else,
    While,
    For,
    In,
    Switch,
    Case,
    Default,
    Return,
    Throw,
    As,

    // Literals
    Number(String),
    /// Digits of a binary literal (`0b101` -> "101")
    BinaryNumber(String),
    /// Digits of an octal literal (`0o17` -> "17")
    OctalNumber(String),
    /// Digits of a hex literal (`0x1F` -> "1F")
    HexNumber(String),
    /// Digits and radix of an arbitrary-base literal (`144_5` -> ("144", 5))
    BasedNumber(String, u32),
    StringLiteral(String),
    True,
    False,
    Null,

    /// Identifier, suffix markers (`#`, `?`) included verbatim
    Identifier(String),

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // exponent ^

    // Bitwise operators
    Ampersand,
    Pipe,
    AngleXor, // bitwise xor ><
    ShiftLeft,
    ShiftRight,

    // Logical operators
    AmpAmp,
    PipePipe,

    // Comparison operators
    EqualEqual,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Unary operators
    Bang,
    Tilde,

    // Assignment operators
    Equal,
    ColonEqual, // definition :=
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    AngleXorEqual, // ><=
    ShiftLeftEqual,
    ShiftRightEqual,
    AmpAmpEqual,
    PipePipeEqual,
    InvertEqual, // =!=
    PlusPlus,
    MinusMinus,

    // Punctuation
    DotDot,
    Arrow, // ->
    Dot,
    Comma,
    Colon,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // End of input
    Eof,
}

/// Source location of a token or AST node.
///
/// Byte offsets plus 1-based line/column of the region start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: if self.line <= other.line {
                self.column
            } else {
                other.column
            },
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Import => write!(f, "import"),
            Token::Var => write!(f, "var"),
            Token::Val => write!(f, "val"),
            Token::Func => write!(f, "func"),
            Token::Class => write!(f, "class"),
            Token::Init => write!(f, "init"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::For => write!(f, "for"),
            Token::In => write!(f, "in"),
            Token::Switch => write!(f, "switch"),
            Token::Case => write!(f, "case"),
            Token::Default => write!(f, "default"),
            Token::Return => write!(f, "return"),
            Token::Throw => write!(f, "throw"),
            Token::As => write!(f, "as"),
            Token::Number(text) => write!(f, "{}", text),
            Token::BinaryNumber(digits) => write!(f, "0b{}", digits),
            Token::OctalNumber(digits) => write!(f, "0o{}", digits),
            Token::HexNumber(digits) => write!(f, "0x{}", digits),
            Token::BasedNumber(digits, base) => write!(f, "{}_{}", digits, base),
            Token::StringLiteral(value) => write!(f, "\"{}\"", value),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Ampersand => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::AngleXor => write!(f, "><"),
            Token::ShiftLeft => write!(f, "<<"),
            Token::ShiftRight => write!(f, ">>"),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::EqualEqual => write!(f, "=="),
            Token::NotEqual => write!(f, "!="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::Bang => write!(f, "!"),
            Token::Tilde => write!(f, "~"),
            Token::Equal => write!(f, "="),
            Token::ColonEqual => write!(f, ":="),
            Token::PlusEqual => write!(f, "+="),
            Token::MinusEqual => write!(f, "-="),
            Token::StarEqual => write!(f, "*="),
            Token::SlashEqual => write!(f, "/="),
            Token::CaretEqual => write!(f, "^="),
            Token::AmpEqual => write!(f, "&="),
            Token::PipeEqual => write!(f, "|="),
            Token::AngleXorEqual => write!(f, "><="),
            Token::ShiftLeftEqual => write!(f, "<<="),
            Token::ShiftRightEqual => write!(f, ">>="),
            Token::AmpAmpEqual => write!(f, "&&="),
            Token::PipePipeEqual => write!(f, "||="),
            Token::InvertEqual => write!(f, "=!="),
            Token::PlusPlus => write!(f, "++"),
            Token::MinusMinus => write!(f, "--"),
            Token::DotDot => write!(f, ".."),
            Token::Arrow => write!(f, "->"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

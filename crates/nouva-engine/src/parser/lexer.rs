//! Lexer for the Nouva source language.
//!
//! Tokenization is driven by a logos-derived token enum which is converted
//! into the main [`Token`] stream with precise source spans attached.

use crate::parser::token::{Span, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum used internally for tokenization.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
enum RawToken {
    // Keywords (must come before identifiers)
    #[token("import")]
    Import,
    #[token("var")]
    Var,
    #[token("val")]
    Val,
    #[token("func")]
    Func,
    #[token("class")]
    Class,
    #[token("init")]
    Init,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("as")]
    As,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Literals
    #[regex(r"0b[01]+", |lex| lex.slice()[2..].to_string())]
    BinaryNumber(String),
    #[regex(r"0o[0-7]+", |lex| lex.slice()[2..].to_string())]
    OctalNumber(String),
    #[regex(r"0x[0-9a-fA-F]+", |lex| lex.slice()[2..].to_string())]
    HexNumber(String),
    // Arbitrary-base literal: digits, separator, radix ("144_5").
    // Split on the FIRST separator; the digit string stays verbatim.
    #[regex(r"[0-9][0-9a-zA-Z]*_[0-9]+", |lex| {
        let (digits, base) = lex.slice().split_once('_')?;
        Some((digits.to_string(), base.parse::<u32>().ok()?))
    })]
    BasedNumber((String, u32)),
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| unescape(lex.slice()))]
    StringLiteral(String),

    // Identifier with optional suffix markers (`#` private, `?` nullable).
    // Markers are part of the token and survive into the AST.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*[#?]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Multi-character operators
    #[token("><=")]
    AngleXorEqual,
    #[token("=!=")]
    InvertEqual,
    #[token("<<=")]
    ShiftLeftEqual,
    #[token(">>=")]
    ShiftRightEqual,
    #[token("&&=")]
    AmpAmpEqual,
    #[token("||=")]
    PipePipeEqual,
    #[token("><")]
    AngleXor,
    #[token("<<")]
    ShiftLeft,
    #[token(">>")]
    ShiftRight,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token(":=")]
    ColonEqual,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("^=")]
    CaretEqual,
    #[token("&=")]
    AmpEqual,
    #[token("|=")]
    PipeEqual,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("..")]
    DotDot,
    #[token("->")]
    Arrow,

    // Single-character operators and punctuation
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Pipe,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("=")]
    Equal,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
}

/// Process escape sequences in a quoted string slice.
///
/// Returns `None` on an unknown escape so logos reports the token as an error.
fn unescape(quoted: &str) -> Option<String> {
    let inner = &quoted[1..quoted.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Lexer error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{char}' at {span}")]
    UnexpectedCharacter { char: char, span: Span },
    #[error("Unterminated string literal at {span}")]
    UnterminatedString { span: Span },
    #[error("Invalid number literal '{text}' at {span}")]
    InvalidNumber { text: String, span: Span },
    #[error("Invalid escape sequence in string at {span}")]
    InvalidEscape { span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } => span,
            LexError::UnterminatedString { span } => span,
            LexError::InvalidNumber { span, .. } => span,
            LexError::InvalidEscape { span } => span,
        }
    }
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Map a byte offset to a 1-based (line, column) pair.
    fn position(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let column = offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, column as u32)
    }

    fn span_at(&self, range: std::ops::Range<usize>) -> Span {
        let (line, column) = self.position(range.start);
        Span::new(range.start, range.end, line, column)
    }

    /// Tokenize the whole source.
    ///
    /// The returned stream always ends with an `Eof` token. The first lexical
    /// error is fatal; there is no recovery.
    pub fn tokenize(self) -> Result<Vec<(Token, Span)>, LexError> {
        let mut tokens = Vec::new();
        let mut lexer = RawToken::lexer(self.source);

        while let Some(result) = lexer.next() {
            let span = self.span_at(lexer.span());
            let raw = match result {
                Ok(raw) => raw,
                Err(()) => {
                    let slice = lexer.slice();
                    return Err(if slice.len() >= 2 && slice.starts_with('"') && slice.ends_with('"')
                    {
                        // The string regex matched but the escape callback rejected it
                        LexError::InvalidEscape { span }
                    } else if slice.starts_with('"') {
                        LexError::UnterminatedString { span }
                    } else if slice.starts_with(|c: char| c.is_ascii_digit()) {
                        LexError::InvalidNumber {
                            text: slice.to_string(),
                            span,
                        }
                    } else {
                        LexError::UnexpectedCharacter {
                            char: slice.chars().next().unwrap_or('\0'),
                            span,
                        }
                    });
                }
            };
            tokens.push((convert(raw), span));
        }

        let end = self.source.len();
        tokens.push((Token::Eof, self.span_at(end..end)));
        Ok(tokens)
    }
}

fn convert(raw: RawToken) -> Token {
    match raw {
        RawToken::Import => Token::Import,
        RawToken::Var => Token::Var,
        RawToken::Val => Token::Val,
        RawToken::Func => Token::Func,
        RawToken::Class => Token::Class,
        RawToken::Init => Token::Init,
        RawToken::If => Token::If,
        RawToken::Else => Token::Else,
        RawToken::While => Token::While,
        RawToken::For => Token::For,
        RawToken::In => Token::In,
        RawToken::Switch => Token::Switch,
        RawToken::Case => Token::Case,
        RawToken::Default => Token::Default,
        RawToken::Return => Token::Return,
        RawToken::Throw => Token::Throw,
        RawToken::As => Token::As,
        RawToken::True => Token::True,
        RawToken::False => Token::False,
        RawToken::Null => Token::Null,
        RawToken::BinaryNumber(digits) => Token::BinaryNumber(digits),
        RawToken::OctalNumber(digits) => Token::OctalNumber(digits),
        RawToken::HexNumber(digits) => Token::HexNumber(digits),
        RawToken::BasedNumber((digits, base)) => Token::BasedNumber(digits, base),
        RawToken::Number(text) => Token::Number(text),
        RawToken::StringLiteral(value) => Token::StringLiteral(value),
        RawToken::Identifier(name) => Token::Identifier(name),
        RawToken::AngleXorEqual => Token::AngleXorEqual,
        RawToken::InvertEqual => Token::InvertEqual,
        RawToken::ShiftLeftEqual => Token::ShiftLeftEqual,
        RawToken::ShiftRightEqual => Token::ShiftRightEqual,
        RawToken::AmpAmpEqual => Token::AmpAmpEqual,
        RawToken::PipePipeEqual => Token::PipePipeEqual,
        RawToken::AngleXor => Token::AngleXor,
        RawToken::ShiftLeft => Token::ShiftLeft,
        RawToken::ShiftRight => Token::ShiftRight,
        RawToken::AmpAmp => Token::AmpAmp,
        RawToken::PipePipe => Token::PipePipe,
        RawToken::EqualEqual => Token::EqualEqual,
        RawToken::NotEqual => Token::NotEqual,
        RawToken::LessEqual => Token::LessEqual,
        RawToken::GreaterEqual => Token::GreaterEqual,
        RawToken::ColonEqual => Token::ColonEqual,
        RawToken::PlusEqual => Token::PlusEqual,
        RawToken::MinusEqual => Token::MinusEqual,
        RawToken::StarEqual => Token::StarEqual,
        RawToken::SlashEqual => Token::SlashEqual,
        RawToken::CaretEqual => Token::CaretEqual,
        RawToken::AmpEqual => Token::AmpEqual,
        RawToken::PipeEqual => Token::PipeEqual,
        RawToken::PlusPlus => Token::PlusPlus,
        RawToken::MinusMinus => Token::MinusMinus,
        RawToken::DotDot => Token::DotDot,
        RawToken::Arrow => Token::Arrow,
        RawToken::Plus => Token::Plus,
        RawToken::Minus => Token::Minus,
        RawToken::Star => Token::Star,
        RawToken::Slash => Token::Slash,
        RawToken::Caret => Token::Caret,
        RawToken::Ampersand => Token::Ampersand,
        RawToken::Pipe => Token::Pipe,
        RawToken::Less => Token::Less,
        RawToken::Greater => Token::Greater,
        RawToken::Bang => Token::Bang,
        RawToken::Tilde => Token::Tilde,
        RawToken::Equal => Token::Equal,
        RawToken::Dot => Token::Dot,
        RawToken::Comma => Token::Comma,
        RawToken::Colon => Token::Colon,
        RawToken::Semicolon => Token::Semicolon,
        RawToken::LeftParen => Token::LeftParen,
        RawToken::RightParen => Token::RightParen,
        RawToken::LeftBrace => Token::LeftBrace,
        RawToken::RightBrace => Token::RightBrace,
        RawToken::LeftBracket => Token::LeftBracket,
        RawToken::RightBracket => Token::RightBracket,
    }
}

//! Abstract Syntax Tree (AST) for the Nouva source language.
//!
//! This module defines the canonical tagged-node tree produced by the parser:
//! - Program structure and blocks
//! - Statements (declarations, control flow, functions, classes)
//! - Expressions (literals, operators, invocations, lambdas)
//!
//! Every node is a closed tagged variant carrying only its own fields, and
//! every node includes a `Span` for source location tracking. The tree is
//! built once per invocation and is immutable thereafter; children are owned
//! exclusively by their parent.

use crate::parser::token::Span;
use serde::Serialize;

pub mod expression;
pub mod statement;

pub use expression::*;
pub use statement::*;

/// Root node: a Nouva source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Top-level units (imports, declarations, functions, classes, statements)
    pub units: Vec<Statement>,

    /// Span covering the entire program
    pub span: Span,
}

impl Program {
    pub fn new(units: Vec<Statement>, span: Span) -> Self {
        Self { units, span }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
}

/// Identifier.
///
/// The name string may carry the suffix markers `#` (private) and `?`
/// (nullable), and `!` on invocation callees. Markers are semantic, not
/// cosmetic: they survive parsing unchanged and are erased only by the
/// code generator's sanitization rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Type annotation attached to a declaration or cast.
///
/// Only the name is tracked; the engine never checks type correctness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeAnnotation {
    pub name: String,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

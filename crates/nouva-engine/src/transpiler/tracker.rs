//! Declaration tracking for validated emission.
//!
//! The tracker holds the set of identifiers declared during a single
//! emission run. It is consulted and updated in emission order by the code
//! generator, and discarded when the run completes; it is never shared
//! across calls.
//!
//! Names are matched in sanitized form, using exactly the erasure rule the
//! emitter applies, so `x` and `x?` refer to the same binding.

use crate::parser::token::Span;
use crate::transpiler::emitter::sanitize_identifier;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// A fatal declaration violation. Aborts the whole emission run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("Identifier '{name}' already declared (at {span})")]
    AlreadyDeclared { name: String, span: Span },
    #[error("Identifier '{name}' not declared (at {span})")]
    NotDeclared { name: String, span: Span },
}

impl CompileError {
    pub fn span(&self) -> &Span {
        match self {
            CompileError::AlreadyDeclared { span, .. } => span,
            CompileError::NotDeclared { span, .. } => span,
        }
    }
}

/// Run-scoped set of declared identifier names.
#[derive(Debug, Default)]
pub struct DeclarationTracker {
    declared: FxHashSet<String>,
}

impl DeclarationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration (var/val/function/class).
    ///
    /// Fails if the sanitized name is already present.
    pub fn declare(&mut self, name: &str, span: Span) -> Result<(), CompileError> {
        let name = sanitize_identifier(name);
        if !self.declared.insert(name.clone()) {
            return Err(CompileError::AlreadyDeclared { name, span });
        }
        Ok(())
    }

    /// Require that an identifier was declared earlier in this run.
    ///
    /// Consulted at definition, reassignment and invocation sites.
    pub fn expect_declared(&self, name: &str, span: Span) -> Result<(), CompileError> {
        let name = sanitize_identifier(name);
        if !self.declared.contains(&name) {
            return Err(CompileError::NotDeclared { name, span });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

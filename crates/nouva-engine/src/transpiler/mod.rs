//! Nouva transpiler - validated and plain emission to JS/TS.
//!
//! The pipeline is a single synchronous pass per invocation:
//! parse, emit (optionally consulting the declaration tracker), then
//! resolve dialect tags. Target and mode are explicit per-call parameters;
//! there is no process-wide state, so concurrent callers are safe.

pub mod emitter;
pub mod tags;
pub mod tracker;

pub use emitter::{sanitize_identifier, Emitter};
pub use tags::resolve;
pub use tracker::{CompileError, DeclarationTracker};

use crate::parser::{parse, SyntaxError};
use thiserror::Error;

/// Target dialect of the emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Js,
    Ts,
}

/// Emission mode: plain transpilation or validated compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Plain,
    Validated,
}

/// Any fatal transpilation failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranspileError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),
}

/// Plain emission: no declaration checks, dialect tags partially resolved
/// with the shared `ES` fragments kept and JS/TS regions left in place.
pub fn transpile(source: &str) -> Result<String, TranspileError> {
    let program = parse(source)?;
    let tagged = Emitter::new(Mode::Plain).emit_program(&program)?;
    Ok(tags::resolve_es(&tagged))
}

/// Validated emission: declaration tracking active, tags fully resolved for
/// the requested target. Fails on the first declaration violation.
pub fn compile(source: &str, target: Target) -> Result<String, TranspileError> {
    let program = parse(source)?;
    let tagged = Emitter::new(Mode::Validated).emit_program(&program)?;
    Ok(tags::resolve(&tagged, target))
}

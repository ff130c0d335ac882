//! Nouva language engine: lexer, parser, and JS/TS transpiler.
//!
//! Nouva is a small source language that lowers to the JavaScript family,
//! optionally with TypeScript annotations. The engine is a strictly forward
//! pipeline:
//!
//! ```text
//! source text -> tokens -> AST -> tagged target text -> resolved target text
//! ```
//!
//! Three entry points cover the three modes of use:
//!
//! - [`parse`] builds the canonical AST (serializable for debug dumps)
//! - [`transpile`] emits target text without declaration validation
//! - [`compile`] emits fully resolved text for a [`Target`] dialect with
//!   the declaration tracker active
//!
//! # Example
//!
//! ```ignore
//! use nouva_engine::{compile, Target};
//!
//! let js = compile("func add(a, b) { return a + b; }", Target::Js).unwrap();
//! assert!(js.contains("function add(a, b)"));
//! ```

pub mod parser;
pub mod transpiler;

pub use parser::{parse, Program, Span, SyntaxError};
pub use transpiler::{
    compile, sanitize_identifier, transpile, CompileError, Mode, Target, TranspileError,
};

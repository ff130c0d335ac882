//! Statement AST nodes
//!
//! This module defines all statement and block forms of the Nouva language:
//! imports, variable declarations, assignments, control blocks, functions
//! and classes.

use super::*;
use crate::parser::token::Span;

/// Statement (top-level unit or line of code)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    /// Module import: `import "path";`
    Import(ImportStatement),

    /// Variable declaration: `var x: Type = e;` / `val y;`
    Declaration(Declaration),

    /// Definition of a previously declared identifier: `x := e;`
    Definition(Definition),

    /// Compound reassignment: `x += e;`
    Reassignment(Reassignment),

    /// Unary mutating reassignment: `x++;`, `x--;`, `x=!=;`
    UnaryReassignment(UnaryReassignment),

    /// Return statement: `return e;`
    Return(ReturnStatement),

    /// Throw statement: `throw e;`
    Throw(ThrowStatement),

    /// If block with optional else-chain
    If(IfBlock),

    /// While loop
    While(WhileBlock),

    /// For-over-range loop: `for i in a..b { }`
    For(ForBlock),

    /// Switch block
    Switch(SwitchBlock),

    /// Function declaration: `func name(a, b) { }`
    Function(FunctionDecl),

    /// Class declaration
    Class(ClassDecl),

    /// Bare expression used as a statement
    Expression(ExpressionStatement),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::Import(s) => &s.span,
            Statement::Declaration(s) => &s.span,
            Statement::Definition(s) => &s.span,
            Statement::Reassignment(s) => &s.span,
            Statement::UnaryReassignment(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::For(s) => &s.span,
            Statement::Switch(s) => &s.span,
            Statement::Function(s) => &s.span,
            Statement::Class(s) => &s.span,
            Statement::Expression(s) => &s.span,
        }
    }
}

/// Ordered sequence of statements, used as every block body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }
}

/// Module import statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportStatement {
    pub path: String,
    pub span: Span,
}

/// Declaration keyword: `var` (mutable) or `val` (immutable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclarationKeyword {
    Var,
    Val,
}

/// Variable declaration: keyword, identifier, declaration body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub keyword: DeclarationKeyword,
    pub name: Identifier,
    pub body: DeclarationBody,
    pub span: Span,
}

/// The (type, value) pair carried by a declaration.
///
/// `type_annotation` is `None` exactly when no annotation was written;
/// `value` is `None` when the declaration introduces an uninitialized
/// binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationBody {
    pub type_annotation: Option<TypeAnnotation>,
    pub value: Option<Expression>,
}

/// Definition statement: `x := e;` (assumes prior declaration)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub name: Identifier,
    pub value: Expression,
    pub span: Span,
}

/// Compound reassignment statement: `x <op>= e;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reassignment {
    pub name: Identifier,
    pub op: AssignOp,
    pub value: Expression,
    pub span: Span,
}

/// Unary mutating reassignment: `x++;`, `x--;`, `x=!=;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryReassignment {
    pub name: Identifier,
    pub op: UnaryAssignOp,
    pub span: Span,
}

/// Return statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// Throw statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    pub value: Expression,
    pub span: Span,
}

/// If block.
///
/// `iffalse` is `None` exactly when no else-clause was written; it is never
/// an empty block by default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfBlock {
    pub test: Expression,
    pub iftrue: Block,
    pub iffalse: Option<ElseBranch>,
    pub span: Span,
}

/// The else-side of an if block: a plain block or a chained `else if`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ElseBranch {
    Else(Block),
    ElseIf(Box<IfBlock>),
}

/// While loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileBlock {
    pub test: Expression,
    pub body: Block,
    pub span: Span,
}

/// For-over-range loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForBlock {
    pub binding: Identifier,
    pub range: RangeExpression,
    pub body: Block,
    pub span: Span,
}

/// Switch block: scrutinee, ordered cases, at most one default
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchBlock {
    pub scrutinee: Expression,
    pub cases: Vec<SwitchCase>,
    pub default: Option<SwitchDefault>,
    pub span: Span,
}

/// A single `case v1, v2 { }` arm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    pub values: Vec<Expression>,
    pub body: Block,
    pub span: Span,
}

/// The `default { }` arm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchDefault {
    pub body: Block,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

/// Class declaration: optional constructor plus ordered methods.
///
/// The constructor's "assign each parameter to a same-named field" body is
/// synthesized by the code generator, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: Identifier,
    pub constructor: Option<Constructor>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}

/// Class constructor: `init(a, b) { }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constructor {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

/// Class method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

/// Expression statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

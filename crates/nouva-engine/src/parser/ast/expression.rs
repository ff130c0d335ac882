//! Expression AST nodes
//!
//! This module defines all expression types in the Nouva language, including
//! literals, the four binary expression families, invocations, getters,
//! lambdas and typed expressions. Operator enums carry their source-language
//! symbol via `as_str`; source-to-target translation lives in the emitter.

use super::*;
use crate::parser::token::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    /// Identifier reference (markers intact)
    Identifier(Identifier),

    /// Decimal number literal: 42, 3.5
    Number(NumberLiteral),

    /// Based number literal: 0b101, 0o17, 0x1F, 144_5
    BasedNumber(BasedNumberLiteral),

    /// String literal: "hello"
    String(StringLiteral),

    /// Boolean literal: true, false
    Boolean(BooleanLiteral),

    /// Null literal
    Null(NullLiteral),

    /// Array literal with explicit index/value pairs: [0: a, 1: b]
    Array(ArrayLiteral),

    /// Map literal: { k: v }
    Map(MapLiteral),

    /// Range: a..b
    Range(RangeExpression),

    /// Unary expression: !x, -y, ~z
    Unary(UnaryExpression),

    /// Arithmetic binary expression: a + b, a ^ b
    Math(MathExpression),

    /// Bitwise binary expression: a & b, a >< b
    Bitwise(BitwiseExpression),

    /// Logical binary expression: a && b
    Logical(LogicalExpression),

    /// Comparison binary expression: a <= b
    Comparison(ComparisonExpression),

    /// Function invocation, optionally with an exception handler
    Invocation(FunctionInvocation),

    /// Method call: recv.m(args)
    MethodCall(MethodCall),

    /// Array getter: a[e]
    ArrayGetter(ArrayGetter),

    /// Map getter: m{e}
    MapGetter(MapGetter),

    /// Lambda: (a, b) -> e
    Lambda(LambdaExpression),

    /// Typed expression: e as Type
    Typed(TypedExpression),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> &Span {
        match self {
            Expression::Identifier(e) => &e.span,
            Expression::Number(e) => &e.span,
            Expression::BasedNumber(e) => &e.span,
            Expression::String(e) => &e.span,
            Expression::Boolean(e) => &e.span,
            Expression::Null(e) => &e.span,
            Expression::Array(e) => &e.span,
            Expression::Map(e) => &e.span,
            Expression::Range(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Math(e) => &e.span,
            Expression::Bitwise(e) => &e.span,
            Expression::Logical(e) => &e.span,
            Expression::Comparison(e) => &e.span,
            Expression::Invocation(e) => &e.span,
            Expression::MethodCall(e) => &e.span,
            Expression::ArrayGetter(e) => &e.span,
            Expression::MapGetter(e) => &e.span,
            Expression::Lambda(e) => &e.span,
            Expression::Typed(e) => &e.span,
        }
    }
}

/// Decimal number literal.
///
/// The text is stored verbatim and never numerically coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLiteral {
    pub text: String,
    pub span: Span,
}

/// Based number literal.
///
/// The digit string is stored verbatim; it is only handed to a runtime
/// base-parse call for bases without a native target prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasedNumberLiteral {
    pub digits: String,
    pub base: u32,
    pub span: Span,
}

/// String literal (escape sequences already processed)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

/// Boolean literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

/// Null literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullLiteral {
    pub span: Span,
}

/// Array literal: parallel ordered index and value sequences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub indices: Vec<Expression>,
    pub values: Vec<Expression>,
    pub span: Span,
}

/// Map literal: parallel ordered key and value sequences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLiteral {
    pub keys: Vec<Expression>,
    pub values: Vec<Expression>,
    pub span: Span,
}

/// Range: start..end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeExpression {
    pub start: Box<Expression>,
    pub end: Box<Expression>,
    pub span: Span,
}

/// Unary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// Arithmetic binary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathExpression {
    pub lhs: Box<Expression>,
    pub op: MathOp,
    pub rhs: Box<Expression>,
    pub span: Span,
}

/// Bitwise binary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitwiseExpression {
    pub lhs: Box<Expression>,
    pub op: BitwiseOp,
    pub rhs: Box<Expression>,
    pub span: Span,
}

/// Logical binary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpression {
    pub lhs: Box<Expression>,
    pub op: LogicalOp,
    pub rhs: Box<Expression>,
    pub span: Span,
}

/// Comparison binary expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonExpression {
    pub lhs: Box<Expression>,
    pub op: ComparisonOp,
    pub rhs: Box<Expression>,
    pub span: Span,
}

/// Function invocation.
///
/// The callee identifier may carry the suffix markers `!`, `?`, `#`, all of
/// which are stripped at emission. `handler` is the optional exception
/// handler expression attached with `f(args) ! handler`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionInvocation {
    pub callee: Identifier,
    pub args: Vec<Expression>,
    pub handler: Option<Box<Expression>>,
    pub span: Span,
}

/// Method call on a receiver identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCall {
    pub receiver: Identifier,
    pub method: String,
    pub args: Vec<Expression>,
    pub span: Span,
}

/// Array getter: `a[index]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayGetter {
    pub target: Identifier,
    pub index: Box<Expression>,
    pub span: Span,
}

/// Map getter: `m{key}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapGetter {
    pub target: Identifier,
    pub key: Box<Expression>,
    pub span: Span,
}

/// Lambda expression: `(a, b) -> e` or `(a) -> { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaExpression {
    pub params: Vec<Identifier>,
    pub body: LambdaBody,
    pub span: Span,
}

/// Lambda body: a bare expression or a statement block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Block),
}

/// Typed expression: a declared type attached to a value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedExpression {
    pub ty: TypeAnnotation,
    pub value: Box<Expression>,
    pub span: Span,
}

// ============================================================================
// Operators
// ============================================================================

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Positive,
    Negative,
    Not,
    BitNot,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Positive => "+",
            UnaryOp::Negative => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
}

impl MathOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            MathOp::Add => "+",
            MathOp::Subtract => "-",
            MathOp::Multiply => "*",
            MathOp::Divide => "/",
            MathOp::Exponent => "^",
        }
    }
}

/// Bitwise operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
}

impl BitwiseOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BitwiseOp::And => "&",
            BitwiseOp::Or => "|",
            BitwiseOp::Xor => "><",
            BitwiseOp::ShiftLeft => "<<",
            BitwiseOp::ShiftRight => ">>",
        }
    }
}

/// Logical operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterEqual => ">=",
        }
    }
}

/// Compound assignment operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    LogAnd,
    LogOr,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Add => "+=",
            AssignOp::Subtract => "-=",
            AssignOp::Multiply => "*=",
            AssignOp::Divide => "/=",
            AssignOp::Exponent => "^=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "><=",
            AssignOp::ShiftLeft => "<<=",
            AssignOp::ShiftRight => ">>=",
            AssignOp::LogAnd => "&&=",
            AssignOp::LogOr => "||=",
        }
    }
}

/// Unary mutating assignment operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryAssignOp {
    Increment,
    Decrement,
    /// Invert-assign `=!=`: lowers to `x = !x`
    Invert,
}

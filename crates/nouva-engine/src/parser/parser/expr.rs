//! Expression parsing
//!
//! Precedence-climbing over the operator families, loosest to tightest:
//! logical < comparison < bitwise < additive < multiplicative < exponent
//! (right-associative) < unary < postfix. All binary levels build the
//! dedicated expression node of their family.

use super::{ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::{Span, Token};

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.depth += 1;
    if let Err(e) = parser.check_depth() {
        parser.depth -= 1;
        return Err(e);
    }

    let result = parse_expression_inner(parser);

    parser.depth -= 1;
    result
}

fn parse_expression_inner(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expr = parse_logical(parser)?;

    // `e as Type` cast
    if parser.eat(&Token::As) {
        let ty = parser.expect_identifier()?;
        let span = parser.combine_spans(expr.span(), &ty.span);
        return Ok(Expression::Typed(TypedExpression {
            ty: TypeAnnotation::new(ty.name, ty.span),
            value: Box::new(expr),
            span,
        }));
    }

    // `a..b` range
    if parser.check(&Token::DotDot) {
        parser.advance();
        let end = parse_logical(parser)?;
        let span = parser.combine_spans(expr.span(), end.span());
        return Ok(Expression::Range(RangeExpression {
            start: Box::new(expr),
            end: Box::new(end),
            span,
        }));
    }

    Ok(expr)
}

/// Parse a range expression where the grammar requires one (for-loop heads).
pub fn parse_range(parser: &mut Parser) -> Result<RangeExpression, ParseError> {
    let start = parse_logical(parser)?;
    parser.expect(&Token::DotDot)?;
    let end = parse_logical(parser)?;

    let span = parser.combine_spans(start.span(), end.span());
    Ok(RangeExpression {
        start: Box::new(start),
        end: Box::new(end),
        span,
    })
}

// ============================================================================
// Binary operator levels
// ============================================================================

fn parse_logical(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut lhs = parse_comparison(parser)?;
    loop {
        let op = match parser.current() {
            Token::AmpAmp => LogicalOp::And,
            Token::PipePipe => LogicalOp::Or,
            _ => break,
        };
        parser.advance();
        let rhs = parse_comparison(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        lhs = Expression::Logical(LogicalExpression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }
    Ok(lhs)
}

fn parse_comparison(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut lhs = parse_bitwise(parser)?;
    loop {
        let op = match parser.current() {
            Token::EqualEqual => ComparisonOp::Equal,
            Token::NotEqual => ComparisonOp::NotEqual,
            Token::Less => ComparisonOp::Less,
            Token::LessEqual => ComparisonOp::LessEqual,
            Token::Greater => ComparisonOp::Greater,
            Token::GreaterEqual => ComparisonOp::GreaterEqual,
            _ => break,
        };
        parser.advance();
        let rhs = parse_bitwise(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        lhs = Expression::Comparison(ComparisonExpression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }
    Ok(lhs)
}

fn parse_bitwise(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut lhs = parse_additive(parser)?;
    loop {
        let op = match parser.current() {
            Token::Ampersand => BitwiseOp::And,
            Token::Pipe => BitwiseOp::Or,
            Token::AngleXor => BitwiseOp::Xor,
            Token::ShiftLeft => BitwiseOp::ShiftLeft,
            Token::ShiftRight => BitwiseOp::ShiftRight,
            _ => break,
        };
        parser.advance();
        let rhs = parse_additive(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        lhs = Expression::Bitwise(BitwiseExpression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }
    Ok(lhs)
}

fn parse_additive(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut lhs = parse_multiplicative(parser)?;
    loop {
        let op = match parser.current() {
            Token::Plus => MathOp::Add,
            Token::Minus => MathOp::Subtract,
            _ => break,
        };
        parser.advance();
        let rhs = parse_multiplicative(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        lhs = Expression::Math(MathExpression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }
    Ok(lhs)
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut lhs = parse_exponent(parser)?;
    loop {
        let op = match parser.current() {
            Token::Star => MathOp::Multiply,
            Token::Slash => MathOp::Divide,
            _ => break,
        };
        parser.advance();
        let rhs = parse_exponent(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        lhs = Expression::Math(MathExpression {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        });
    }
    Ok(lhs)
}

/// Exponent is right-associative: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
fn parse_exponent(parser: &mut Parser) -> Result<Expression, ParseError> {
    let lhs = parse_unary(parser)?;
    if parser.check(&Token::Caret) {
        parser.advance();
        let rhs = parse_exponent(parser)?;
        let span = parser.combine_spans(lhs.span(), rhs.span());
        return Ok(Expression::Math(MathExpression {
            lhs: Box::new(lhs),
            op: MathOp::Exponent,
            rhs: Box::new(rhs),
            span,
        }));
    }
    Ok(lhs)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let op = match parser.current() {
        Token::Plus => Some(UnaryOp::Positive),
        Token::Minus => Some(UnaryOp::Negative),
        Token::Bang => Some(UnaryOp::Not),
        Token::Tilde => Some(UnaryOp::BitNot),
        _ => None,
    };
    if let Some(op) = op {
        let start_span = parser.advance();
        let operand = parse_unary(parser)?;
        let span = parser.combine_spans(&start_span, operand.span());
        return Ok(Expression::Unary(UnaryExpression {
            op,
            operand: Box::new(operand),
            span,
        }));
    }
    parse_primary(parser)
}

// ============================================================================
// Primary expressions
// ============================================================================

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.current().clone() {
        Token::Number(text) => {
            let span = parser.advance();
            Ok(Expression::Number(NumberLiteral { text, span }))
        }
        Token::BinaryNumber(digits) => {
            let span = parser.advance();
            Ok(Expression::BasedNumber(BasedNumberLiteral {
                digits,
                base: 2,
                span,
            }))
        }
        Token::OctalNumber(digits) => {
            let span = parser.advance();
            Ok(Expression::BasedNumber(BasedNumberLiteral {
                digits,
                base: 8,
                span,
            }))
        }
        Token::HexNumber(digits) => {
            let span = parser.advance();
            Ok(Expression::BasedNumber(BasedNumberLiteral {
                digits,
                base: 16,
                span,
            }))
        }
        Token::BasedNumber(digits, base) => {
            let span = parser.advance();
            Ok(Expression::BasedNumber(BasedNumberLiteral {
                digits,
                base,
                span,
            }))
        }
        Token::StringLiteral(value) => {
            let span = parser.advance();
            Ok(Expression::String(StringLiteral { value, span }))
        }
        Token::True => {
            let span = parser.advance();
            Ok(Expression::Boolean(BooleanLiteral { value: true, span }))
        }
        Token::False => {
            let span = parser.advance();
            Ok(Expression::Boolean(BooleanLiteral { value: false, span }))
        }
        Token::Null => {
            let span = parser.advance();
            Ok(Expression::Null(NullLiteral { span }))
        }
        Token::LeftParen => {
            if is_lambda_ahead(parser) {
                parse_lambda(parser)
            } else {
                // Pure grouping: the parenthesized child passes through
                // unchanged. Braces are unambiguous inside parentheses, so
                // map getters become reachable again even in test positions.
                parser.advance();
                let saved = parser.brace_suffix;
                parser.brace_suffix = true;
                let expr = parse_expression(parser);
                parser.brace_suffix = saved;
                let expr = expr?;
                parser.expect(&Token::RightParen)?;
                Ok(expr)
            }
        }
        Token::LeftBracket => parse_array_literal(parser),
        Token::LeftBrace if parser.brace_suffix => parse_map_literal(parser),
        Token::Identifier(name) => {
            let span = parser.advance();
            parse_identifier_suffix(parser, Identifier::new(name, span))
        }
        _ => Err(parser.unexpected_token("an expression")),
    }
}

/// Decide whether `(` opens a lambda parameter list.
///
/// Bounded lookahead: `(` (ident (`,` ident)*)? `)` `->`.
fn is_lambda_ahead(parser: &Parser) -> bool {
    let mut n = 1;
    loop {
        match parser.peek_nth(n) {
            Some(Token::Identifier(_)) => {
                n += 1;
                match parser.peek_nth(n) {
                    Some(Token::Comma) => n += 1,
                    Some(Token::RightParen) => {
                        n += 1;
                        break;
                    }
                    _ => return false,
                }
            }
            Some(Token::RightParen) => {
                n += 1;
                break;
            }
            _ => return false,
        }
    }
    matches!(parser.peek_nth(n), Some(Token::Arrow))
}

/// Parse a lambda: `(a, b) -> e` or `(a) -> { ... }`
fn parse_lambda(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let params = super::stmt::parse_param_list(parser)?;
    parser.expect(&Token::Arrow)?;

    let (body, end_span) = if parser.check(&Token::LeftBrace) {
        let block = super::stmt::parse_block(parser)?;
        let span = block.span;
        (LambdaBody::Block(block), span)
    } else {
        let expr = parse_expression(parser)?;
        let span = *expr.span();
        (LambdaBody::Expression(Box::new(expr)), span)
    };

    Ok(Expression::Lambda(LambdaExpression {
        params,
        body,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

/// Parse an array literal: `[0: a, 1: b]`
///
/// The grammar yields a flat alternating index/value sequence; even
/// positions are indices, odd positions are values.
fn parse_array_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.expect(&Token::LeftBracket)?;
    let mut indices = Vec::new();
    let mut values = Vec::new();
    if !parser.check(&Token::RightBracket) {
        loop {
            indices.push(parse_expression(parser)?);
            parser.expect(&Token::Colon)?;
            values.push(parse_expression(parser)?);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    let end_span = parser.expect(&Token::RightBracket)?;

    Ok(Expression::Array(ArrayLiteral {
        indices,
        values,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

/// Parse a map literal: `{ k: v, ... }`
fn parse_map_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.expect(&Token::LeftBrace)?;
    let mut keys = Vec::new();
    let mut values = Vec::new();
    if !parser.check(&Token::RightBrace) {
        loop {
            keys.push(parse_expression(parser)?);
            parser.expect(&Token::Colon)?;
            values.push(parse_expression(parser)?);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    let end_span = parser.expect(&Token::RightBrace)?;

    Ok(Expression::Map(MapLiteral {
        keys,
        values,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

/// Parse what follows a leading identifier: invocation, method call,
/// array/map getter, or a plain reference.
fn parse_identifier_suffix(
    parser: &mut Parser,
    mut identifier: Identifier,
) -> Result<Expression, ParseError> {
    // `!` callee marker: `foo!(...)`
    if parser.check(&Token::Bang) && matches!(parser.peek(), Some(Token::LeftParen)) {
        parser.advance();
        identifier.name.push('!');
    }

    match parser.current() {
        Token::LeftParen => parse_invocation(parser, identifier),
        Token::Dot => {
            parser.advance();
            let method = parser.expect_identifier()?;
            let (args, end_span) = parse_args(parser)?;
            let span = parser.combine_spans(&identifier.span, &end_span);
            Ok(Expression::MethodCall(MethodCall {
                receiver: identifier,
                method: method.name,
                args,
                span,
            }))
        }
        Token::LeftBracket => {
            parser.advance();
            let index = parse_expression(parser)?;
            let end_span = parser.expect(&Token::RightBracket)?;
            let span = parser.combine_spans(&identifier.span, &end_span);
            Ok(Expression::ArrayGetter(ArrayGetter {
                target: identifier,
                index: Box::new(index),
                span,
            }))
        }
        Token::LeftBrace if parser.brace_suffix => {
            parser.advance();
            let key = parse_expression(parser)?;
            let end_span = parser.expect(&Token::RightBrace)?;
            let span = parser.combine_spans(&identifier.span, &end_span);
            Ok(Expression::MapGetter(MapGetter {
                target: identifier,
                key: Box::new(key),
                span,
            }))
        }
        _ => Ok(Expression::Identifier(identifier)),
    }
}

fn parse_invocation(parser: &mut Parser, callee: Identifier) -> Result<Expression, ParseError> {
    let (args, close_span) = parse_args(parser)?;
    let mut end_span = close_span;

    // Optional exception handler: `f(args) ! handler`
    let handler = if parser.eat(&Token::Bang) {
        let handler = parse_expression(parser)?;
        end_span = *handler.span();
        Some(Box::new(handler))
    } else {
        None
    };

    let span = parser.combine_spans(&callee.span, &end_span);
    Ok(Expression::Invocation(FunctionInvocation {
        callee,
        args,
        handler,
        span,
    }))
}

fn parse_args(parser: &mut Parser) -> Result<(Vec<Expression>, Span), ParseError> {
    parser.expect(&Token::LeftParen)?;
    let mut args = Vec::new();
    if !parser.check(&Token::RightParen) {
        args.push(parse_expression(parser)?);
        while parser.eat(&Token::Comma) {
            args.push(parse_expression(parser)?);
        }
    }
    let close_span = parser.expect(&Token::RightParen)?;
    Ok((args, close_span))
}

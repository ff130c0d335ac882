//! Statement parsing

use super::{ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse a statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.depth += 1;
    if let Err(e) = parser.check_depth() {
        parser.depth -= 1;
        return Err(e);
    }

    // Inner function so `?` can be used freely while depth is always restored
    let result = parse_statement_inner(parser);

    parser.depth -= 1;
    result
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current() {
        Token::Import => parse_import(parser),
        Token::Var | Token::Val => parse_declaration(parser),
        Token::Func => parse_function_decl(parser),
        Token::Class => parse_class_decl(parser),
        Token::If => parse_if_block(parser).map(Statement::If),
        Token::While => parse_while_block(parser),
        Token::For => parse_for_block(parser),
        Token::Switch => parse_switch_block(parser),
        Token::Return => parse_return_statement(parser),
        Token::Throw => parse_throw_statement(parser),

        // An identifier can open a definition, a reassignment, a unary
        // reassignment, or a plain expression statement. One token of
        // lookahead decides which.
        Token::Identifier(_) => match parser.peek() {
            Some(Token::ColonEqual) | Some(Token::Equal) => parse_definition(parser),
            Some(Token::PlusPlus) | Some(Token::MinusMinus) | Some(Token::InvertEqual) => {
                parse_unary_reassignment(parser)
            }
            Some(t) if assign_op_of(t).is_some() => parse_reassignment(parser),
            _ => parse_expression_statement(parser),
        },

        _ => parse_expression_statement(parser),
    }
}

// ============================================================================
// Imports and declarations
// ============================================================================

/// Parse an import statement: `import "path";`
fn parse_import(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Import)?;
    let path = if let Token::StringLiteral(path) = parser.current() {
        let path = path.clone();
        parser.advance();
        path
    } else {
        return Err(parser.unexpected_token("a module path string"));
    };
    let end_span = parser.expect(&Token::Semicolon)?;

    Ok(Statement::Import(ImportStatement {
        path,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

/// Parse a variable declaration: `var x;` / `val y: Type = e;`
fn parse_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let keyword = match parser.current() {
        Token::Var => DeclarationKeyword::Var,
        Token::Val => DeclarationKeyword::Val,
        _ => unreachable!(),
    };
    parser.advance();

    let name = parser.expect_identifier()?;

    // Optional type annotation
    let type_annotation = if parser.eat(&Token::Colon) {
        let ty = parser.expect_identifier()?;
        Some(TypeAnnotation::new(ty.name, ty.span))
    } else {
        None
    };

    // Optional initializer
    let value = if parser.eat(&Token::Equal) {
        Some(super::expr::parse_expression(parser)?)
    } else {
        None
    };

    let end_span = parser.expect(&Token::Semicolon)?;

    Ok(Statement::Declaration(Declaration {
        keyword,
        name,
        body: DeclarationBody {
            type_annotation,
            value,
        },
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

/// Parse a definition: `x := e;` (the plain `=` spelling is also accepted)
fn parse_definition(parser: &mut Parser) -> Result<Statement, ParseError> {
    let name = parser.expect_identifier()?;
    if !parser.eat(&Token::ColonEqual) {
        parser.expect(&Token::Equal)?;
    }
    let value = super::expr::parse_expression(parser)?;
    let end_span = parser.expect(&Token::Semicolon)?;

    let span = parser.combine_spans(&name.span, &end_span);
    Ok(Statement::Definition(Definition { name, value, span }))
}

/// Parse a compound reassignment: `x <op>= e;`
fn parse_reassignment(parser: &mut Parser) -> Result<Statement, ParseError> {
    let name = parser.expect_identifier()?;
    let op = match assign_op_of(parser.current()) {
        Some(op) => op,
        None => return Err(parser.unexpected_token("a compound assignment operator")),
    };
    parser.advance();
    let value = super::expr::parse_expression(parser)?;
    let end_span = parser.expect(&Token::Semicolon)?;

    let span = parser.combine_spans(&name.span, &end_span);
    Ok(Statement::Reassignment(Reassignment {
        name,
        op,
        value,
        span,
    }))
}

/// Parse a unary reassignment: `x++;` / `x--;` / `x=!=;`
fn parse_unary_reassignment(parser: &mut Parser) -> Result<Statement, ParseError> {
    let name = parser.expect_identifier()?;
    let op = match parser.current() {
        Token::PlusPlus => UnaryAssignOp::Increment,
        Token::MinusMinus => UnaryAssignOp::Decrement,
        Token::InvertEqual => UnaryAssignOp::Invert,
        _ => return Err(parser.unexpected_token("a unary assignment operator")),
    };
    parser.advance();
    let end_span = parser.expect(&Token::Semicolon)?;

    let span = parser.combine_spans(&name.span, &end_span);
    Ok(Statement::UnaryReassignment(UnaryReassignment {
        name,
        op,
        span,
    }))
}

fn assign_op_of(token: &Token) -> Option<AssignOp> {
    match token {
        Token::PlusEqual => Some(AssignOp::Add),
        Token::MinusEqual => Some(AssignOp::Subtract),
        Token::StarEqual => Some(AssignOp::Multiply),
        Token::SlashEqual => Some(AssignOp::Divide),
        Token::CaretEqual => Some(AssignOp::Exponent),
        Token::AmpEqual => Some(AssignOp::BitAnd),
        Token::PipeEqual => Some(AssignOp::BitOr),
        Token::AngleXorEqual => Some(AssignOp::BitXor),
        Token::ShiftLeftEqual => Some(AssignOp::ShiftLeft),
        Token::ShiftRightEqual => Some(AssignOp::ShiftRight),
        Token::AmpAmpEqual => Some(AssignOp::LogAnd),
        Token::PipePipeEqual => Some(AssignOp::LogOr),
        _ => None,
    }
}

// ============================================================================
// Control blocks
// ============================================================================

/// Parse a brace-delimited block of statements.
pub fn parse_block(parser: &mut Parser) -> Result<Block, ParseError> {
    let start_span = parser.expect(&Token::LeftBrace)?;
    let mut statements = Vec::new();
    while !parser.check(&Token::RightBrace) {
        if parser.at_eof() {
            return Err(parser.unexpected_token("'}'"));
        }
        statements.push(parse_statement(parser)?);
    }
    let end_span = parser.expect(&Token::RightBrace)?;

    Ok(Block::new(
        statements,
        parser.combine_spans(&start_span, &end_span),
    ))
}

/// Parse a control-block test expression (map-getter braces disabled).
fn parse_test_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let saved = parser.brace_suffix;
    parser.brace_suffix = false;
    let result = super::expr::parse_expression(parser);
    parser.brace_suffix = saved;
    result
}

fn parse_if_block(parser: &mut Parser) -> Result<IfBlock, ParseError> {
    let start_span = parser.expect(&Token::If)?;
    let test = parse_test_expression(parser)?;
    let iftrue = parse_block(parser)?;

    let iffalse = if parser.eat(&Token::Else) {
        if parser.check(&Token::If) {
            Some(ElseBranch::ElseIf(Box::new(parse_if_block(parser)?)))
        } else {
            Some(ElseBranch::Else(parse_block(parser)?))
        }
    } else {
        None
    };

    let end_span = match &iffalse {
        Some(ElseBranch::Else(block)) => block.span,
        Some(ElseBranch::ElseIf(chained)) => chained.span,
        None => iftrue.span,
    };

    Ok(IfBlock {
        test,
        iftrue,
        iffalse,
        span: parser.combine_spans(&start_span, &end_span),
    })
}

fn parse_while_block(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::While)?;
    let test = parse_test_expression(parser)?;
    let body = parse_block(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);
    Ok(Statement::While(WhileBlock { test, body, span }))
}

/// Parse a for loop: `for i in a..b { }`
fn parse_for_block(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::For)?;
    let binding = parser.expect_identifier()?;
    parser.expect(&Token::In)?;

    let saved = parser.brace_suffix;
    parser.brace_suffix = false;
    let range = super::expr::parse_range(parser);
    parser.brace_suffix = saved;
    let range = range?;

    let body = parse_block(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);
    Ok(Statement::For(ForBlock {
        binding,
        range,
        body,
        span,
    }))
}

/// Parse a switch block: `switch e { case v1, v2 { } default { } }`
fn parse_switch_block(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Switch)?;
    let scrutinee = parse_test_expression(parser)?;
    parser.expect(&Token::LeftBrace)?;

    let mut cases = Vec::new();
    let mut default = None;
    loop {
        match parser.current() {
            Token::Case => {
                let case_span = parser.advance();
                // Case values sit directly before the arm's body brace, so
                // they get the same brace-disabled parse as test expressions
                let mut values = vec![parse_test_expression(parser)?];
                while parser.eat(&Token::Comma) {
                    values.push(parse_test_expression(parser)?);
                }
                let body = parse_block(parser)?;
                let span = parser.combine_spans(&case_span, &body.span);
                cases.push(SwitchCase { values, body, span });
            }
            Token::Default => {
                let default_span = parser.advance();
                if default.is_some() {
                    return Err(ParseError::InvalidSyntax {
                        reason: "Switch block has more than one default arm".to_string(),
                        span: default_span,
                    });
                }
                let body = parse_block(parser)?;
                let span = parser.combine_spans(&default_span, &body.span);
                default = Some(SwitchDefault { body, span });
            }
            Token::RightBrace => break,
            _ => return Err(parser.unexpected_token("'case', 'default' or '}'")),
        }
    }
    let end_span = parser.expect(&Token::RightBrace)?;

    Ok(Statement::Switch(SwitchBlock {
        scrutinee,
        cases,
        default,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

// ============================================================================
// Functions and classes
// ============================================================================

/// Parse a comma-separated parameter list in parentheses.
pub fn parse_param_list(parser: &mut Parser) -> Result<Vec<Identifier>, ParseError> {
    parser.expect(&Token::LeftParen)?;
    let mut params = Vec::new();
    if !parser.check(&Token::RightParen) {
        params.push(parser.expect_identifier()?);
        while parser.eat(&Token::Comma) {
            params.push(parser.expect_identifier()?);
        }
    }
    parser.expect(&Token::RightParen)?;
    Ok(params)
}

fn parse_function_decl(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Func)?;
    let name = parser.expect_identifier()?;
    let params = parse_param_list(parser)?;
    let body = parse_block(parser)?;

    let span = parser.combine_spans(&start_span, &body.span);
    Ok(Statement::Function(FunctionDecl {
        name,
        params,
        body,
        span,
    }))
}

/// Parse a class declaration: `class Name { init(a, b) { } func m(x) { } }`
fn parse_class_decl(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Class)?;
    let name = parser.expect_identifier()?;
    parser.expect(&Token::LeftBrace)?;

    let mut constructor = None;
    let mut methods = Vec::new();
    loop {
        match parser.current() {
            Token::Init => {
                let init_span = parser.advance();
                if constructor.is_some() {
                    return Err(ParseError::InvalidSyntax {
                        reason: format!("Class '{}' has more than one constructor", name.name),
                        span: init_span,
                    });
                }
                let params = parse_param_list(parser)?;
                let body = parse_block(parser)?;
                let span = parser.combine_spans(&init_span, &body.span);
                constructor = Some(Constructor { params, body, span });
            }
            Token::Func => {
                let func_span = parser.advance();
                let method_name = parser.expect_identifier()?;
                let params = parse_param_list(parser)?;
                let body = parse_block(parser)?;
                let span = parser.combine_spans(&func_span, &body.span);
                methods.push(MethodDecl {
                    name: method_name,
                    params,
                    body,
                    span,
                });
            }
            Token::RightBrace => break,
            _ => return Err(parser.unexpected_token("'init', 'func' or '}'")),
        }
    }
    let end_span = parser.expect(&Token::RightBrace)?;

    Ok(Statement::Class(ClassDecl {
        name,
        constructor,
        methods,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

// ============================================================================
// Simple statements
// ============================================================================

fn parse_return_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Return)?;
    let value = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(super::expr::parse_expression(parser)?)
    };
    let end_span = parser.expect(&Token::Semicolon)?;

    Ok(Statement::Return(ReturnStatement {
        value,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

fn parse_throw_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.expect(&Token::Throw)?;
    let value = super::expr::parse_expression(parser)?;
    let end_span = parser.expect(&Token::Semicolon)?;

    Ok(Statement::Throw(ThrowStatement {
        value,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();
    let expression = super::expr::parse_expression(parser)?;
    let end_span = parser.expect(&Token::Semicolon)?;

    Ok(Statement::Expression(ExpressionStatement {
        expression,
        span: parser.combine_spans(&start_span, &end_span),
    }))
}

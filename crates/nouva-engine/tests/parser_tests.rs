use nouva_engine::parser::ast::*;
use nouva_engine::parser::{parse, SyntaxError};

// ============================================================================
// Program structure
// ============================================================================

#[test]
fn test_empty_program() {
    let program = parse("").unwrap();
    assert!(program.is_empty());
}

#[test]
fn test_parse_is_deterministic() {
    let source = r#"
        import "std/io";
        var total: number = 0;
        func add(a, b) { return a + b; }
        for i in 0..10 { total += add(i, 1); }
    "#;
    let first = parse(source).unwrap();
    let second = parse(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_import_statement() {
    let program = parse("import \"std/io\";").unwrap();
    match &program.units[0] {
        Statement::Import(import) => assert_eq!(import.path, "std/io"),
        other => panic!("Expected import, got {:?}", other),
    }
}

// ============================================================================
// Declarations and assignments
// ============================================================================

#[test]
fn test_declaration_var_with_value() {
    let program = parse("var x = 1;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => {
            assert_eq!(decl.keyword, DeclarationKeyword::Var);
            assert_eq!(decl.name.name, "x");
            assert!(decl.body.type_annotation.is_none());
            assert!(decl.body.value.is_some());
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_without_value_is_uninitialized() {
    let program = parse("val y;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => {
            assert_eq!(decl.keyword, DeclarationKeyword::Val);
            assert!(decl.body.type_annotation.is_none());
            assert!(decl.body.value.is_none());
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_with_type_annotation() {
    let program = parse("var n: number = 5;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => {
            let ty = decl.body.type_annotation.as_ref().expect("type annotation");
            assert_eq!(ty.name, "number");
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_definition_both_spellings() {
    for source in ["x := 2;", "x = 2;"] {
        let program = parse(source).unwrap();
        match &program.units[0] {
            Statement::Definition(def) => assert_eq!(def.name.name, "x"),
            other => panic!("Expected definition for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_compound_reassignment_operators() {
    let cases = [
        ("x += 1;", AssignOp::Add),
        ("x ^= 2;", AssignOp::Exponent),
        ("x ><= 3;", AssignOp::BitXor),
        ("x <<= 4;", AssignOp::ShiftLeft),
        ("x &&= true;", AssignOp::LogAnd),
    ];
    for (source, expected) in cases {
        let program = parse(source).unwrap();
        match &program.units[0] {
            Statement::Reassignment(re) => assert_eq!(re.op, expected),
            other => panic!("Expected reassignment for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_unary_reassignments() {
    let cases = [
        ("x++;", UnaryAssignOp::Increment),
        ("x--;", UnaryAssignOp::Decrement),
        ("x=!=;", UnaryAssignOp::Invert),
    ];
    for (source, expected) in cases {
        let program = parse(source).unwrap();
        match &program.units[0] {
            Statement::UnaryReassignment(re) => assert_eq!(re.op, expected),
            other => panic!("Expected unary reassignment for {:?}, got {:?}", source, other),
        }
    }
}

// ============================================================================
// Control blocks
// ============================================================================

#[test]
fn test_if_without_else_has_null_false_branch() {
    let program = parse("if x { return 1; }").unwrap();
    match &program.units[0] {
        Statement::If(if_block) => assert!(if_block.iffalse.is_none()),
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_map_getter_in_test_position() {
    // Grouping parens lift the brace restriction: inside them `{` can
    // only be a map getter, never the block
    let program = parse("if (m{\"k\"}) { }").unwrap();
    match &program.units[0] {
        Statement::If(if_block) => {
            assert!(matches!(if_block.test, Expression::MapGetter(_)));
            assert!(if_block.iftrue.statements.is_empty());
        }
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_if_else_chain() {
    let program = parse("if a { } else if b { } else { }").unwrap();
    match &program.units[0] {
        Statement::If(if_block) => match if_block.iffalse.as_ref().expect("else branch") {
            ElseBranch::ElseIf(chained) => {
                assert!(matches!(chained.iffalse, Some(ElseBranch::Else(_))));
            }
            other => panic!("Expected else-if, got {:?}", other),
        },
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_for_block_over_range() {
    let program = parse("for i in 0..10 { }").unwrap();
    match &program.units[0] {
        Statement::For(for_block) => {
            assert_eq!(for_block.binding.name, "i");
            assert!(matches!(*for_block.range.start, Expression::Number(_)));
            assert!(matches!(*for_block.range.end, Expression::Number(_)));
        }
        other => panic!("Expected for, got {:?}", other),
    }
}

#[test]
fn test_switch_block_shape() {
    let source = "switch x { case 1, 2 { y := 1; } case 3 { y := 2; } default { y := 3; } }";
    let program = parse(source).unwrap();
    match &program.units[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.cases.len(), 2);
            assert_eq!(switch.cases[0].values.len(), 2);
            assert_eq!(switch.cases[1].values.len(), 1);
            assert!(switch.default.is_some());
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

#[test]
fn test_switch_rejects_two_defaults() {
    let source = "switch x { default { } default { } }";
    assert!(parse(source).is_err());
}

#[test]
fn test_switch_case_with_identifier_value() {
    // An identifier case value must not swallow the arm's body brace
    // as a map-getter key
    let program = parse("switch x { case y { z = 1; } }").unwrap();
    match &program.units[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.cases.len(), 1);
            assert!(matches!(switch.cases[0].values[0], Expression::Identifier(_)));
            assert_eq!(switch.cases[0].body.statements.len(), 1);
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

#[test]
fn test_switch_case_with_identifier_value_list() {
    let program = parse("switch x { case a, b { } default { } }").unwrap();
    match &program.units[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.cases[0].values.len(), 2);
            assert!(switch.default.is_some());
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

// ============================================================================
// Functions, classes, lambdas
// ============================================================================

#[test]
fn test_function_declaration() {
    let program = parse("func add(a, b) { return a + b; }").unwrap();
    match &program.units[0] {
        Statement::Function(func) => {
            assert_eq!(func.name.name, "add");
            assert_eq!(func.params.len(), 2);
            assert_eq!(func.body.statements.len(), 1);
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_class_with_constructor_and_methods() {
    let source = "class Point { init(x, y) { } func dist(o) { return 0; } }";
    let program = parse(source).unwrap();
    match &program.units[0] {
        Statement::Class(class) => {
            assert_eq!(class.name.name, "Point");
            let ctor = class.constructor.as_ref().expect("constructor");
            assert_eq!(ctor.params.len(), 2);
            assert_eq!(class.methods.len(), 1);
            assert_eq!(class.methods[0].name.name, "dist");
        }
        other => panic!("Expected class, got {:?}", other),
    }
}

#[test]
fn test_class_rejects_second_constructor() {
    let source = "class C { init() { } init(a) { } }";
    assert!(parse(source).is_err());
}

#[test]
fn test_lambda_expression_body() {
    let program = parse("val f = (a, b) -> a + b;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().expect("value") {
            Expression::Lambda(lambda) => {
                assert_eq!(lambda.params.len(), 2);
                assert!(matches!(lambda.body, LambdaBody::Expression(_)));
            }
            other => panic!("Expected lambda, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_lambda_block_body() {
    let program = parse("val f = (a) -> { return a; };").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().expect("value") {
            Expression::Lambda(lambda) => assert!(matches!(lambda.body, LambdaBody::Block(_))),
            other => panic!("Expected lambda, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

// ============================================================================
// Expressions and literals
// ============================================================================

#[test]
fn test_based_number_literals() {
    let program = parse("val a = 0b101; val b = 0o17; val c = 0x1F; val d = 144_5;").unwrap();
    let bases: Vec<u32> = program
        .units
        .iter()
        .map(|unit| match unit {
            Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
                Expression::BasedNumber(based) => based.base,
                other => panic!("Expected based number, got {:?}", other),
            },
            other => panic!("Expected declaration, got {:?}", other),
        })
        .collect();
    assert_eq!(bases, vec![2, 8, 16, 5]);
}

#[test]
fn test_based_number_digits_kept_verbatim() {
    let program = parse("val c = 0x1F;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::BasedNumber(based) => assert_eq!(based.digits, "1F"),
            other => panic!("Expected based number, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_exponent_is_right_associative() {
    let program = parse("val x = 2 ^ 3 ^ 2;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Math(outer) => {
                assert_eq!(outer.op, MathOp::Exponent);
                assert!(matches!(*outer.lhs, Expression::Number(_)));
                assert!(matches!(*outer.rhs, Expression::Math(_)));
            }
            other => panic!("Expected math expression, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_comparison_binds_looser_than_bitwise() {
    let program = parse("val x = a & b == c;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Comparison(cmp) => {
                assert!(matches!(*cmp.lhs, Expression::Bitwise(_)));
            }
            other => panic!("Expected comparison, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_array_literal_deinterleaves_indices_and_values() {
    let program = parse("val a = [0: \"a\", 1: \"b\"];").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Array(array) => {
                assert_eq!(array.indices.len(), 2);
                assert_eq!(array.values.len(), 2);
            }
            other => panic!("Expected array, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_map_literal_parallel_sequences() {
    let program = parse("val m = { \"a\": 1, \"b\": 2 };").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Map(map) => {
                assert_eq!(map.keys.len(), 2);
                assert_eq!(map.values.len(), 2);
            }
            other => panic!("Expected map, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_identifier_markers_survive_parsing() {
    let program = parse("val hidden = secret#;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Identifier(ident) => assert_eq!(ident.name, "secret#"),
            other => panic!("Expected identifier, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_invocation_with_handler() {
    let program = parse("val x = risky!(1, 2) ! (e) -> 0;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Invocation(invocation) => {
                assert_eq!(invocation.callee.name, "risky!");
                assert_eq!(invocation.args.len(), 2);
                assert!(invocation.handler.is_some());
            }
            other => panic!("Expected invocation, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_method_call_and_getters() {
    let program = parse("val a = obj.run(1); val b = xs[0]; val c = m{\"k\"};").unwrap();
    assert!(matches!(
        &program.units[0],
        Statement::Declaration(decl)
            if matches!(decl.body.value.as_ref().unwrap(), Expression::MethodCall(_))
    ));
    assert!(matches!(
        &program.units[1],
        Statement::Declaration(decl)
            if matches!(decl.body.value.as_ref().unwrap(), Expression::ArrayGetter(_))
    ));
    assert!(matches!(
        &program.units[2],
        Statement::Declaration(decl)
            if matches!(decl.body.value.as_ref().unwrap(), Expression::MapGetter(_))
    ));
}

#[test]
fn test_typed_expression() {
    let program = parse("val x = value as number;").unwrap();
    match &program.units[0] {
        Statement::Declaration(decl) => match decl.body.value.as_ref().unwrap() {
            Expression::Typed(typed) => assert_eq!(typed.ty.name, "number"),
            other => panic!("Expected typed expression, got {:?}", other),
        },
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_expression_passes_through() {
    let grouped = parse("val x = (a + b);").unwrap();
    let plain = parse("val x = a + b;").unwrap();
    // Grouping has no node of its own; spans aside, the shapes agree
    match (&grouped.units[0], &plain.units[0]) {
        (Statement::Declaration(g), Statement::Declaration(p)) => {
            assert!(matches!(
                (g.body.value.as_ref().unwrap(), p.body.value.as_ref().unwrap()),
                (Expression::Math(_), Expression::Math(_))
            ));
        }
        other => panic!("Expected declarations, got {:?}", other),
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_ast_serializes_with_kind_discriminants() {
    let program = parse("var x = 1; func f(a) { return a; }").unwrap();
    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["units"][0]["kind"], "Declaration");
    assert_eq!(json["units"][1]["kind"], "Function");
    assert_eq!(json["units"][0]["name"]["name"], "x");
}

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn test_unterminated_block_is_syntax_error() {
    assert!(matches!(
        parse("func broken(a) { return a;"),
        Err(SyntaxError::Parse(_))
    ));
}

#[test]
fn test_unterminated_string_is_syntax_error() {
    assert!(matches!(
        parse("val s = \"oops;"),
        Err(SyntaxError::Lex(_))
    ));
}

#[test]
fn test_error_carries_position() {
    let err = parse("val = 1;").unwrap_err();
    let span = err.span();
    assert_eq!(span.line, 1);
    assert!(span.column > 1);
}

#[test]
fn test_missing_semicolon_is_syntax_error() {
    assert!(parse("val x = 1").is_err());
}

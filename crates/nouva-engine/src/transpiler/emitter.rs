//! Code generation: AST to tagged target text.
//!
//! The emitter is a recursive, bottom-up text synthesizer. Every node kind
//! has exactly one synthesis rule. Output still contains dialect tag regions
//! (`/*<JS>/...`, `/*<TS>/...`, `/*<ES>/...`) which the tag post-processor
//! resolves for the requested target.
//!
//! In validated mode a [`DeclarationTracker`] is threaded through the same
//! traversal; any violation aborts the run with a [`CompileError`]. In plain
//! mode no declaration checks happen and malformed references are emitted
//! verbatim.

use crate::parser::ast::*;
use crate::transpiler::tracker::{CompileError, DeclarationTracker};
use crate::transpiler::Mode;

/// Erase identifier suffix markers for the target language.
///
/// `#` (private) becomes a literal underscore, `?` (nullable) and the
/// invocation marker `!` are elided. This is the only place erasure happens,
/// the rule is idempotent, and the declaration tracker matches on exactly
/// this form.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            '#' => Some('_'),
            '?' | '!' => None,
            other => Some(other),
        })
        .collect()
}

/// AST-to-text code generator.
pub struct Emitter {
    out: String,
    indent: usize,
    tracker: Option<DeclarationTracker>,
}

impl Emitter {
    /// Create an emitter. `Mode::Validated` activates declaration tracking;
    /// the tracker is constructed fresh here and dies with the emitter.
    pub fn new(mode: Mode) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            tracker: match mode {
                Mode::Plain => None,
                Mode::Validated => Some(DeclarationTracker::new()),
            },
        }
    }

    /// Emit a whole program as tagged target text.
    pub fn emit_program(mut self, program: &Program) -> Result<String, CompileError> {
        for unit in &program.units {
            self.emit_statement(unit)?;
        }
        Ok(self.out)
    }

    // ── Output helpers ───────────────────────────────────────────────

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn write_tag(&mut self, label: &str, payload: &str) {
        self.write("/*<");
        self.write(label);
        self.write(">/");
        self.write(payload);
        self.write("/*/");
    }

    fn declare(&mut self, name: &str, span: &crate::parser::Span) -> Result<(), CompileError> {
        match &mut self.tracker {
            Some(tracker) => tracker.declare(name, *span),
            None => Ok(()),
        }
    }

    fn expect_declared(
        &mut self,
        name: &str,
        span: &crate::parser::Span,
    ) -> Result<(), CompileError> {
        match &self.tracker {
            Some(tracker) => tracker.expect_declared(name, *span),
            None => Ok(()),
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_statement(&mut self, statement: &Statement) -> Result<(), CompileError> {
        match statement {
            Statement::Import(import) => {
                self.write_indent();
                self.write(&format!("import \"{}\";\n", import.path));
                Ok(())
            }
            Statement::Declaration(decl) => self.emit_declaration(decl),
            Statement::Definition(def) => {
                self.expect_declared(&def.name.name, &def.span)?;
                self.write_indent();
                self.write(&sanitize_identifier(&def.name.name));
                self.write(" = ");
                self.emit_expression(&def.value)?;
                self.write(";\n");
                Ok(())
            }
            Statement::Reassignment(re) => {
                self.expect_declared(&re.name.name, &re.span)?;
                self.write_indent();
                self.write(&sanitize_identifier(&re.name.name));
                self.write(" ");
                self.write(translate_assign_op(re.op));
                self.write(" ");
                self.emit_expression(&re.value)?;
                self.write(";\n");
                Ok(())
            }
            Statement::UnaryReassignment(re) => {
                self.expect_declared(&re.name.name, &re.span)?;
                let name = sanitize_identifier(&re.name.name);
                self.write_indent();
                match re.op {
                    UnaryAssignOp::Increment => self.write(&format!("{}++;\n", name)),
                    UnaryAssignOp::Decrement => self.write(&format!("{}--;\n", name)),
                    UnaryAssignOp::Invert => self.write(&format!("{} = !{};\n", name, name)),
                }
                Ok(())
            }
            Statement::Return(ret) => {
                self.write_indent();
                match &ret.value {
                    Some(value) => {
                        self.write("return ");
                        self.emit_expression(value)?;
                        self.write(";\n");
                    }
                    None => self.write("return;\n"),
                }
                Ok(())
            }
            Statement::Throw(throw) => {
                self.write_indent();
                self.write("throw ");
                self.emit_expression(&throw.value)?;
                self.write(";\n");
                Ok(())
            }
            Statement::If(if_block) => {
                self.write_indent();
                self.emit_if_block(if_block)?;
                Ok(())
            }
            Statement::While(while_block) => {
                self.write_indent();
                self.write("while (");
                self.emit_expression(&while_block.test)?;
                self.write(") ");
                self.emit_block(&while_block.body)?;
                self.write("\n");
                Ok(())
            }
            Statement::For(for_block) => self.emit_for_block(for_block),
            Statement::Switch(switch) => self.emit_switch_block(switch),
            Statement::Function(func) => self.emit_function_decl(func),
            Statement::Class(class) => self.emit_class_decl(class),
            Statement::Expression(expr) => {
                self.write_indent();
                self.emit_expression(&expr.expression)?;
                self.write(";\n");
                Ok(())
            }
        }
    }

    /// Declaration keywords are tagged, not hard-coded: both dialects use
    /// `let`/`const`, so the keyword carries the shared `ES` label; the type
    /// annotation is TS-only.
    fn emit_declaration(&mut self, decl: &Declaration) -> Result<(), CompileError> {
        self.declare(&decl.name.name, &decl.span)?;

        self.write_indent();
        match decl.keyword {
            DeclarationKeyword::Var => self.write_tag("ES", "let"),
            DeclarationKeyword::Val => self.write_tag("ES", "const"),
        }
        self.write(" ");
        self.write(&sanitize_identifier(&decl.name.name));

        if let Some(ty) = &decl.body.type_annotation {
            let annotation = format!(": {}", ty.name);
            self.write_tag("TS", &annotation);
        }
        if let Some(value) = &decl.body.value {
            self.write(" = ");
            self.emit_expression(value)?;
        }
        self.write(";\n");
        Ok(())
    }

    fn emit_block(&mut self, block: &Block) -> Result<(), CompileError> {
        self.write("{\n");
        self.indent += 1;
        for statement in &block.statements {
            self.emit_statement(statement)?;
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
        Ok(())
    }

    /// Emit an if block at the current position (indentation already written).
    fn emit_if_block(&mut self, if_block: &IfBlock) -> Result<(), CompileError> {
        self.write("if (");
        self.emit_expression(&if_block.test)?;
        self.write(") ");
        self.emit_block(&if_block.iftrue)?;

        match &if_block.iffalse {
            Some(ElseBranch::Else(block)) => {
                self.write(" else ");
                self.emit_block(block)?;
                self.write("\n");
            }
            Some(ElseBranch::ElseIf(chained)) => {
                self.write(" else ");
                self.emit_if_block(chained)?;
            }
            None => self.write("\n"),
        }
        Ok(())
    }

    /// `for i in a..b` lowers to a C-style counting loop.
    fn emit_for_block(&mut self, for_block: &ForBlock) -> Result<(), CompileError> {
        let binding = sanitize_identifier(&for_block.binding.name);
        self.write_indent();
        self.write(&format!("for (let {} = ", binding));
        self.emit_expression(&for_block.range.start)?;
        self.write(&format!("; {} < ", binding));
        self.emit_expression(&for_block.range.end)?;
        self.write(&format!("; {}++) ", binding));
        self.emit_block(&for_block.body)?;
        self.write("\n");
        Ok(())
    }

    fn emit_switch_block(&mut self, switch: &SwitchBlock) -> Result<(), CompileError> {
        self.write_indent();
        self.write("switch (");
        self.emit_expression(&switch.scrutinee)?;
        self.write(") {\n");
        self.indent += 1;

        for case in &switch.cases {
            // A case arm with several values fans out to stacked labels
            for (i, value) in case.values.iter().enumerate() {
                self.write_indent();
                self.write("case ");
                self.emit_expression(value)?;
                self.write(":");
                if i + 1 < case.values.len() {
                    self.write("\n");
                }
            }
            self.write(" {\n");
            self.indent += 1;
            for statement in &case.body.statements {
                self.emit_statement(statement)?;
            }
            self.write_indent();
            self.write("break;\n");
            self.indent -= 1;
            self.write_indent();
            self.write("}\n");
        }

        if let Some(default) = &switch.default {
            self.write_indent();
            self.write("default: {\n");
            self.indent += 1;
            for statement in &default.body.statements {
                self.emit_statement(statement)?;
            }
            self.indent -= 1;
            self.write_indent();
            self.write("}\n");
        }

        self.indent -= 1;
        self.write_indent();
        self.write("}\n");
        Ok(())
    }

    fn emit_function_decl(&mut self, func: &FunctionDecl) -> Result<(), CompileError> {
        self.declare(&func.name.name, &func.span)?;

        let params = func
            .params
            .iter()
            .map(|p| sanitize_identifier(&p.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_indent();
        self.write(&format!(
            "function {}({}) ",
            sanitize_identifier(&func.name.name),
            params
        ));
        self.emit_block(&func.body)?;
        self.write("\n");
        Ok(())
    }

    /// Class lowering synthesizes the constructor body: every declared
    /// parameter is assigned to a same-named instance field, in parameter
    /// order, before the written constructor statements. Methods follow in
    /// declaration order.
    fn emit_class_decl(&mut self, class: &ClassDecl) -> Result<(), CompileError> {
        self.declare(&class.name.name, &class.span)?;

        self.write_indent();
        self.write(&format!(
            "class {} {{\n",
            sanitize_identifier(&class.name.name)
        ));
        self.indent += 1;

        if let Some(constructor) = &class.constructor {
            let params = constructor
                .params
                .iter()
                .map(|p| sanitize_identifier(&p.name))
                .collect::<Vec<_>>();
            self.write_indent();
            self.write(&format!("constructor({}) {{\n", params.join(", ")));
            self.indent += 1;
            for param in &params {
                self.write_indent();
                self.write(&format!("this.{} = {};\n", param, param));
            }
            for statement in &constructor.body.statements {
                self.emit_statement(statement)?;
            }
            self.indent -= 1;
            self.write_indent();
            self.write("}\n");
        }

        for method in &class.methods {
            let params = method
                .params
                .iter()
                .map(|p| sanitize_identifier(&p.name))
                .collect::<Vec<_>>()
                .join(", ");
            self.write_indent();
            self.write(&format!(
                "{}({}) ",
                sanitize_identifier(&method.name.name),
                params
            ));
            self.emit_block(&method.body)?;
            self.write("\n");
        }

        self.indent -= 1;
        self.write_indent();
        self.write("}\n");
        Ok(())
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expression(&mut self, expression: &Expression) -> Result<(), CompileError> {
        match expression {
            Expression::Identifier(ident) => {
                self.write(&sanitize_identifier(&ident.name));
                Ok(())
            }
            Expression::Number(number) => {
                self.write(&number.text);
                Ok(())
            }
            Expression::BasedNumber(based) => {
                self.emit_based_number(based);
                Ok(())
            }
            Expression::String(string) => {
                self.write(&quote_string(&string.value));
                Ok(())
            }
            Expression::Boolean(boolean) => {
                self.write(if boolean.value { "true" } else { "false" });
                Ok(())
            }
            Expression::Null(_) => {
                self.write("null");
                Ok(())
            }
            Expression::Array(array) => {
                // Indices are declaration order; the target array literal
                // keeps only the values
                self.write("[");
                for (i, value) in array.values.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(value)?;
                }
                self.write("]");
                Ok(())
            }
            Expression::Map(map) => {
                self.write("{ ");
                for (i, (key, value)) in map.keys.iter().zip(&map.values).enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expression(key)?;
                    self.write(": ");
                    self.emit_expression(value)?;
                }
                self.write(" }");
                Ok(())
            }
            Expression::Range(_) => {
                // No value form in the target language; visible marker keeps
                // the rest of the output inspectable
                self.write("/* error: range expression outside a for loop */");
                Ok(())
            }
            Expression::Unary(unary) => {
                self.write(unary.op.as_str());
                self.emit_operand(&unary.operand)
            }
            Expression::Math(math) => {
                self.emit_binary(&math.lhs, translate_math_op(math.op), &math.rhs)
            }
            Expression::Bitwise(bitwise) => {
                self.emit_binary(&bitwise.lhs, translate_bitwise_op(bitwise.op), &bitwise.rhs)
            }
            Expression::Logical(logical) => {
                self.emit_binary(&logical.lhs, logical.op.as_str(), &logical.rhs)
            }
            Expression::Comparison(cmp) => self.emit_binary(&cmp.lhs, cmp.op.as_str(), &cmp.rhs),
            Expression::Invocation(invocation) => self.emit_invocation(invocation),
            Expression::MethodCall(call) => {
                self.write(&sanitize_identifier(&call.receiver.name));
                self.write(".");
                self.write(&sanitize_identifier(&call.method));
                self.emit_args(&call.args)
            }
            Expression::ArrayGetter(getter) => {
                self.write(&sanitize_identifier(&getter.target.name));
                self.write("[");
                self.emit_expression(&getter.index)?;
                self.write("]");
                Ok(())
            }
            Expression::MapGetter(getter) => {
                self.write(&sanitize_identifier(&getter.target.name));
                self.write("[");
                self.emit_expression(&getter.key)?;
                self.write("]");
                Ok(())
            }
            Expression::Lambda(lambda) => self.emit_lambda(lambda),
            Expression::Typed(typed) => {
                self.emit_expression(&typed.value)?;
                let cast = format!(" as {}", typed.ty.name);
                self.write_tag("TS", &cast);
                Ok(())
            }
        }
    }

    /// Binary operands that are themselves binary get parenthesized, since
    /// source and target precedence do not always agree (comparison binds
    /// tighter than `&` in the target, looser here).
    fn emit_binary(
        &mut self,
        lhs: &Expression,
        op: &str,
        rhs: &Expression,
    ) -> Result<(), CompileError> {
        self.emit_operand(lhs)?;
        self.write(" ");
        self.write(op);
        self.write(" ");
        self.emit_operand(rhs)
    }

    fn emit_operand(&mut self, operand: &Expression) -> Result<(), CompileError> {
        let needs_parens = matches!(
            operand,
            Expression::Math(_)
                | Expression::Bitwise(_)
                | Expression::Logical(_)
                | Expression::Comparison(_)
                | Expression::Unary(_)
        );
        if needs_parens {
            self.write("(");
            self.emit_expression(operand)?;
            self.write(")");
        } else {
            self.emit_expression(operand)?;
        }
        Ok(())
    }

    /// Bases with a native target prefix render directly; any other base
    /// falls back to a runtime base-parse call over the verbatim digits.
    fn emit_based_number(&mut self, based: &BasedNumberLiteral) {
        match based.base {
            2 => self.write(&format!("0b{}", based.digits)),
            8 => self.write(&format!("0o{}", based.digits)),
            16 => self.write(&format!("0x{}", based.digits)),
            base => self.write(&format!("parseInt(\"{}\", {})", based.digits, base)),
        }
    }

    /// An invocation with a handler wraps the call in an immediately-invoked
    /// try/catch that pipes the thrown value into the handler.
    fn emit_invocation(&mut self, invocation: &FunctionInvocation) -> Result<(), CompileError> {
        self.expect_declared(&invocation.callee.name, &invocation.span)?;
        let callee = sanitize_identifier(&invocation.callee.name);

        match &invocation.handler {
            None => {
                self.write(&callee);
                self.emit_args(&invocation.args)
            }
            Some(handler) => {
                self.write("(() => { try { return ");
                self.write(&callee);
                self.emit_args(&invocation.args)?;
                self.write("; } catch (__err) { return (");
                self.emit_expression(handler)?;
                self.write(")(__err); } })()");
                Ok(())
            }
        }
    }

    fn emit_args(&mut self, args: &[Expression]) -> Result<(), CompileError> {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(arg)?;
        }
        self.write(")");
        Ok(())
    }

    fn emit_lambda(&mut self, lambda: &LambdaExpression) -> Result<(), CompileError> {
        let params = lambda
            .params
            .iter()
            .map(|p| sanitize_identifier(&p.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.write(&format!("({}) => ", params));
        match &lambda.body {
            LambdaBody::Expression(expr) => self.emit_expression(expr),
            LambdaBody::Block(block) => self.emit_block(block),
        }
    }
}

// ============================================================================
// Operator translation
// ============================================================================

/// Source-to-target operator translation: exponent and xor differ, the rest
/// pass through unchanged.
fn translate_math_op(op: MathOp) -> &'static str {
    match op {
        MathOp::Exponent => "**",
        other => other.as_str(),
    }
}

fn translate_bitwise_op(op: BitwiseOp) -> &'static str {
    match op {
        BitwiseOp::Xor => "^",
        other => other.as_str(),
    }
}

fn translate_assign_op(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Exponent => "**=",
        AssignOp::BitXor => "^=",
        other => other.as_str(),
    }
}

fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_markers() {
        assert_eq!(sanitize_identifier("secret#"), "secret_");
        assert_eq!(sanitize_identifier("maybe?"), "maybe");
        assert_eq!(sanitize_identifier("call!"), "call");
        assert_eq!(sanitize_identifier("plain"), "plain");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["secret#", "maybe?", "call!", "mix#?"] {
            let once = sanitize_identifier(name);
            assert_eq!(sanitize_identifier(&once), once);
        }
    }

    #[test]
    fn test_operator_translation() {
        assert_eq!(translate_math_op(MathOp::Exponent), "**");
        assert_eq!(translate_math_op(MathOp::Add), "+");
        assert_eq!(translate_bitwise_op(BitwiseOp::Xor), "^");
        assert_eq!(translate_bitwise_op(BitwiseOp::And), "&");
        assert_eq!(translate_assign_op(AssignOp::Exponent), "**=");
        assert_eq!(translate_assign_op(AssignOp::BitXor), "^=");
        assert_eq!(translate_assign_op(AssignOp::Add), "+=");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("a\"b\n"), "\"a\\\"b\\n\"");
    }
}

//! Where the program binds `Object`.
//!
//! Lowered type tests box the thrown value with `Object(..)`. A user
//! binding named `Object` that is in scope at a try statement would take
//! that call. Bindings inside functions, blocks or catch clauses are
//! avoided by calling an alias saved in the first statement of the
//! program. A binding in program scope already shadows the built-in when
//! that first statement runs, so it cannot be avoided.

use tc_ir::visitor::{walk_catch, walk_expr, walk_stmt, Visitor};
use tc_ir::{
    Ast, CatchClause, DeclRange, Expr, ExprKind, ForInit, Name, ParamRange, Program, Span, Stmt,
    StmtKind, StringInterner, VarKind,
};
use tc_stack::ensure_sufficient_stack;

/// How lowered code must refer to the built-in `Object`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ObjectBinding {
    /// Nothing rebinds `Object`, or nothing will be lowered.
    Free,
    /// Rebound only below program scope; an alias saved up front is safe.
    Nested,
    /// Rebound in program scope at `span`.
    ProgramScope(Span),
}

pub(crate) fn scan_object(program: &Program, ast: &Ast, interner: &StringInterner) -> ObjectBinding {
    let mut scanner = Scanner {
        object: interner.intern("Object"),
        function_depth: 0,
        top_level: false,
        program_scope: None,
        nested: false,
        has_typed_catch: false,
    };
    scanner.visit_program(program, ast);

    if !scanner.has_typed_catch {
        return ObjectBinding::Free;
    }
    match scanner.program_scope {
        Some(span) => ObjectBinding::ProgramScope(span),
        None if scanner.nested => ObjectBinding::Nested,
        None => ObjectBinding::Free,
    }
}

struct Scanner {
    object: Name,
    function_depth: u32,
    /// Set while visiting a statement directly in the program body.
    top_level: bool,
    program_scope: Option<Span>,
    nested: bool,
    has_typed_catch: bool,
}

impl Scanner {
    fn bind(&mut self, name: Name, in_program_scope: bool, span: Span) {
        if name != self.object {
            return;
        }
        if in_program_scope {
            self.program_scope.get_or_insert(span);
        } else {
            self.nested = true;
        }
    }

    /// `var` hoists to the enclosing function; `let`/`const` stay in their
    /// block.
    fn decls(&mut self, kind: VarKind, decls: DeclRange, top_level: bool, ast: &Ast) {
        let in_program_scope = self.function_depth == 0 && (kind == VarKind::Var || top_level);
        for decl in ast.decls(decls) {
            self.bind(decl.name, in_program_scope, decl.span);
        }
    }

    fn params(&mut self, params: ParamRange, span: Span, ast: &Ast) {
        for &param in ast.params(params) {
            self.bind(param, false, span);
        }
    }
}

impl<'ast> Visitor<'ast> for Scanner {
    fn visit_program(&mut self, program: &'ast Program, ast: &'ast Ast) {
        for &id in ast.stmt_list(program.body) {
            self.top_level = true;
            self.visit_stmt_id(id, ast);
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, ast: &'ast Ast) {
        let top_level = std::mem::replace(&mut self.top_level, false);
        match stmt.kind {
            StmtKind::VarDecl { kind, decls } => self.decls(kind, decls, top_level, ast),
            StmtKind::For {
                init: ForInit::VarDecl { kind, decls },
                ..
            } => self.decls(kind, decls, false, ast),
            StmtKind::ForEach { decl, binding, .. } => {
                let in_program_scope = self.function_depth == 0 && decl == Some(VarKind::Var);
                self.bind(binding, in_program_scope, stmt.span);
            }
            StmtKind::Function { name, params, body } => {
                // Declarations in nested blocks also hoist (Annex B).
                self.bind(name, self.function_depth == 0, stmt.span);
                self.params(params, stmt.span, ast);
                self.function_depth += 1;
                self.visit_block(body, ast);
                self.function_depth -= 1;
                return;
            }
            _ => {}
        }
        ensure_sufficient_stack(|| walk_stmt(self, stmt, ast));
    }

    fn visit_expr(&mut self, expr: &'ast Expr, ast: &'ast Ast) {
        let params = match expr.kind {
            ExprKind::Function { name, params, .. } => {
                if let Some(name) = name {
                    self.bind(name, false, expr.span);
                }
                Some(params)
            }
            ExprKind::Arrow { params, .. } => Some(params),
            ExprKind::Assign { target, .. }
            | ExprKind::Update {
                operand: target, ..
            } => {
                if matches!(ast.expr(target).kind, ExprKind::Ident(name) if name == self.object) {
                    self.nested = true;
                }
                None
            }
            _ => None,
        };

        match params {
            Some(params) => {
                self.params(params, expr.span, ast);
                self.function_depth += 1;
                ensure_sufficient_stack(|| walk_expr(self, expr, ast));
                self.function_depth -= 1;
            }
            None => ensure_sufficient_stack(|| walk_expr(self, expr, ast)),
        }
    }

    fn visit_catch(&mut self, clause: &'ast CatchClause, ast: &'ast Ast) {
        self.has_typed_catch |= clause.is_typed();
        if let Some(param) = clause.param() {
            self.bind(param, false, clause.span);
        }
        walk_catch(self, clause, ast);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tc_ir::{Span, StringInterner};
    use tc_parse::{parse, ParseOptions};

    use super::{scan_object, ObjectBinding};

    fn scan(source: &str) -> ObjectBinding {
        let interner = StringInterner::new();
        let lexed = tc_lexer::lex(source, &interner);
        let output = parse(&lexed.tokens, &interner, &ParseOptions::default());
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        scan_object(&output.program, &output.ast, &interner)
    }

    const TRY: &str = "try { g() } catch (e: TypeError) { h(e) }";

    #[test]
    fn untouched_object_is_free() {
        assert_eq!(scan(TRY), ObjectBinding::Free);
        assert_eq!(scan(&format!("{TRY}\nObject.keys(o);")), ObjectBinding::Free);
    }

    #[test]
    fn nothing_to_lower_is_free() {
        assert_eq!(
            scan("var Object = 1;\ntry { g() } catch (e) { h(e) }"),
            ObjectBinding::Free
        );
    }

    #[test]
    fn nested_bindings() {
        for source in [
            format!("function f(Object) {{ {TRY} }}"),
            format!("function f() {{ var Object = 1; {TRY} }}"),
            format!("{{ let Object = 1; {TRY} }}"),
            format!("try {{ {TRY} }} catch (Object) {{}}"),
            format!("f(function Object() {{ {TRY} }});"),
            format!("f((Object) => {{ {TRY} }});"),
            format!("for (const Object of xs) {{ {TRY} }}"),
            format!("for (let Object = 0; ; ) {{ {TRY} }}"),
            format!("Object = null;\n{TRY}"),
            format!("for (Object in o) {{}}\n{TRY}"),
        ] {
            assert_eq!(scan(&source), ObjectBinding::Nested, "{source}");
        }
    }

    #[test]
    fn program_scope_bindings() {
        for source in [
            format!("var Object = 1;\n{TRY}"),
            format!("let Object = 1;\n{TRY}"),
            format!("const Object = 1;\n{TRY}"),
            format!("function Object() {{}}\n{TRY}"),
            format!("try {{ var Object = 1; g() }} catch (e: TypeError) {{ h(e) }}"),
            format!("if (x) {{ function Object() {{}} }}\n{TRY}"),
            format!("for (var Object in o) {{}}\n{TRY}"),
            format!("for (var i = 0, Object; ; ) {{}}\n{TRY}"),
        ] {
            assert!(
                matches!(scan(&source), ObjectBinding::ProgramScope(_)),
                "{source}"
            );
        }
    }

    #[test]
    fn program_scope_span_is_the_declarator() {
        let source = format!("let a = 1, Object = 2;\n{TRY}");
        let start = u32::try_from(source.find("Object").unwrap_or(0)).unwrap_or(0);
        let ObjectBinding::ProgramScope(span) = scan(&source) else {
            panic!("expected a program-scope binding");
        };
        assert_eq!(span.start, start);
        assert!(span.end > start && span != Span::DUMMY);
    }
}

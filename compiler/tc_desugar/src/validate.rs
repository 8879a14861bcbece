//! Structural validation of try statements.
//!
//! The parser already rejects most ordering mistakes, but trees can also be
//! assembled by tooling. This pass walks the whole program with checked
//! arena access, so a bad id or range is reported instead of panicking,
//! and collects every violation it finds.

use std::fmt;

use tc_diagnostic::{Diagnostic, ErrorCode};
use tc_ir::{
    ArrowBody, Ast, CatchClause, CatchKind, DeclRange, ExprId, ExprKind, ExprRange, ForInit,
    GrammarMode, Name, Program, Span, StmtId, StmtKind, StmtRange, TryStmt,
};
use tc_stack::ensure_sufficient_stack;
use tracing::trace;

/// A violated try-statement invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuralError {
    pub kind: StructuralErrorKind,
    /// Span of the offending clause or statement.
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StructuralErrorKind {
    /// No catch clause and no finally block.
    MissingHandler,
    /// A catch clause follows the default catch.
    DefaultNotLast { default_span: Span },
    /// More than one default catch.
    MultipleDefaults { first_span: Span },
    /// Typed catches without a default catch, under the strict grammar.
    MissingDefault,
    /// A catch clause binds the empty name.
    EmptyBinding,
    /// An id or range that does not resolve in the arena.
    DanglingReference { what: &'static str },
    /// Program scope binds `Object`, which lowered type tests call.
    ObjectRebound,
}

impl StructuralErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            StructuralErrorKind::MissingHandler => ErrorCode::E2001,
            StructuralErrorKind::DefaultNotLast { .. } => ErrorCode::E2002,
            StructuralErrorKind::MultipleDefaults { .. } => ErrorCode::E2003,
            StructuralErrorKind::MissingDefault => ErrorCode::E2004,
            StructuralErrorKind::EmptyBinding => ErrorCode::E2005,
            StructuralErrorKind::DanglingReference { .. } => ErrorCode::E2006,
            StructuralErrorKind::ObjectRebound => ErrorCode::E2007,
        }
    }

    pub fn message(&self) -> String {
        match self {
            StructuralErrorKind::MissingHandler => {
                "try statement has neither a catch clause nor a finally block".to_owned()
            }
            StructuralErrorKind::DefaultNotLast { .. } => {
                "catch clause follows the default catch clause".to_owned()
            }
            StructuralErrorKind::MultipleDefaults { .. } => {
                "try statement has more than one default catch clause".to_owned()
            }
            StructuralErrorKind::MissingDefault => {
                "typed catch clauses must end with a default catch clause".to_owned()
            }
            StructuralErrorKind::EmptyBinding => "catch clause binds an empty name".to_owned(),
            StructuralErrorKind::DanglingReference { what } => {
                format!("{what} reference does not resolve")
            }
            StructuralErrorKind::ObjectRebound => {
                "`Object` is rebound in program scope, so typed catches cannot be lowered"
                    .to_owned()
            }
        }
    }

    fn related(&self) -> Option<(Span, &'static str)> {
        match *self {
            StructuralErrorKind::DefaultNotLast { default_span } => {
                Some((default_span, "default catch clause is here"))
            }
            StructuralErrorKind::MultipleDefaults { first_span } => {
                Some((first_span, "first default catch clause is here"))
            }
            _ => None,
        }
    }
}

impl StructuralError {
    pub fn new(kind: StructuralErrorKind, span: Span) -> Self {
        StructuralError { kind, span }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.message())
            .with_label(self.span, "here");
        if let Some((span, label)) = self.kind.related() {
            diag = diag.with_secondary_label(span, label);
        }
        if matches!(self.kind, StructuralErrorKind::MissingDefault) {
            diag = diag.with_suggestion("add `catch (e) { ... }` after the typed clauses");
        }
        if matches!(self.kind, StructuralErrorKind::ObjectRebound) {
            diag = diag.with_suggestion("rename this binding, or move it into a function");
        }
        diag
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code(), self.kind.message(), self.span)
    }
}

impl std::error::Error for StructuralError {}

/// Check every try statement in `program`.
pub fn validate_program(
    program: &Program,
    ast: &Ast,
    grammar: GrammarMode,
) -> Result<(), Vec<StructuralError>> {
    let mut validator = Validator {
        ast,
        grammar,
        errors: Vec::new(),
    };
    validator.block(program.body, program.span);

    if validator.errors.is_empty() {
        Ok(())
    } else {
        Err(validator.errors)
    }
}

struct Validator<'a> {
    ast: &'a Ast,
    grammar: GrammarMode,
    errors: Vec<StructuralError>,
}

impl Validator<'_> {
    fn dangling(&mut self, what: &'static str, span: Span) {
        self.errors.push(StructuralError::new(
            StructuralErrorKind::DanglingReference { what },
            span,
        ));
    }

    fn block(&mut self, range: StmtRange, owner: Span) {
        let ast = self.ast;
        match ast.try_stmt_list(range) {
            Some(stmts) => {
                for &id in stmts {
                    self.stmt(id, owner);
                }
            }
            None => self.dangling("statement list", owner),
        }
    }

    /// `StmtId::INVALID` is allowed.
    fn optional_stmt(&mut self, id: StmtId, owner: Span) {
        if id.is_valid() {
            self.stmt(id, owner);
        }
    }

    fn stmt(&mut self, id: StmtId, owner: Span) {
        ensure_sufficient_stack(|| self.stmt_inner(id, owner));
    }

    fn stmt_inner(&mut self, id: StmtId, owner: Span) {
        let Some(&stmt) = self.ast.try_stmt(id) else {
            self.dangling("statement", owner);
            return;
        };
        let span = stmt.span;

        match stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.expr(expr, span),
            StmtKind::Return(expr) => self.optional_expr(expr, span),
            StmtKind::VarDecl { decls, .. } => self.decls(decls, span),
            StmtKind::Function { params, body, .. } => {
                if self.ast.try_params(params).is_none() {
                    self.dangling("parameter list", span);
                }
                self.block(body, span);
            }
            StmtKind::Block(body) => self.block(body, span),
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                self.expr(test, span);
                self.stmt(consequent, span);
                self.optional_stmt(alternate, span);
            }
            StmtKind::While { test, body } | StmtKind::DoWhile { body, test } => {
                self.expr(test, span);
                self.stmt(body, span);
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                match init {
                    ForInit::None => {}
                    ForInit::Expr(expr) => self.expr(expr, span),
                    ForInit::VarDecl { decls, .. } => self.decls(decls, span),
                }
                self.optional_expr(test, span);
                self.optional_expr(update, span);
                self.stmt(body, span);
            }
            StmtKind::ForEach { iterable, body, .. } => {
                self.expr(iterable, span);
                self.stmt(body, span);
            }
            StmtKind::Try(try_stmt) => self.try_stmt(&try_stmt, span),
            StmtKind::Empty | StmtKind::Break | StmtKind::Continue | StmtKind::Error => {}
        }
    }

    fn decls(&mut self, range: DeclRange, owner: Span) {
        let ast = self.ast;
        match ast.try_decls(range) {
            Some(decls) => {
                for decl in decls {
                    self.optional_expr(decl.init, decl.span);
                }
            }
            None => self.dangling("declarator list", owner),
        }
    }

    fn try_stmt(&mut self, try_stmt: &TryStmt, span: Span) {
        self.block(try_stmt.block, span);

        let ast = self.ast;
        let Some(clauses) = ast.try_catches(try_stmt.handlers) else {
            self.dangling("catch clause list", span);
            return;
        };
        trace!(clauses = clauses.len(), "validating try statement");

        if clauses.is_empty() && try_stmt.finalizer.is_none() {
            self.errors.push(StructuralError::new(
                StructuralErrorKind::MissingHandler,
                span,
            ));
        }

        self.clause_order(clauses, span);
        for clause in clauses {
            if let CatchKind::Typed { specifier, .. } = clause.kind {
                self.expr(specifier, clause.span);
            }
            self.block(clause.body, clause.span);
        }

        if let Some(finalizer) = try_stmt.finalizer {
            self.block(finalizer, span);
        }
    }

    fn clause_order(&mut self, clauses: &[CatchClause], span: Span) {
        let mut default_span: Option<Span> = None;
        for clause in clauses {
            match default_span {
                Some(first_span) if clause.is_default() => {
                    self.errors.push(StructuralError::new(
                        StructuralErrorKind::MultipleDefaults { first_span },
                        clause.span,
                    ));
                }
                Some(default_span) => self.errors.push(StructuralError::new(
                    StructuralErrorKind::DefaultNotLast { default_span },
                    clause.span,
                )),
                None if clause.is_default() => default_span = Some(clause.span),
                None => {}
            }

            if clause.param() == Some(Name::EMPTY) {
                self.errors.push(StructuralError::new(
                    StructuralErrorKind::EmptyBinding,
                    clause.span,
                ));
            }
        }

        let has_typed = clauses.iter().any(CatchClause::is_typed);
        if self.grammar == GrammarMode::Strict && has_typed && default_span.is_none() {
            let last = clauses.last().map_or(span, |clause| clause.span);
            self.errors.push(StructuralError::new(
                StructuralErrorKind::MissingDefault,
                last,
            ));
        }
    }

    fn optional_expr(&mut self, id: ExprId, owner: Span) {
        if id.is_valid() {
            self.expr(id, owner);
        }
    }

    fn expr_list(&mut self, range: ExprRange, owner: Span, holes: bool) {
        let ast = self.ast;
        let Some(exprs) = ast.try_expr_list(range) else {
            self.dangling("expression list", owner);
            return;
        };
        for &id in exprs {
            if holes {
                self.optional_expr(id, owner);
            } else {
                self.expr(id, owner);
            }
        }
    }

    fn expr(&mut self, id: ExprId, owner: Span) {
        ensure_sufficient_stack(|| self.expr_inner(id, owner));
    }

    fn expr_inner(&mut self, id: ExprId, owner: Span) {
        let Some(&expr) = self.ast.try_expr(id) else {
            self.dangling("expression", owner);
            return;
        };
        let span = expr.span;

        match expr.kind {
            ExprKind::Array(elements) => self.expr_list(elements, span, true),
            ExprKind::Sequence(exprs) => self.expr_list(exprs, span, false),
            ExprKind::Object(props) => {
                let ast = self.ast;
                match ast.try_props(props) {
                    Some(props) => {
                        for prop in props {
                            self.expr(prop.value, prop.span);
                        }
                    }
                    None => self.dangling("property list", span),
                }
            }
            ExprKind::Function { params, body, .. } => {
                if self.ast.try_params(params).is_none() {
                    self.dangling("parameter list", span);
                }
                self.block(body, span);
            }
            ExprKind::Arrow { params, body } => {
                if self.ast.try_params(params).is_none() {
                    self.dangling("parameter list", span);
                }
                match body {
                    ArrowBody::Expr(body) => self.expr(body, span),
                    ArrowBody::Block(body) => self.block(body, span),
                }
            }
            ExprKind::Unary { operand, .. } | ExprKind::Update { operand, .. } => {
                self.expr(operand, span);
            }
            ExprKind::Binary { left, right, .. } => {
                self.expr(left, span);
                self.expr(right, span);
            }
            ExprKind::Assign { target, value, .. } => {
                self.expr(target, span);
                self.expr(value, span);
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.expr(test, span);
                self.expr(consequent, span);
                self.expr(alternate, span);
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee, span);
                self.expr_list(args, span, false);
            }
            ExprKind::New { callee, args } => {
                self.expr(callee, span);
                if let Some(args) = args {
                    self.expr_list(args, span, false);
                }
            }
            ExprKind::Member { object, .. } => self.expr(object, span),
            ExprKind::Index { object, index } => {
                self.expr(object, span);
                self.expr(index, span);
            }
            ExprKind::Number(_)
            | ExprKind::String(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
            | ExprKind::This
            | ExprKind::Ident(_)
            | ExprKind::Error => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tc_diagnostic::ErrorCode;
    use tc_ir::{
        Ast, CatchClause, CatchKind, ExprId, GrammarMode, Program, Span, Stmt, StmtId, StmtKind,
        StmtRange, StringInterner, TryStmt,
    };

    use super::{validate_program, StructuralError, StructuralErrorKind};

    fn expect_errors(result: Result<(), Vec<StructuralError>>) -> Vec<StructuralError> {
        match result {
            Ok(()) => panic!("expected structural errors"),
            Err(errors) => errors,
        }
    }

    /// Build `try {} <clauses> [finally {}]` directly, bypassing the parser.
    fn tree(clauses: &[CatchKind], finally: bool) -> (Program, Ast) {
        let mut ast = Ast::new();
        let built: Vec<CatchClause> = clauses
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let start = u32::try_from(i * 10).unwrap_or(0);
                CatchClause {
                    kind,
                    body: StmtRange::EMPTY,
                    span: Span::new(start, start + 5),
                }
            })
            .collect();
        let handlers = ast.alloc_catches(built);
        let finalizer = finally.then_some(StmtRange::EMPTY);
        let stmt = ast.alloc_stmt(Stmt::new(
            StmtKind::Try(TryStmt {
                block: StmtRange::EMPTY,
                handlers,
                finalizer,
            }),
            Span::new(0, 100),
        ));
        let body = ast.alloc_stmt_list([stmt]);
        (
            Program {
                body,
                span: Span::new(0, 100),
            },
            ast,
        )
    }

    fn codes(clauses: &[CatchKind], finally: bool, grammar: GrammarMode) -> Vec<ErrorCode> {
        let (program, ast) = tree(clauses, finally);
        match validate_program(&program, &ast, grammar) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(StructuralError::code).collect(),
        }
    }

    fn typed(interner: &StringInterner, specifier: ExprId) -> CatchKind {
        CatchKind::Typed {
            param: interner.intern("e"),
            specifier,
        }
    }

    #[test]
    fn well_formed_statements_pass() {
        let interner = StringInterner::new();
        let e = Some(interner.intern("e"));
        assert!(codes(&[CatchKind::Default { param: e }], false, GrammarMode::Strict).is_empty());
        assert!(codes(&[], true, GrammarMode::Relaxed).is_empty());
    }

    #[test]
    fn missing_handler() {
        assert_eq!(codes(&[], false, GrammarMode::Relaxed), vec![ErrorCode::E2001]);
    }

    #[test]
    fn default_not_last_and_multiple_defaults() {
        let interner = StringInterner::new();
        // The typed clause's specifier does not resolve either.
        let default = CatchKind::Default { param: None };
        let clauses = [default, typed(&interner, ExprId::new(99)), default];
        let (program, ast) = tree(&clauses, false);
        let errors = expect_errors(validate_program(&program, &ast, GrammarMode::Relaxed));
        let kinds: Vec<StructuralErrorKind> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StructuralErrorKind::DefaultNotLast {
                    default_span: Span::new(0, 5)
                },
                StructuralErrorKind::MultipleDefaults {
                    first_span: Span::new(0, 5)
                },
                StructuralErrorKind::DanglingReference { what: "expression" },
            ]
        );
    }

    #[test]
    fn missing_default_only_when_strict() {
        let interner = StringInterner::new();
        let (program, mut ast) = tree(&[], true);
        let spec = ast.alloc_expr(tc_ir::Expr::new(
            tc_ir::ExprKind::Ident(interner.intern("TypeError")),
            Span::new(0, 9),
        ));
        // Rebuild with a resolvable specifier.
        let handlers = ast.alloc_catches([CatchClause {
            kind: typed(&interner, spec),
            body: StmtRange::EMPTY,
            span: Span::new(10, 20),
        }]);
        let try_id = ast.alloc_stmt(Stmt::new(
            StmtKind::Try(TryStmt {
                block: StmtRange::EMPTY,
                handlers,
                finalizer: None,
            }),
            Span::new(0, 20),
        ));
        let body = ast.alloc_stmt_list([try_id]);
        let program = Program { body, ..program };

        assert!(validate_program(&program, &ast, GrammarMode::Relaxed).is_ok());
        let errors = expect_errors(validate_program(&program, &ast, GrammarMode::Strict));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, StructuralErrorKind::MissingDefault);
        assert_eq!(errors[0].span, Span::new(10, 20));
    }

    #[test]
    fn empty_binding() {
        let clauses = [CatchKind::Default {
            param: Some(tc_ir::Name::EMPTY),
        }];
        assert_eq!(codes(&clauses, false, GrammarMode::Relaxed), vec![ErrorCode::E2005]);
    }

    #[test]
    fn dangling_statement_reported_not_panicking() {
        let mut ast = Ast::new();
        let body = ast.alloc_stmt_list([StmtId::new(7)]);
        let program = Program {
            body,
            span: Span::new(0, 1),
        };
        let errors = expect_errors(validate_program(&program, &ast, GrammarMode::Relaxed));
        assert_eq!(errors[0].code(), ErrorCode::E2006);
        assert_eq!(
            errors[0].to_diagnostic().message,
            "statement reference does not resolve"
        );
    }

    #[test]
    fn diagnostic_points_at_first_default() {
        let default = CatchKind::Default { param: None };
        let (program, ast) = tree(&[default, default], false);
        let errors = expect_errors(validate_program(&program, &ast, GrammarMode::Relaxed));
        let diag = errors[0].to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2003);
        assert_eq!(diag.labels.len(), 2);
        assert_eq!(diag.labels[1].span, Span::new(0, 5));
    }
}

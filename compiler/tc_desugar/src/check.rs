//! Debug-build check of the lowered tree.
//!
//! After lowering, no typed catch may survive and every try statement has
//! at most one catch clause. A violation is a bug in the lowering pass.

use tc_ir::visitor::{walk_expr, walk_stmt, walk_try, Visitor};
use tc_ir::{Ast, CatchClause, Expr, Program, Span, Stmt, TryStmt};
use tc_stack::ensure_sufficient_stack;

struct LoweredShape;

impl<'ast> Visitor<'ast> for LoweredShape {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_stmt(self, stmt, ast));
    }

    fn visit_expr(&mut self, expr: &'ast Expr, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_expr(self, expr, ast));
    }

    fn visit_try(&mut self, try_stmt: &'ast TryStmt, span: Span, ast: &'ast Ast) {
        let clauses = ast.catches(try_stmt.handlers);
        debug_assert!(
            clauses.len() <= 1,
            "lowered try statement at {span} has {} catch clauses",
            clauses.len(),
        );
        debug_assert!(
            !clauses.iter().any(CatchClause::is_typed),
            "typed catch survived lowering at {span}",
        );
        walk_try(self, try_stmt, ast);
    }
}

pub(crate) fn check_lowered(program: &Program, ast: &Ast) {
    LoweredShape.visit_program(program, ast);
}

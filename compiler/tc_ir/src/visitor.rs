//! Read-only traversal of the syntax tree.
//!
//! Override `visit_*` methods to observe specific nodes and call the
//! matching `walk_*` function to continue into children. The visitor may
//! mutate its own state; the tree stays immutable.
//!
//! ```text
//! struct CountTries(usize);
//!
//! impl<'ast> Visitor<'ast> for CountTries {
//!     fn visit_try(&mut self, try_stmt: &'ast TryStmt, span: Span, ast: &'ast Ast) {
//!         self.0 += 1;
//!         walk_try(self, try_stmt, ast);
//!     }
//! }
//! ```

use crate::ast::{
    ArrowBody, CatchClause, CatchKind, Expr, ExprKind, ForInit, Program, Stmt, StmtKind, TryStmt,
};
use crate::{Ast, ExprId, Name, Span, StmtId, StmtRange};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program, ast: &'ast Ast) {
        self.visit_block(program.body, ast);
    }

    /// Visit a statement list (block body, clause body, function body).
    fn visit_block(&mut self, block: StmtRange, ast: &'ast Ast) {
        walk_block(self, block, ast);
    }

    fn visit_stmt_id(&mut self, id: StmtId, ast: &'ast Ast) {
        if id.is_valid() {
            self.visit_stmt(ast.stmt(id), ast);
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, ast: &'ast Ast) {
        walk_stmt(self, stmt, ast);
    }

    fn visit_expr_id(&mut self, id: ExprId, ast: &'ast Ast) {
        if id.is_valid() {
            self.visit_expr(ast.expr(id), ast);
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr, ast: &'ast Ast) {
        walk_expr(self, expr, ast);
    }

    /// Visit a try statement. `span` is the span of the whole statement.
    fn visit_try(&mut self, try_stmt: &'ast TryStmt, span: Span, ast: &'ast Ast) {
        let _ = span;
        walk_try(self, try_stmt, ast);
    }

    fn visit_catch(&mut self, clause: &'ast CatchClause, ast: &'ast Ast) {
        walk_catch(self, clause, ast);
    }

    /// Called for every identifier the tree mentions: references,
    /// declarations, parameters and catch bindings.
    fn visit_name(&mut self, name: Name) {
        let _ = name;
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, block: StmtRange, ast: &'ast Ast) {
    for &id in ast.stmt_list(block) {
        v.visit_stmt_id(id, ast);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, stmt: &'ast Stmt, ast: &'ast Ast) {
    match &stmt.kind {
        StmtKind::Expr(e) | StmtKind::Throw(e) | StmtKind::Return(e) => v.visit_expr_id(*e, ast),
        StmtKind::VarDecl { decls, .. } => {
            for decl in ast.decls(*decls) {
                v.visit_name(decl.name);
                v.visit_expr_id(decl.init, ast);
            }
        }
        StmtKind::Function { name, params, body } => {
            v.visit_name(*name);
            for &param in ast.params(*params) {
                v.visit_name(param);
            }
            v.visit_block(*body, ast);
        }
        StmtKind::Block(body) => v.visit_block(*body, ast),
        StmtKind::If {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr_id(*test, ast);
            v.visit_stmt_id(*consequent, ast);
            v.visit_stmt_id(*alternate, ast);
        }
        StmtKind::While { test, body } | StmtKind::DoWhile { body, test } => {
            v.visit_expr_id(*test, ast);
            v.visit_stmt_id(*body, ast);
        }
        StmtKind::For {
            init,
            test,
            update,
            body,
        } => {
            match init {
                ForInit::None => {}
                ForInit::Expr(e) => v.visit_expr_id(*e, ast),
                ForInit::VarDecl { decls, .. } => {
                    for decl in ast.decls(*decls) {
                        v.visit_name(decl.name);
                        v.visit_expr_id(decl.init, ast);
                    }
                }
            }
            v.visit_expr_id(*test, ast);
            v.visit_expr_id(*update, ast);
            v.visit_stmt_id(*body, ast);
        }
        StmtKind::ForEach {
            binding,
            iterable,
            body,
            ..
        } => {
            v.visit_name(*binding);
            v.visit_expr_id(*iterable, ast);
            v.visit_stmt_id(*body, ast);
        }
        StmtKind::Try(try_stmt) => v.visit_try(try_stmt, stmt.span, ast),
        StmtKind::Empty | StmtKind::Break | StmtKind::Continue | StmtKind::Error => {}
    }
}

pub fn walk_try<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    try_stmt: &'ast TryStmt,
    ast: &'ast Ast,
) {
    v.visit_block(try_stmt.block, ast);
    for clause in ast.catches(try_stmt.handlers) {
        v.visit_catch(clause, ast);
    }
    if let Some(finalizer) = try_stmt.finalizer {
        v.visit_block(finalizer, ast);
    }
}

pub fn walk_catch<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    clause: &'ast CatchClause,
    ast: &'ast Ast,
) {
    match clause.kind {
        CatchKind::Typed { param, specifier } => {
            v.visit_name(param);
            v.visit_expr_id(specifier, ast);
        }
        CatchKind::Default { param } => {
            if let Some(param) = param {
                v.visit_name(param);
            }
        }
    }
    v.visit_block(clause.body, ast);
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr, ast: &'ast Ast) {
    match &expr.kind {
        ExprKind::Ident(name) => v.visit_name(*name),
        ExprKind::Array(elems) | ExprKind::Sequence(elems) => {
            for &elem in ast.expr_list(*elems) {
                v.visit_expr_id(elem, ast);
            }
        }
        ExprKind::Object(props) => {
            for prop in ast.props(*props) {
                v.visit_expr_id(prop.value, ast);
            }
        }
        ExprKind::Function { name, params, body } => {
            if let Some(name) = name {
                v.visit_name(*name);
            }
            for &param in ast.params(*params) {
                v.visit_name(param);
            }
            v.visit_block(*body, ast);
        }
        ExprKind::Arrow { params, body } => {
            for &param in ast.params(*params) {
                v.visit_name(param);
            }
            match body {
                ArrowBody::Expr(e) => v.visit_expr_id(*e, ast),
                ArrowBody::Block(block) => v.visit_block(*block, ast),
            }
        }
        ExprKind::Unary { operand, .. } | ExprKind::Update { operand, .. } => {
            v.visit_expr_id(*operand, ast);
        }
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr_id(*left, ast);
            v.visit_expr_id(*right, ast);
        }
        ExprKind::Assign { target, value, .. } => {
            v.visit_expr_id(*target, ast);
            v.visit_expr_id(*value, ast);
        }
        ExprKind::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr_id(*test, ast);
            v.visit_expr_id(*consequent, ast);
            v.visit_expr_id(*alternate, ast);
        }
        ExprKind::Call { callee, args } => {
            v.visit_expr_id(*callee, ast);
            for &arg in ast.expr_list(*args) {
                v.visit_expr_id(arg, ast);
            }
        }
        ExprKind::New { callee, args } => {
            v.visit_expr_id(*callee, ast);
            if let Some(args) = args {
                for &arg in ast.expr_list(*args) {
                    v.visit_expr_id(arg, ast);
                }
            }
        }
        ExprKind::Member { object, .. } => v.visit_expr_id(*object, ast),
        ExprKind::Index { object, index } => {
            v.visit_expr_id(*object, ast);
            v.visit_expr_id(*index, ast);
        }
        ExprKind::Number(_)
        | ExprKind::String(_)
        | ExprKind::Bool(_)
        | ExprKind::Null
        | ExprKind::This
        | ExprKind::Error => {}
    }
}

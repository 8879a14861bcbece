//! Statement printing.

use tc_ir::{
    CatchKind, DeclRange, Declarator, ExprId, ExprKind, ForEachKind, ForInit, StmtId, StmtKind,
    StmtRange, StringLookup, TryStmt, VarKind,
};
use tc_stack::ensure_sufficient_stack;

use super::expr::Prec;
use super::Printer;
use crate::Emitter;

impl<I: StringLookup + ?Sized, E: Emitter> Printer<'_, I, E> {
    /// Indented statement followed by a newline.
    pub(super) fn stmt_line(&mut self, id: StmtId) {
        self.emitter.emit_indent(self.level);
        self.stmt(id);
        self.emitter.emit_newline();
    }

    /// `{ ... }` with one statement per line, or `{}` when empty.
    pub(super) fn block_body(&mut self, range: StmtRange) {
        let ast = self.ast;
        let stmts = ast.stmt_list(range);
        if stmts.is_empty() {
            self.emit("{}");
            return;
        }
        self.emit("{");
        self.emitter.emit_newline();
        self.level += 1;
        self.with_in(|p| {
            for &id in stmts {
                p.stmt_line(id);
            }
        });
        self.level -= 1;
        self.emitter.emit_indent(self.level);
        self.emit("}");
    }

    /// Print a statement without leading indentation or trailing newline.
    fn stmt(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.stmt_inner(id));
    }

    fn stmt_inner(&mut self, id: StmtId) {
        let kind = self.ast.stmt(id).kind;
        match kind {
            StmtKind::Expr(expr) => {
                if self.starts_ambiguously(expr) {
                    self.emit("(");
                    self.expr(expr, Prec::SEQUENCE);
                    self.emit(")");
                } else {
                    self.expr(expr, Prec::SEQUENCE);
                }
                self.emit(";");
            }
            StmtKind::VarDecl { kind, decls } => {
                self.var_decl(kind, decls);
                self.emit(";");
            }
            StmtKind::Function { name, params, body } => {
                self.emit("function ");
                self.name(name);
                self.params(params);
                self.emitter.emit_space();
                self.block_body(body);
            }
            StmtKind::Block(body) => self.block_body(body),
            StmtKind::Empty => self.emit(";"),
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                self.emit("if (");
                self.with_in(|p| p.expr(test, Prec::SEQUENCE));
                self.emit(") ");
                if alternate.is_valid() && self.ends_with_open_if(consequent) {
                    // Brace the consequent so the `else` stays with this `if`.
                    self.emit("{");
                    self.emitter.emit_newline();
                    self.level += 1;
                    self.stmt_line(consequent);
                    self.level -= 1;
                    self.emitter.emit_indent(self.level);
                    self.emit("}");
                } else {
                    self.stmt(consequent);
                }
                if alternate.is_valid() {
                    self.emit(" else ");
                    self.stmt(alternate);
                }
            }
            StmtKind::While { test, body } => {
                self.emit("while (");
                self.with_in(|p| p.expr(test, Prec::SEQUENCE));
                self.emit(") ");
                self.stmt(body);
            }
            StmtKind::DoWhile { body, test } => {
                self.emit("do ");
                self.stmt(body);
                self.emit(" while (");
                self.with_in(|p| p.expr(test, Prec::SEQUENCE));
                self.emit(");");
            }
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => {
                self.emit("for (");
                let saved = std::mem::replace(&mut self.no_in, true);
                match init {
                    ForInit::None => {}
                    ForInit::Expr(expr) => self.expr(expr, Prec::SEQUENCE),
                    ForInit::VarDecl { kind, decls } => self.var_decl(kind, decls),
                }
                self.no_in = false;
                self.emit(";");
                if test.is_valid() {
                    self.emitter.emit_space();
                    self.expr(test, Prec::SEQUENCE);
                }
                self.emit(";");
                if update.is_valid() {
                    self.emitter.emit_space();
                    self.expr(update, Prec::SEQUENCE);
                }
                self.no_in = saved;
                self.emit(") ");
                self.stmt(body);
            }
            StmtKind::ForEach {
                kind,
                decl,
                binding,
                iterable,
                body,
            } => {
                self.emit("for (");
                if let Some(decl) = decl {
                    self.emit(decl.as_str());
                    self.emitter.emit_space();
                }
                self.name(binding);
                self.emit(match kind {
                    ForEachKind::In => " in ",
                    ForEachKind::Of => " of ",
                });
                self.with_in(|p| p.expr(iterable, Prec::ASSIGN));
                self.emit(") ");
                self.stmt(body);
            }
            StmtKind::Return(expr) => {
                self.emit("return");
                if expr.is_valid() {
                    self.emitter.emit_space();
                    self.expr(expr, Prec::SEQUENCE);
                }
                self.emit(";");
            }
            StmtKind::Throw(expr) => {
                self.emit("throw ");
                self.expr(expr, Prec::SEQUENCE);
                self.emit(";");
            }
            StmtKind::Break => self.emit("break;"),
            StmtKind::Continue => self.emit("continue;"),
            StmtKind::Try(try_stmt) => self.try_stmt(&try_stmt),
            StmtKind::Error => self.emit("/* error */;"),
        }
    }

    fn try_stmt(&mut self, try_stmt: &TryStmt) {
        self.emit("try ");
        self.block_body(try_stmt.block);

        let ast = self.ast;
        for clause in ast.catches(try_stmt.handlers) {
            self.emit(" catch ");
            match clause.kind {
                CatchKind::Typed { param, specifier } => {
                    self.emit("(");
                    self.name(param);
                    self.emit(": ");
                    self.expr(specifier, Prec::NEW);
                    self.emit(") ");
                }
                CatchKind::Default { param: Some(param) } => {
                    self.emit("(");
                    self.name(param);
                    self.emit(") ");
                }
                CatchKind::Default { param: None } => {}
            }
            self.block_body(clause.body);
        }

        if let Some(finalizer) = try_stmt.finalizer {
            self.emit(" finally ");
            self.block_body(finalizer);
        }
    }

    fn var_decl(&mut self, kind: VarKind, decls: DeclRange) {
        self.emit(kind.as_str());
        self.emitter.emit_space();
        let ast = self.ast;
        self.comma_separated(ast.decls(decls), |p, decl: Declarator| {
            p.name(decl.name);
            if decl.init.is_valid() {
                p.emit(" = ");
                p.expr(decl.init, Prec::ASSIGN);
            }
        });
    }

    /// An expression statement may not begin with `{` or `function`.
    fn starts_ambiguously(&self, mut id: ExprId) -> bool {
        loop {
            id = match self.ast.expr(id).kind {
                ExprKind::Object(_) | ExprKind::Function { .. } => return true,
                ExprKind::Binary { left, .. } => left,
                ExprKind::Assign { target, .. } => target,
                ExprKind::Conditional { test, .. } => test,
                ExprKind::Call { callee, .. } => callee,
                ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => object,
                ExprKind::Update {
                    prefix: false,
                    operand,
                    ..
                } => operand,
                ExprKind::Sequence(exprs) => match self.ast.expr_list(exprs).first() {
                    Some(&first) => first,
                    None => return false,
                },
                _ => return false,
            };
        }
    }

    /// True when `id` ends in an `if` with no `else`, which would capture a
    /// following `else`.
    fn ends_with_open_if(&self, id: StmtId) -> bool {
        match self.ast.stmt(id).kind {
            StmtKind::If { alternate, .. } if !alternate.is_valid() => true,
            StmtKind::If { alternate, .. } => self.ends_with_open_if(alternate),
            StmtKind::While { body, .. }
            | StmtKind::For { body, .. }
            | StmtKind::ForEach { body, .. } => self.ends_with_open_if(body),
            _ => false,
        }
    }
}

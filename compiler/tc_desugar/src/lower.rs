//! Lowering of typed catch lists into a single untyped catch.
//!
//! Copies the source arena into a fresh one, bottom-up. Every node is
//! copied as-is except try statements that carry at least one typed catch;
//! those get one catch clause whose body dispatches on the specifiers in
//! source order. Try statements without typed catches are copied
//! unchanged.

use smallvec::SmallVec;
use tc_ir::{
    ArrowBody, AssignOp, Ast, BinaryOp, CatchClause, CatchKind, Declarator, Expr, ExprId,
    ExprKind, ExprRange, ForInit, Name, Program, Property, Span, Stmt, StmtId, StmtKind,
    StmtRange, StringInterner, TryStmt, VarKind,
};
use tc_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::hygiene::{fresh_names, SyntheticNames};
use crate::{DesugarOptions, Desugared};

/// Lower every try statement in `program`.
///
/// With `object_alias`, type tests call the alias and the program starts
/// with `const ALIAS = Object;`.
pub(crate) fn lower_program(
    program: &Program,
    src: &Ast,
    interner: &StringInterner,
    options: &DesugarOptions,
    object_alias: Option<Name>,
) -> Desugared {
    let mut lowerer = Lowerer::new(src, interner, options, object_alias);
    let mut body = lowerer.lower_block(program.body);
    if let Some(alias) = object_alias.filter(|_| lowerer.lowered > 0) {
        body = lowerer.prepend_alias(alias, body, program.span);
    }
    Desugared {
        program: Program {
            body,
            span: program.span,
        },
        ast: lowerer.ast,
        lowered: lowerer.lowered,
    }
}

/// State for one lowering pass.
struct Lowerer<'a> {
    /// Source arena (read-only).
    src: &'a Ast,
    interner: &'a StringInterner,
    options: &'a DesugarOptions,
    /// Target arena being built.
    ast: Ast,
    lowered: usize,
    /// The built-in `Object`.
    name_object: Name,
    /// Callee of the boxing call: `Object` or its alias.
    boxer: Name,
    object_alias: Option<Name>,
}

impl<'a> Lowerer<'a> {
    fn new(
        src: &'a Ast,
        interner: &'a StringInterner,
        options: &'a DesugarOptions,
        object_alias: Option<Name>,
    ) -> Self {
        let name_object = interner.intern("Object");
        Lowerer {
            src,
            interner,
            options,
            ast: Ast::new(),
            lowered: 0,
            name_object,
            boxer: object_alias.unwrap_or(name_object),
            object_alias,
        }
    }

    /// `const ALIAS = Object;` followed by `body`.
    fn prepend_alias(&mut self, alias: Name, body: StmtRange, span: Span) -> StmtRange {
        let object = self.expr(ExprKind::Ident(self.name_object), span);
        let decls = self.ast.alloc_decls([Declarator {
            name: alias,
            init: object,
            span,
        }]);
        let decl = self.stmt(
            StmtKind::VarDecl {
                kind: VarKind::Const,
                decls,
            },
            span,
        );
        let stmts: SmallVec<[StmtId; 8]> = std::iter::once(decl)
            .chain(self.ast.stmt_list(body).iter().copied())
            .collect();
        self.ast.alloc_stmt_list(stmts)
    }

    fn expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.ast.alloc_expr(Expr::new(kind, span))
    }

    fn stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.ast.alloc_stmt(Stmt::new(kind, span))
    }

    // ── Statements ──────────────────────────────────────────────

    fn lower_block(&mut self, range: StmtRange) -> StmtRange {
        let src = self.src;
        let stmts: SmallVec<[StmtId; 8]> = src
            .stmt_list(range)
            .iter()
            .map(|&id| self.lower_stmt(id))
            .collect();
        self.ast.alloc_stmt_list(stmts)
    }

    /// Lower an optional statement (`StmtId::INVALID` passes through).
    fn lower_optional_stmt(&mut self, id: StmtId) -> StmtId {
        if id.is_valid() {
            self.lower_stmt(id)
        } else {
            StmtId::INVALID
        }
    }

    fn lower_stmt(&mut self, id: StmtId) -> StmtId {
        ensure_sufficient_stack(|| self.lower_stmt_inner(id))
    }

    fn lower_stmt_inner(&mut self, id: StmtId) -> StmtId {
        let Stmt { kind, span } = *self.src.stmt(id);

        let kind = match kind {
            StmtKind::Expr(expr) => StmtKind::Expr(self.lower_expr(expr)),
            StmtKind::Throw(expr) => StmtKind::Throw(self.lower_expr(expr)),
            StmtKind::Return(expr) => StmtKind::Return(self.lower_optional_expr(expr)),
            StmtKind::VarDecl { kind, decls } => StmtKind::VarDecl {
                kind,
                decls: self.lower_decls(decls),
            },
            StmtKind::Function { name, params, body } => StmtKind::Function {
                name,
                params: self.copy_params(params),
                body: self.lower_block(body),
            },
            StmtKind::Block(body) => StmtKind::Block(self.lower_block(body)),
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => StmtKind::If {
                test: self.lower_expr(test),
                consequent: self.lower_stmt(consequent),
                alternate: self.lower_optional_stmt(alternate),
            },
            StmtKind::While { test, body } => StmtKind::While {
                test: self.lower_expr(test),
                body: self.lower_stmt(body),
            },
            StmtKind::DoWhile { body, test } => StmtKind::DoWhile {
                body: self.lower_stmt(body),
                test: self.lower_expr(test),
            },
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => StmtKind::For {
                init: match init {
                    ForInit::None => ForInit::None,
                    ForInit::Expr(expr) => ForInit::Expr(self.lower_expr(expr)),
                    ForInit::VarDecl { kind, decls } => ForInit::VarDecl {
                        kind,
                        decls: self.lower_decls(decls),
                    },
                },
                test: self.lower_optional_expr(test),
                update: self.lower_optional_expr(update),
                body: self.lower_stmt(body),
            },
            StmtKind::ForEach {
                kind,
                decl,
                binding,
                iterable,
                body,
            } => StmtKind::ForEach {
                kind,
                decl,
                binding,
                iterable: self.lower_expr(iterable),
                body: self.lower_stmt(body),
            },
            StmtKind::Try(try_stmt) => StmtKind::Try(self.lower_try(&try_stmt, span)),
            StmtKind::Empty => StmtKind::Empty,
            StmtKind::Break => StmtKind::Break,
            StmtKind::Continue => StmtKind::Continue,
            StmtKind::Error => StmtKind::Error,
        };

        self.stmt(kind, span)
    }

    fn lower_decls(&mut self, range: tc_ir::DeclRange) -> tc_ir::DeclRange {
        let src = self.src;
        let decls: SmallVec<[Declarator; 4]> = src
            .decls(range)
            .iter()
            .map(|decl| Declarator {
                init: self.lower_optional_expr(decl.init),
                ..*decl
            })
            .collect();
        self.ast.alloc_decls(decls)
    }

    fn copy_params(&mut self, range: tc_ir::ParamRange) -> tc_ir::ParamRange {
        let src = self.src;
        self.ast.alloc_params(src.params(range).iter().copied())
    }

    // ── Try statements ──────────────────────────────────────────

    fn lower_try(&mut self, try_stmt: &TryStmt, span: Span) -> TryStmt {
        let src = self.src;
        let clauses = src.catches(try_stmt.handlers);
        let block = self.lower_block(try_stmt.block);

        let handlers = if clauses.iter().any(CatchClause::is_typed) {
            let names = fresh_names(
                try_stmt,
                src,
                self.interner,
                &self.options.error_name,
                &self.options.caught_name,
                self.object_alias,
            );
            debug!(
                typed = clauses.iter().filter(|c| c.is_typed()).count(),
                default = clauses.iter().any(CatchClause::is_default),
                error = self.interner.lookup(names.error),
                caught = self.interner.lookup(names.caught),
                "lowering try statement"
            );
            self.lowered += 1;
            let clause = self.lower_dispatch(clauses, names, span);
            self.ast.alloc_catches([clause])
        } else {
            let copied: SmallVec<[CatchClause; 1]> = clauses
                .iter()
                .map(|clause| CatchClause {
                    body: self.lower_block(clause.body),
                    ..*clause
                })
                .collect();
            self.ast.alloc_catches(copied)
        };

        let finalizer = try_stmt.finalizer.map(|body| self.lower_block(body));

        TryStmt {
            block,
            handlers,
            finalizer,
        }
    }

    /// Build `catch ($error) { let $caught; if (...) {...} else ... }`.
    fn lower_dispatch(
        &mut self,
        clauses: &[CatchClause],
        names: SyntheticNames,
        try_span: Span,
    ) -> CatchClause {
        let span = clauses
            .iter()
            .map(|clause| clause.span)
            .reduce(Span::merge)
            .unwrap_or(try_span);

        // The chain is built from the tail up: the fallback first, then one
        // `if` per typed clause wrapping the previous link as its `else`.
        let default = clauses.iter().find(|clause| clause.is_default());
        let mut tail = match default {
            Some(clause) => self.default_branch(clause, names.error),
            None => self.rethrow(names.error, span),
        };

        for clause in clauses.iter().rev() {
            if let CatchKind::Typed { param, specifier } = clause.kind {
                let test = self.type_test(specifier, names, clause.span);
                let consequent =
                    self.bound_block(param, names.caught, clause.body, clause.span);
                tail = self.stmt(
                    StmtKind::If {
                        test,
                        consequent,
                        alternate: tail,
                    },
                    clause.span,
                );
            }
        }

        let slot = self.ast.alloc_decls([Declarator {
            name: names.caught,
            init: ExprId::INVALID,
            span,
        }]);
        let slot = self.stmt(
            StmtKind::VarDecl {
                kind: VarKind::Let,
                decls: slot,
            },
            span,
        );
        let body = self.ast.alloc_stmt_list([slot, tail]);

        CatchClause {
            kind: CatchKind::Default {
                param: Some(names.error),
            },
            body,
            span,
        }
    }

    /// `($caught = Object($error)) instanceof SPECIFIER`, calling the alias
    /// in place of `Object` when there is one.
    fn type_test(&mut self, specifier: ExprId, names: SyntheticNames, span: Span) -> ExprId {
        let object = self.expr(ExprKind::Ident(self.boxer), span);
        let error = self.expr(ExprKind::Ident(names.error), span);
        let args = self.ast.alloc_expr_list([error]);
        let boxed = self.expr(
            ExprKind::Call {
                callee: object,
                args,
            },
            span,
        );
        let slot = self.expr(ExprKind::Ident(names.caught), span);
        let assign = self.expr(
            ExprKind::Assign {
                op: AssignOp::Assign,
                target: slot,
                value: boxed,
            },
            span,
        );
        let specifier = self.lower_expr(specifier);
        self.expr(
            ExprKind::Binary {
                op: BinaryOp::Instanceof,
                left: assign,
                right: specifier,
            },
            span,
        )
    }

    /// `{ let param = source; BODY }`
    fn bound_block(&mut self, param: Name, source: Name, body: StmtRange, span: Span) -> StmtId {
        let value = self.expr(ExprKind::Ident(source), span);
        let decls = self.ast.alloc_decls([Declarator {
            name: param,
            init: value,
            span,
        }]);
        let binding = self.stmt(
            StmtKind::VarDecl {
                kind: VarKind::Let,
                decls,
            },
            span,
        );

        let src = self.src;
        let mut stmts: SmallVec<[StmtId; 8]> = SmallVec::new();
        stmts.push(binding);
        stmts.extend(src.stmt_list(body).iter().map(|&id| self.lower_stmt(id)));
        let block = self.ast.alloc_stmt_list(stmts);
        self.stmt(StmtKind::Block(block), span)
    }

    /// The default clause body, bound to the unwrapped value when the
    /// clause names a parameter.
    fn default_branch(&mut self, clause: &CatchClause, error: Name) -> StmtId {
        match clause.param() {
            Some(param) => self.bound_block(param, error, clause.body, clause.span),
            None => {
                let body = self.lower_block(clause.body);
                self.stmt(StmtKind::Block(body), clause.span)
            }
        }
    }

    /// `{ throw $error; }`
    fn rethrow(&mut self, error: Name, span: Span) -> StmtId {
        let value = self.expr(ExprKind::Ident(error), span);
        let throw = self.stmt(StmtKind::Throw(value), span);
        let body = self.ast.alloc_stmt_list([throw]);
        self.stmt(StmtKind::Block(body), span)
    }

    // ── Expressions ─────────────────────────────────────────────

    fn lower_optional_expr(&mut self, id: ExprId) -> ExprId {
        if id.is_valid() {
            self.lower_expr(id)
        } else {
            ExprId::INVALID
        }
    }

    /// Holes (`ExprId::INVALID`) are kept.
    fn lower_expr_list(&mut self, range: ExprRange) -> ExprRange {
        let src = self.src;
        let exprs: SmallVec<[ExprId; 8]> = src
            .expr_list(range)
            .iter()
            .map(|&id| self.lower_optional_expr(id))
            .collect();
        self.ast.alloc_expr_list(exprs)
    }

    fn lower_expr(&mut self, id: ExprId) -> ExprId {
        ensure_sufficient_stack(|| self.lower_expr_inner(id))
    }

    fn lower_expr_inner(&mut self, id: ExprId) -> ExprId {
        let Expr { kind, span } = *self.src.expr(id);

        let kind = match kind {
            ExprKind::Number(_)
            | ExprKind::String(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
            | ExprKind::This
            | ExprKind::Ident(_)
            | ExprKind::Error => kind,

            ExprKind::Array(elements) => ExprKind::Array(self.lower_expr_list(elements)),
            ExprKind::Sequence(exprs) => ExprKind::Sequence(self.lower_expr_list(exprs)),
            ExprKind::Object(props) => {
                let src = self.src;
                let props: SmallVec<[Property; 4]> = src
                    .props(props)
                    .iter()
                    .map(|prop| Property {
                        value: self.lower_expr(prop.value),
                        ..*prop
                    })
                    .collect();
                ExprKind::Object(self.ast.alloc_props(props))
            }
            ExprKind::Function { name, params, body } => ExprKind::Function {
                name,
                params: self.copy_params(params),
                body: self.lower_block(body),
            },
            ExprKind::Arrow { params, body } => ExprKind::Arrow {
                params: self.copy_params(params),
                body: match body {
                    ArrowBody::Expr(expr) => ArrowBody::Expr(self.lower_expr(expr)),
                    ArrowBody::Block(block) => ArrowBody::Block(self.lower_block(block)),
                },
            },
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op,
                operand: self.lower_expr(operand),
            },
            ExprKind::Update {
                op,
                prefix,
                operand,
            } => ExprKind::Update {
                op,
                prefix,
                operand: self.lower_expr(operand),
            },
            ExprKind::Binary { op, left, right } => ExprKind::Binary {
                op,
                left: self.lower_expr(left),
                right: self.lower_expr(right),
            },
            ExprKind::Assign { op, target, value } => ExprKind::Assign {
                op,
                target: self.lower_expr(target),
                value: self.lower_expr(value),
            },
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => ExprKind::Conditional {
                test: self.lower_expr(test),
                consequent: self.lower_expr(consequent),
                alternate: self.lower_expr(alternate),
            },
            ExprKind::Call { callee, args } => ExprKind::Call {
                callee: self.lower_expr(callee),
                args: self.lower_expr_list(args),
            },
            ExprKind::New { callee, args } => ExprKind::New {
                callee: self.lower_expr(callee),
                args: args.map(|args| self.lower_expr_list(args)),
            },
            ExprKind::Member { object, property } => ExprKind::Member {
                object: self.lower_expr(object),
                property,
            },
            ExprKind::Index { object, index } => ExprKind::Index {
                object: self.lower_expr(object),
                index: self.lower_expr(index),
            },
        };

        self.expr(kind, span)
    }
}

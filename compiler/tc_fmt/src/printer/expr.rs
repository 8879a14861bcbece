//! Expression printing with precedence-driven parentheses.

use tc_ir::{
    ArrowBody, BinaryOp, ExprId, ExprKind, ParamRange, PropKey, Property, StringLookup, UnaryOp,
};
use tc_stack::ensure_sufficient_stack;

use super::Printer;
use crate::{literal, Emitter};

/// Binding strength of an expression form. An operand is parenthesized
/// when its own strength is below the minimum its position requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct Prec(u8);

impl Prec {
    pub(super) const SEQUENCE: Prec = Prec(0);
    /// Assignment, arrow functions, and any single list element.
    pub(super) const ASSIGN: Prec = Prec(1);
    const CONDITIONAL: Prec = Prec(2);
    const UNARY: Prec = Prec(15);
    const POSTFIX: Prec = Prec(16);
    /// `new C` without arguments.
    pub(super) const NEW: Prec = Prec(16);
    /// Member access, calls, `new C(args)`.
    const CALL: Prec = Prec(17);
    const PRIMARY: Prec = Prec(18);

    /// Binary levels 1 (`**`) through 12 (`??`) map onto 14 down to 3.
    fn binary(op: BinaryOp) -> Prec {
        Prec(15 - op.precedence())
    }

    fn next(self) -> Prec {
        Prec(self.0 + 1)
    }

    fn of(kind: &ExprKind) -> Prec {
        match kind {
            ExprKind::Sequence(_) => Prec::SEQUENCE,
            ExprKind::Assign { .. } | ExprKind::Arrow { .. } => Prec::ASSIGN,
            ExprKind::Conditional { .. } => Prec::CONDITIONAL,
            ExprKind::Binary { op, .. } => Prec::binary(*op),
            ExprKind::Unary { .. } | ExprKind::Update { prefix: true, .. } => Prec::UNARY,
            ExprKind::Update { prefix: false, .. } => Prec::POSTFIX,
            ExprKind::New { args: None, .. } => Prec::NEW,
            ExprKind::Call { .. }
            | ExprKind::New { args: Some(_), .. }
            | ExprKind::Member { .. }
            | ExprKind::Index { .. } => Prec::CALL,
            _ => Prec::PRIMARY,
        }
    }
}

impl<I: StringLookup + ?Sized, E: Emitter> Printer<'_, I, E> {
    pub(super) fn expr(&mut self, id: ExprId, min: Prec) {
        ensure_sufficient_stack(|| self.expr_inner(id, min));
    }

    fn expr_inner(&mut self, id: ExprId, min: Prec) {
        let kind = self.ast.expr(id).kind;
        let bare_in = self.no_in
            && matches!(
                kind,
                ExprKind::Binary {
                    op: BinaryOp::In,
                    ..
                }
            );
        if Prec::of(&kind) < min || bare_in {
            self.parenthesized(kind);
        } else {
            self.expr_kind(kind);
        }
    }

    fn parenthesized(&mut self, kind: ExprKind) {
        self.emit("(");
        self.with_in(|p| p.expr_kind(kind));
        self.emit(")");
    }

    fn expr_kind(&mut self, kind: ExprKind) {
        match kind {
            ExprKind::Number(bits) => self.emit(&literal::number(bits)),
            ExprKind::String(name) => {
                let interner = self.interner;
                self.emit(&literal::string(interner.lookup(name)));
            }
            ExprKind::Bool(value) => self.emit(if value { "true" } else { "false" }),
            ExprKind::Null => self.emit("null"),
            ExprKind::This => self.emit("this"),
            ExprKind::Ident(name) => self.name(name),

            ExprKind::Array(elements) => {
                let ast = self.ast;
                let elements = ast.expr_list(elements);
                self.emit("[");
                self.with_in(|p| {
                    p.comma_separated(elements, |p, element| {
                        if element.is_valid() {
                            p.expr(element, Prec::ASSIGN);
                        }
                    });
                });
                // A trailing hole needs its own comma to survive re-parsing.
                if elements.last().is_some_and(|last| !last.is_valid()) {
                    self.emit(",");
                }
                self.emit("]");
            }
            ExprKind::Object(props) => {
                let ast = self.ast;
                let props = ast.props(props);
                if props.is_empty() {
                    self.emit("{}");
                    return;
                }
                self.emit("{ ");
                self.with_in(|p| p.comma_separated(props, Self::property));
                self.emit(" }");
            }

            ExprKind::Function { name, params, body } => {
                self.emit("function");
                if let Some(name) = name {
                    self.emitter.emit_space();
                    self.name(name);
                }
                self.params(params);
                self.emitter.emit_space();
                self.block_body(body);
            }
            ExprKind::Arrow { params, body } => {
                self.params(params);
                self.emit(" => ");
                match body {
                    ArrowBody::Expr(body) => {
                        if matches!(self.ast.expr(body).kind, ExprKind::Object(_)) {
                            self.parenthesized(self.ast.expr(body).kind);
                        } else {
                            self.expr(body, Prec::ASSIGN);
                        }
                    }
                    ArrowBody::Block(body) => self.block_body(body),
                }
            }

            ExprKind::Unary { op, operand } => {
                self.emit(op.as_symbol());
                if op.is_keyword() || self.would_merge(op, operand) {
                    self.emitter.emit_space();
                }
                self.expr(operand, Prec::UNARY);
            }
            ExprKind::Update {
                op,
                prefix: true,
                operand,
            } => {
                self.emit(op.as_symbol());
                self.expr(operand, Prec::UNARY);
            }
            ExprKind::Update {
                op,
                prefix: false,
                operand,
            } => {
                self.expr(operand, Prec::CALL);
                self.emit(op.as_symbol());
            }
            ExprKind::Binary { op, left, right } => {
                let prec = Prec::binary(op);
                let (left_min, right_min) = if op.is_right_assoc() {
                    // `-a ** b` is a syntax error, so unary operands of `**`
                    // are parenthesized too.
                    (Prec::POSTFIX, prec)
                } else {
                    (prec, prec.next())
                };
                self.binary_operand(op, left, left_min);
                self.emitter.emit_space();
                self.emit(op.as_symbol());
                self.emitter.emit_space();
                self.binary_operand(op, right, right_min);
            }
            ExprKind::Assign { op, target, value } => {
                self.expr(target, Prec::CALL);
                self.emitter.emit_space();
                self.emit(op.as_symbol());
                self.emitter.emit_space();
                self.expr(value, Prec::ASSIGN);
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.expr(test, Prec::CONDITIONAL.next());
                self.emit(" ? ");
                self.with_in(|p| p.expr(consequent, Prec::ASSIGN));
                self.emit(" : ");
                self.expr(alternate, Prec::ASSIGN);
            }

            ExprKind::Call { callee, args } => {
                self.expr(callee, Prec::CALL);
                self.arguments(args);
            }
            ExprKind::New { callee, args } => {
                self.emit("new ");
                let callee_kind = self.ast.expr(callee).kind;
                if self.has_call_in_chain(callee) || Prec::of(&callee_kind) < Prec::CALL {
                    self.parenthesized(callee_kind);
                } else {
                    self.expr(callee, Prec::CALL);
                }
                if let Some(args) = args {
                    self.arguments(args);
                }
            }
            ExprKind::Member { object, property } => {
                let object_kind = self.ast.expr(object).kind;
                if matches!(object_kind, ExprKind::Number(_)) {
                    self.parenthesized(object_kind);
                } else {
                    self.expr(object, Prec::CALL);
                }
                self.emit(".");
                self.name(property);
            }
            ExprKind::Index { object, index } => {
                self.expr(object, Prec::CALL);
                self.emit("[");
                self.with_in(|p| p.expr(index, Prec::SEQUENCE));
                self.emit("]");
            }

            ExprKind::Sequence(exprs) => {
                let ast = self.ast;
                self.comma_separated(ast.expr_list(exprs), |p, expr| p.expr(expr, Prec::ASSIGN));
            }

            ExprKind::Error => self.emit("<error>"),
        }
    }

    /// `??` cannot be mixed with `&&`/`||` without parentheses.
    fn binary_operand(&mut self, op: BinaryOp, operand: ExprId, min: Prec) {
        let kind = self.ast.expr(operand).kind;
        let mixes_coalesce = op == BinaryOp::Coalesce
            && matches!(
                kind,
                ExprKind::Binary {
                    op: BinaryOp::And | BinaryOp::Or,
                    ..
                }
            );
        if mixes_coalesce {
            self.parenthesized(kind);
        } else {
            self.expr(operand, min);
        }
    }

    /// `- -x` and `+ ++x` need a space so the signs do not fuse.
    fn would_merge(&self, op: UnaryOp, operand: ExprId) -> bool {
        if !matches!(op, UnaryOp::Neg | UnaryOp::Plus) {
            return false;
        }
        matches!(
            self.ast.expr(operand).kind,
            ExprKind::Unary {
                op: UnaryOp::Neg | UnaryOp::Plus,
                ..
            } | ExprKind::Update { prefix: true, .. }
        )
    }

    /// `new f().x()` would call `f` as the constructor; such callees need
    /// parentheses.
    fn has_call_in_chain(&self, mut id: ExprId) -> bool {
        loop {
            id = match self.ast.expr(id).kind {
                ExprKind::Call { .. } => return true,
                ExprKind::Member { object, .. } | ExprKind::Index { object, .. } => object,
                _ => return false,
            };
        }
    }

    fn arguments(&mut self, args: tc_ir::ExprRange) {
        let ast = self.ast;
        self.emit("(");
        self.with_in(|p| {
            p.comma_separated(ast.expr_list(args), |p, arg| p.expr(arg, Prec::ASSIGN));
        });
        self.emit(")");
    }

    fn property(&mut self, prop: Property) {
        match prop.key {
            PropKey::Ident(name) if prop.shorthand => {
                self.name(name);
                return;
            }
            PropKey::Ident(name) => self.name(name),
            PropKey::String(name) => {
                let interner = self.interner;
                self.emit(&literal::string(interner.lookup(name)));
            }
            PropKey::Number(bits) => self.emit(&literal::number(bits)),
        }
        self.emit(": ");
        self.expr(prop.value, Prec::ASSIGN);
    }

    pub(super) fn params(&mut self, params: ParamRange) {
        let ast = self.ast;
        self.emit("(");
        self.comma_separated(ast.params(params), Self::name);
        self.emit(")");
    }
}

//! Expression nodes.

use std::fmt;

use super::operators::{AssignOp, BinaryOp, UnaryOp, UpdateOp};
use crate::{ExprId, ExprRange, Name, ParamRange, PropRange, Span, StmtRange};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
///
/// Children are arena ids; lists are ranges into the arena's side tables.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Numeric literal stored as `f64` bits
    Number(u64),
    /// String literal (cooked contents)
    String(Name),
    Bool(bool),
    Null,
    This,
    Ident(Name),

    /// `[a, , b]`: holes are `ExprId::INVALID`
    Array(ExprRange),
    /// `{ a: 1, b }`
    Object(PropRange),

    /// `function name?(params) { body }`
    Function {
        name: Option<Name>,
        params: ParamRange,
        body: StmtRange,
    },
    /// `x => e`, `(a, b) => { ... }`
    Arrow { params: ParamRange, body: ArrowBody },

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    /// `++x`, `x--`
    Update {
        op: UpdateOp,
        prefix: bool,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    /// `test ? consequent : alternate`
    Conditional {
        test: ExprId,
        consequent: ExprId,
        alternate: ExprId,
    },

    Call {
        callee: ExprId,
        args: ExprRange,
    },
    /// `new C(args)`; `args` is `None` for `new C`
    New {
        callee: ExprId,
        args: Option<ExprRange>,
    },
    /// `object.property`
    Member { object: ExprId, property: Name },
    /// `object[index]`
    Index { object: ExprId, index: ExprId },

    /// `a, b, c`
    Sequence(ExprRange),

    /// Placeholder produced during error recovery.
    Error,
}

impl ExprKind {
    /// Valid targets of assignment and update operators.
    pub fn is_assignment_target(&self) -> bool {
        matches!(
            self,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Index { .. }
        )
    }
}

/// Body of an arrow function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArrowBody {
    Expr(ExprId),
    Block(StmtRange),
}

/// Object literal property key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropKey {
    Ident(Name),
    String(Name),
    Number(u64),
}

/// Object literal property.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Property {
    pub key: PropKey,
    pub value: ExprId,
    /// `{ x }` rather than `{ x: x }`
    pub shorthand: bool,
    pub span: Span,
}

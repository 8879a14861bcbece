//! Flat syntax tree for the host language subset.
//!
//! Nodes are stored in an [`Ast`](crate::Ast) arena and refer to each other
//! through `ExprId`/`StmtId` and compact ranges.

mod expr;
mod operators;
mod stmt;

pub use expr::{ArrowBody, Expr, ExprKind, PropKey, Property};
pub use operators::{AssignOp, BinaryOp, UnaryOp, UpdateOp};
pub use stmt::{
    CatchClause, CatchKind, Declarator, ForEachKind, ForInit, Stmt, StmtKind, TryStmt, VarKind,
};

use crate::{Span, StmtRange};

/// A parsed source file: its top-level statements.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Program {
    pub body: StmtRange,
    pub span: Span,
}


//! Core data structures shared by the typed-catch pipeline:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - The flat syntax tree (`Ast` arena, `Expr`, `Stmt`, catch clauses)
//! - A read-only `Visitor`
//!
//! # Design
//!
//! - **Intern identifiers**: strings become `Name(u32)`.
//! - **Flatten the tree**: no `Box<Expr>`; nodes refer to each other through
//!   `ExprId`/`StmtId` and lists are ranges into side tables.
//!
//! Numbers are stored as `f64` bits so every node is `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod grammar;
mod ids;
mod interner;
mod name;
mod span;
mod token;
pub mod visitor;

pub use arena::Ast;
pub use ast::{
    ArrowBody, AssignOp, BinaryOp, CatchClause, CatchKind, Declarator, Expr, ExprKind,
    ForEachKind, ForInit, Program, PropKey, Property, Stmt, StmtKind, TryStmt, UnaryOp, UpdateOp,
    VarKind,
};
pub use grammar::{GrammarMode, UnknownGrammarMode};
pub use ids::{CatchRange, DeclRange, ExprId, ExprRange, ParamRange, PropRange, StmtId, StmtRange};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenFlags, TokenKind, TokenList};

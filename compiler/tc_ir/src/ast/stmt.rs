//! Statement nodes, including the extended try statement.

use std::fmt;

use crate::{CatchRange, DeclRange, ExprId, Name, ParamRange, Span, StmtId, StmtRange};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Expr(ExprId),
    /// `var`/`let`/`const` with one or more declarators
    VarDecl { kind: VarKind, decls: DeclRange },
    Function {
        name: Name,
        params: ParamRange,
        body: StmtRange,
    },
    Block(StmtRange),
    Empty,
    /// `alternate` is `StmtId::INVALID` when there is no `else`
    If {
        test: ExprId,
        consequent: StmtId,
        alternate: StmtId,
    },
    While { test: ExprId, body: StmtId },
    DoWhile { body: StmtId, test: ExprId },
    /// C-style `for`; absent `test`/`update` are `ExprId::INVALID`
    For {
        init: ForInit,
        test: ExprId,
        update: ExprId,
        body: StmtId,
    },
    /// `for (let x of xs)` and `for (k in obj)`
    ForEach {
        kind: ForEachKind,
        decl: Option<VarKind>,
        binding: Name,
        iterable: ExprId,
        body: StmtId,
    },
    /// `argument` is `ExprId::INVALID` for a bare `return`
    Return(ExprId),
    Throw(ExprId),
    Break,
    Continue,
    Try(TryStmt),
    /// Placeholder produced during error recovery.
    Error,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ForInit {
    None,
    Expr(ExprId),
    VarDecl { kind: VarKind, decls: DeclRange },
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ForEachKind {
    In,
    Of,
}

/// `name = init` inside a variable declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Declarator {
    pub name: Name,
    /// `ExprId::INVALID` when there is no initializer
    pub init: ExprId,
    pub span: Span,
}

/// `try Block CatchClauses? Finally?`
///
/// `handlers` holds every catch clause in source order, typed and default
/// alike. A well-formed statement has typed clauses first and at most one
/// default clause, last.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TryStmt {
    pub block: StmtRange,
    pub handlers: CatchRange,
    pub finalizer: Option<StmtRange>,
}

/// One `catch` clause.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CatchClause {
    pub kind: CatchKind,
    pub body: StmtRange,
    pub span: Span,
}

impl CatchClause {
    #[inline]
    pub fn is_typed(&self) -> bool {
        matches!(self.kind, CatchKind::Typed { .. })
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self.kind, CatchKind::Default { .. })
    }

    /// Name bound by the clause, if any.
    pub fn param(&self) -> Option<Name> {
        match self.kind {
            CatchKind::Typed { param, .. } => Some(param),
            CatchKind::Default { param } => param,
        }
    }
}

/// Catch clause variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CatchKind {
    /// `catch (param: Specifier) { ... }`
    Typed { param: Name, specifier: ExprId },
    /// `catch (param) { ... }` or `catch { ... }`
    Default { param: Option<Name> },
}

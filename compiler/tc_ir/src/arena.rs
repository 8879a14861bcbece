//! Arena storage for the flat syntax tree.

use crate::ast::{CatchClause, Declarator, Expr, Property, Stmt};
use crate::{
    CatchRange, DeclRange, ExprId, ExprRange, Name, ParamRange, PropRange, StmtId, StmtRange,
};

#[expect(
    clippy::cast_possible_truncation,
    reason = "node counts are bounded by source length, which fits u32 spans"
)]
#[inline]
fn to_u32(len: usize) -> u32 {
    len as u32
}

/// Contiguous storage for every node of one parsed (or lowered) program.
///
/// Lists are appended to their side table in one go, so a range always
/// covers a contiguous run. Build a list's elements first, then allocate
/// the list.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Ast {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    props: Vec<Property>,
    decls: Vec<Declarator>,
    params: Vec<Name>,
    catches: Vec<CatchClause>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the arena from the source length.
    /// Heuristic: about one expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated_exprs = source_len / 8;
        Ast {
            exprs: Vec::with_capacity(estimated_exprs),
            stmts: Vec::with_capacity(estimated_exprs / 4),
            expr_lists: Vec::with_capacity(estimated_exprs / 4),
            stmt_lists: Vec::with_capacity(estimated_exprs / 4),
            props: Vec::new(),
            decls: Vec::with_capacity(estimated_exprs / 8),
            params: Vec::new(),
            catches: Vec::new(),
        }
    }

    // ===== Nodes =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn try_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn try_stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    // ===== Lists =====

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        ExprRange::new(start, to_u32(self.expr_lists.len()) - start)
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len());
        self.stmt_lists.extend(stmts);
        StmtRange::new(start, to_u32(self.stmt_lists.len()) - start)
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.to_range()]
    }

    pub fn alloc_props(&mut self, props: impl IntoIterator<Item = Property>) -> PropRange {
        let start = to_u32(self.props.len());
        self.props.extend(props);
        PropRange::new(start, to_u32(self.props.len()) - start)
    }

    #[inline]
    pub fn props(&self, range: PropRange) -> &[Property] {
        &self.props[range.to_range()]
    }

    pub fn alloc_decls(&mut self, decls: impl IntoIterator<Item = Declarator>) -> DeclRange {
        let start = to_u32(self.decls.len());
        self.decls.extend(decls);
        DeclRange::new(start, to_u32(self.decls.len()) - start)
    }

    #[inline]
    pub fn decls(&self, range: DeclRange) -> &[Declarator] {
        &self.decls[range.to_range()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = to_u32(self.params.len());
        self.params.extend(params);
        ParamRange::new(start, to_u32(self.params.len()) - start)
    }

    #[inline]
    pub fn params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.to_range()]
    }

    pub fn alloc_catches(
        &mut self,
        clauses: impl IntoIterator<Item = CatchClause>,
    ) -> CatchRange {
        let start = to_u32(self.catches.len());
        self.catches.extend(clauses);
        CatchRange::new(start, to_u32(self.catches.len()) - start)
    }

    #[inline]
    pub fn catches(&self, range: CatchRange) -> &[CatchClause] {
        &self.catches[range.to_range()]
    }

    // ===== Checked list access =====
    //
    // Used on trees that did not come from the parser.

    pub fn try_expr_list(&self, range: ExprRange) -> Option<&[ExprId]> {
        self.expr_lists.get(range.to_range())
    }

    pub fn try_stmt_list(&self, range: StmtRange) -> Option<&[StmtId]> {
        self.stmt_lists.get(range.to_range())
    }

    pub fn try_props(&self, range: PropRange) -> Option<&[Property]> {
        self.props.get(range.to_range())
    }

    pub fn try_decls(&self, range: DeclRange) -> Option<&[Declarator]> {
        self.decls.get(range.to_range())
    }

    pub fn try_params(&self, range: ParamRange) -> Option<&[Name]> {
        self.params.get(range.to_range())
    }

    pub fn try_catches(&self, range: CatchRange) -> Option<&[CatchClause]> {
        self.catches.get(range.to_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CatchKind, ExprKind, StmtKind};
    use crate::Span;

    #[test]
    fn lists_are_contiguous() {
        let mut ast = Ast::new();
        let a = ast.alloc_expr(Expr::new(ExprKind::Null, Span::new(0, 4)));
        let b = ast.alloc_expr(Expr::new(ExprKind::This, Span::new(5, 9)));
        let first = ast.alloc_expr_list([a]);
        let second = ast.alloc_expr_list([a, b]);

        assert_eq!(ast.expr_list(first), &[a]);
        assert_eq!(ast.expr_list(second), &[a, b]);
        assert_eq!(second.start, 1);
        assert_eq!(ast.expr(b).kind, ExprKind::This);
    }

    #[test]
    fn checked_access_rejects_foreign_ids() {
        let mut ast = Ast::new();
        assert!(ast.try_expr(ExprId::new(0)).is_none());
        assert!(ast.try_stmt(StmtId::INVALID).is_none());
        assert!(ast.try_catches(CatchRange::new(0, 1)).is_none());

        let s = ast.alloc_stmt(Stmt::new(StmtKind::Empty, Span::new(0, 1)));
        let body = ast.alloc_stmt_list([s]);
        let range = ast.alloc_catches([CatchClause {
            kind: CatchKind::Default { param: None },
            body,
            span: Span::new(0, 1),
        }]);
        assert_eq!(ast.try_catches(range).map(<[CatchClause]>::len), Some(1));
    }
}

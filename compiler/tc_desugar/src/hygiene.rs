//! Fresh names for the synthetic catch parameter and boxing slot.

use rustc_hash::FxHashSet;
use tc_ir::visitor::{walk_expr, walk_stmt, walk_try, Visitor};
use tc_ir::{Ast, Expr, Name, Program, Stmt, StringInterner, TryStmt};
use tc_stack::ensure_sufficient_stack;

/// Every identifier mentioned anywhere inside one try statement.
struct NameCollector {
    names: FxHashSet<Name>,
}

impl<'ast> Visitor<'ast> for NameCollector {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_stmt(self, stmt, ast));
    }

    fn visit_expr(&mut self, expr: &'ast Expr, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_expr(self, expr, ast));
    }

    fn visit_name(&mut self, name: Name) {
        self.names.insert(name);
    }
}

/// The two names a lowered try statement introduces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SyntheticNames {
    pub error: Name,
    pub caught: Name,
}

/// Pick names for `try_stmt` that collide with nothing it already uses
/// and with `reserved`.
pub(crate) fn fresh_names(
    try_stmt: &TryStmt,
    ast: &Ast,
    interner: &StringInterner,
    error_base: &str,
    caught_base: &str,
    reserved: Option<Name>,
) -> SyntheticNames {
    let mut collector = NameCollector {
        names: FxHashSet::default(),
    };
    walk_try(&mut collector, try_stmt, ast);
    let mut taken = collector.names;
    taken.extend(reserved);

    let error = fresh(error_base, &taken, interner);
    taken.insert(error);
    let caught = fresh(caught_base, &taken, interner);
    SyntheticNames { error, caught }
}

/// A name used nowhere in `program`.
pub(crate) fn fresh_program_name(
    program: &Program,
    ast: &Ast,
    interner: &StringInterner,
    base: &str,
) -> Name {
    let mut collector = NameCollector {
        names: FxHashSet::default(),
    };
    collector.visit_program(program, ast);
    fresh(base, &collector.names, interner)
}

/// `base`, or `base1`, `base2`, ... whichever is first free.
fn fresh(base: &str, taken: &FxHashSet<Name>, interner: &StringInterner) -> Name {
    let name = interner.intern(base);
    if !taken.contains(&name) {
        return name;
    }
    (1u32..)
        .map(|n| interner.intern(&format!("{base}{n}")))
        .find(|name| !taken.contains(name))
        .unwrap_or(name)
}

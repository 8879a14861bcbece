//! Tree walker that renders statements and expressions to an [`Emitter`].

mod expr;
mod stmt;

use tc_ir::{Ast, ExprId, Name, Program, StringLookup};

use crate::Emitter;

pub(crate) struct Printer<'a, I: StringLookup + ?Sized, E: Emitter> {
    ast: &'a Ast,
    interner: &'a I,
    emitter: &'a mut E,
    level: usize,
    /// Inside a C-style `for` head, where a bare `in` would be misread.
    no_in: bool,
}

impl<'a, I: StringLookup + ?Sized, E: Emitter> Printer<'a, I, E> {
    pub(crate) fn new(ast: &'a Ast, interner: &'a I, emitter: &'a mut E) -> Self {
        Printer {
            ast,
            interner,
            emitter,
            level: 0,
            no_in: false,
        }
    }

    pub(crate) fn program(&mut self, program: &Program) {
        let ast = self.ast;
        for &id in ast.stmt_list(program.body) {
            self.stmt_line(id);
        }
    }

    pub(crate) fn expr_root(&mut self, id: ExprId) {
        self.expr(id, expr::Prec::SEQUENCE);
    }

    fn emit(&mut self, text: &str) {
        self.emitter.emit(text);
    }

    fn name(&mut self, name: Name) {
        let interner = self.interner;
        self.emitter.emit(interner.lookup(name));
    }

    /// Run `f` with `in` allowed again (inside brackets and bodies).
    fn with_in(&mut self, f: impl FnOnce(&mut Self)) {
        let saved = std::mem::replace(&mut self.no_in, false);
        f(self);
        self.no_in = saved;
    }

    fn comma_separated<T: Copy>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, T)) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }
}

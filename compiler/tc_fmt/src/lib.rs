//! Source printer for the typed catch syntax tree.
//!
//! Prints any [`Ast`] back to source text: the extended tree straight from
//! the parser (typed catch clauses print as `catch (e: Spec) { ... }`) or
//! a lowered tree from the desugarer.
//!
//! Layout is fixed: one statement per line, braces on the same line,
//! semicolons always written. Parentheses come from operator precedence,
//! so the output parses back to the same tree.
//!
//! # Modules
//!
//! - [`emitter`]: output abstraction
//! - `printer`: statement and expression rendering
//! - `literal`: number and string literal text

pub mod emitter;
mod literal;
mod printer;

pub use emitter::{Emitter, StringEmitter};

use tc_ir::{Ast, ExprId, Program, StringLookup};

use printer::Printer;

/// Spaces per indentation level unless configured otherwise.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Printer configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrintOptions {
    pub indent_width: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Print a whole program, one top-level statement per line.
pub fn print_program<I: StringLookup + ?Sized>(
    program: &Program,
    ast: &Ast,
    interner: &I,
    options: &PrintOptions,
) -> String {
    let mut emitter = StringEmitter::new(options.indent_width);
    Printer::new(ast, interner, &mut emitter).program(program);
    emitter.output()
}

/// Print a single expression.
pub fn print_expr<I: StringLookup + ?Sized>(id: ExprId, ast: &Ast, interner: &I) -> String {
    let mut emitter = StringEmitter::default();
    Printer::new(ast, interner, &mut emitter).expr_root(id);
    emitter.output()
}

#[cfg(test)]
mod tests;

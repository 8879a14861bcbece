//! Recursive descent parser for the host language subset, extended with
//! typed catch clauses.
//!
//! Produces a flat [`Ast`] plus the [`Program`] root. Errors are collected,
//! not thrown: the parser recovers at statement boundaries and keeps going,
//! so `ParseOutput::errors` lists every syntax error in the file.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use recovery::{synchronize, TokenSet};

use tc_ir::{
    Ast, Expr, ExprId, ExprKind, GrammarMode, Name, Program, Span, Stmt, StmtId, StmtKind,
    StringInterner, TokenList,
};

/// Parser configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: GrammarMode,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions {
            grammar: GrammarMode::Strict,
        }
    }
}

/// Result of parsing one source file.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub ast: Ast,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    ast: Ast,
    errors: Vec<ParseError>,
    options: ParseOptions,
    /// `in` is a binary operator here (false inside a `for` head).
    allow_in: bool,
    /// Contextual keyword `of`.
    of_name: Name,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner, options: ParseOptions) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            ast: Ast::with_capacity(tokens.len() * 3),
            errors: Vec::new(),
            options,
            allow_in: true,
            of_name: interner.intern("of"),
        }
    }

    /// Parse a whole program.
    pub fn parse_program(mut self) -> ParseOutput {
        let start = self.cursor.current_span();
        let mut body = smallvec::SmallVec::<[StmtId; 16]>::new();

        while !self.cursor.is_at_end() {
            body.push(self.parse_statement_or_recover());
        }

        let span = start.merge(self.cursor.current_span());
        let body = self.ast.alloc_stmt_list(body);
        tracing::debug!(
            statements = body.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        ParseOutput {
            program: Program { body, span },
            ast: self.ast,
            errors: self.errors,
        }
    }

    #[inline]
    fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.ast.alloc_expr(Expr::new(kind, span))
    }

    #[inline]
    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.ast.alloc_stmt(Stmt::new(kind, span))
    }

    #[inline]
    fn expr_span(&self, id: ExprId) -> Span {
        self.ast.expr(id).span
    }

    /// Record an error that does not stop the current production.
    #[cold]
    fn report(&mut self, error: ParseError) {
        tracing::trace!(code = %error.code, span = %error.span, "syntax error");
        self.errors.push(error);
    }
}

/// Parse a token list.
pub fn parse(tokens: &TokenList, interner: &StringInterner, options: &ParseOptions) -> ParseOutput {
    Parser::new(tokens, interner, *options).parse_program()
}

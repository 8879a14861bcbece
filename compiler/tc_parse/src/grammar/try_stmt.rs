//! Try statements with typed catch clauses.
//!
//! ```text
//! TryStatement := try Block CatchClause* Finally?
//! CatchClause  := catch ( Ident : LeftHandSideExpression ) Block   typed
//!               | catch ( Ident ) Block                            default
//!               | catch Block                                      default
//! Finally      := finally Block
//! ```
//!
//! Ordering problems (typed after default, two defaults, no handler) are
//! reported without abandoning the statement, so the rest of the clause
//! list is still checked.

use smallvec::SmallVec;
use tc_ir::{CatchClause, CatchKind, GrammarMode, Span, StmtId, StmtKind, TokenKind, TryStmt};
use tracing::{debug, trace};

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_try(&mut self) -> Result<StmtId, ParseError> {
        let try_span = self.cursor.advance().span;
        let block = self.parse_block_body()?;

        let mut clauses = SmallVec::<[CatchClause; 4]>::new();
        let mut default_span: Option<Span> = None;
        let mut saw_catch = false;

        while self.cursor.check(&TokenKind::Catch) {
            saw_catch = true;
            let Some(clause) = self.parse_catch_clause()? else {
                continue;
            };
            match (clause.is_default(), default_span) {
                (false, Some(default_span)) => self.report(
                    ParseError::from_kind(
                        ParseErrorKind::TypedCatchAfterDefault { default_span },
                        clause.span,
                    )
                    .with_context("this clause can never run"),
                ),
                (true, Some(first_span)) => self.report(ParseError::from_kind(
                    ParseErrorKind::DuplicateDefaultCatch { first_span },
                    clause.span,
                )),
                (true, None) => default_span = Some(clause.span),
                (false, None) => {}
            }
            clauses.push(clause);
        }

        let finalizer = if self.cursor.eat(&TokenKind::Finally) {
            Some(self.parse_block_body()?)
        } else {
            None
        };

        if !saw_catch && finalizer.is_none() {
            self.report(ParseError::from_kind(
                ParseErrorKind::MissingCatchOrFinally,
                try_span,
            ));
        }

        let has_typed = clauses.iter().any(CatchClause::is_typed);
        if self.options.grammar == GrammarMode::Strict && has_typed && default_span.is_none() {
            let last = clauses.last().map_or(try_span, |c| c.span);
            self.report(ParseError::from_kind(
                ParseErrorKind::MissingDefaultCatch,
                last,
            ));
        }

        debug!(
            typed = clauses.iter().filter(|c| c.is_typed()).count(),
            default = default_span.is_some(),
            finally = finalizer.is_some(),
            "try statement"
        );

        let handlers = self.ast.alloc_catches(clauses);
        Ok(self.alloc_stmt(
            StmtKind::Try(TryStmt {
                block,
                handlers,
                finalizer,
            }),
            try_span.merge(self.cursor.previous_span()),
        ))
    }

    /// Parse one clause. A malformed parameter list is reported and
    /// skipped, and the clause dropped, so the body still parses.
    fn parse_catch_clause(&mut self) -> Result<Option<CatchClause>, ParseError> {
        let start = self.cursor.advance().span;

        // `catch { ... }`
        if self.cursor.check(&TokenKind::LBrace) {
            trace!("default catch without binding");
            let body = self.parse_block_body()?;
            return Ok(Some(CatchClause {
                kind: CatchKind::Default { param: None },
                body,
                span: start.merge(self.cursor.previous_span()),
            }));
        }

        if !self.cursor.eat(&TokenKind::LParen) {
            return Err(self.malformed_parameter());
        }
        let kind = match self.parse_catch_parameter() {
            Ok(kind) => Some(kind),
            Err(error) => {
                self.report(error);
                self.skip_past_close_paren();
                None
            }
        };

        let body = self.parse_block_body()?;
        Ok(kind.map(|kind| CatchClause {
            kind,
            body,
            span: start.merge(self.cursor.previous_span()),
        }))
    }

    /// `name )` or `name : Specifier )`, after the opening paren.
    fn parse_catch_parameter(&mut self) -> Result<CatchKind, ParseError> {
        let TokenKind::Ident(param) = self.cursor.current_kind() else {
            return Err(self.malformed_parameter());
        };
        self.cursor.advance();

        let kind = if self.cursor.eat(&TokenKind::Colon) {
            if !self.cursor.current_kind().can_start_expr() {
                let found = self.cursor.current_kind();
                return Err(ParseError::from_kind(
                    ParseErrorKind::MissingTypeSpecifier { found },
                    self.cursor.current_span(),
                ));
            }
            let specifier = self.parse_lhs_expression()?;
            trace!("typed catch");
            CatchKind::Typed { param, specifier }
        } else {
            trace!("default catch");
            CatchKind::Default { param: Some(param) }
        };

        if self.cursor.eat(&TokenKind::RParen) {
            Ok(kind)
        } else {
            Err(self.malformed_parameter())
        }
    }

    /// Skip to the `)` closing the current parameter list and consume it.
    fn skip_past_close_paren(&mut self) {
        let mut depth = 0usize;
        while !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::RParen => depth -= 1,
                _ => {}
            }
            self.cursor.advance();
        }
    }

    #[cold]
    fn malformed_parameter(&self) -> ParseError {
        if self.cursor.is_at_end() {
            return self.cursor.unexpected("a catch parameter");
        }
        ParseError::from_kind(
            ParseErrorKind::MalformedCatchParameter {
                found: self.cursor.current_kind(),
            },
            self.cursor.current_span(),
        )
    }

    /// `catch`/`finally` with no `try` in front. The clause is parsed so
    /// recovery resumes after it rather than inside it.
    pub(crate) fn parse_stray_handler(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        let error = self
            .cursor
            .unexpected("a statement")
            .with_context("no `try` before this clause");

        if self.cursor.check(&TokenKind::Catch) {
            self.parse_catch_clause()?;
        } else {
            self.cursor.advance();
            self.parse_block_body()?;
        }

        self.report(error);
        Ok(self.alloc_stmt(StmtKind::Error, start.merge(self.cursor.previous_span())))
    }
}

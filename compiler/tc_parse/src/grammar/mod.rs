//! Grammar productions, split by construct.
//!
//! - `stmt.rs`: statements, blocks, semicolon insertion
//! - `try_stmt.rs`: the extended try statement and its catch clauses
//! - `expr.rs`: expressions from sequence down to primary
//! - `operators.rs`: token to operator matching

mod expr;
mod operators;
mod stmt;
mod try_stmt;

use crate::recovery::{synchronize, STMT_RECOVERY};
use crate::{ParseError, Parser};
use tc_ir::{StmtId, StmtKind, TokenKind};

impl Parser<'_> {
    /// Parse a statement; on failure record the error, skip to the next
    /// statement boundary and return an error node.
    pub(crate) fn parse_statement_or_recover(&mut self) -> StmtId {
        let start_pos = self.cursor.position();
        let start_span = self.cursor.current_span();
        match self.parse_statement() {
            Ok(id) => id,
            Err(error) => {
                self.report(error);
                self.recover(start_pos);
                let span = start_span.merge(self.cursor.previous_span());
                self.alloc_stmt(StmtKind::Error, span)
            }
        }
    }

    /// Skip to a statement boundary, always making progress.
    fn recover(&mut self, start_pos: usize) {
        if self.cursor.position() == start_pos {
            self.cursor.advance();
        }
        synchronize(&mut self.cursor, STMT_RECOVERY);
        self.cursor.eat(&TokenKind::Semicolon);
    }

    /// Automatic semicolon insertion: accept `;`, or nothing before `}`, at
    /// end of input, or at a line break.
    pub(crate) fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(&TokenKind::Semicolon)
            || self.cursor.check(&TokenKind::RBrace)
            || self.cursor.is_at_end()
            || self.cursor.has_newline_before()
        {
            Ok(())
        } else {
            Err(self.cursor.unexpected("`;`"))
        }
    }

    /// No semicolon would be inserted here: a restricted production such as
    /// `return` may take an operand.
    pub(crate) fn operand_follows(&self) -> bool {
        !(self.cursor.check(&TokenKind::Semicolon)
            || self.cursor.check(&TokenKind::RBrace)
            || self.cursor.is_at_end()
            || self.cursor.has_newline_before())
    }
}

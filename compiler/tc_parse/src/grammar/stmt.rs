//! Statement parsing.

use smallvec::SmallVec;
use tc_ir::{
    Declarator, DeclRange, ExprId, ForEachKind, ForInit, Name, ParamRange, Span, StmtId,
    StmtKind, StmtRange, TokenKind, VarKind,
};
use tc_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.current_span();
        trace!(token = ?self.cursor.current_kind(), "statement");

        match self.cursor.current_kind() {
            TokenKind::LBrace => {
                let body = self.parse_block_body()?;
                Ok(self.alloc_stmt(StmtKind::Block(body), start.merge(self.cursor.previous_span())))
            }
            TokenKind::Semicolon => {
                self.cursor.advance();
                Ok(self.alloc_stmt(StmtKind::Empty, start))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let (kind, decls) = self.parse_var_decl()?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(
                    StmtKind::VarDecl { kind, decls },
                    start.merge(self.cursor.previous_span()),
                ))
            }
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => {
                self.cursor.advance();
                let test = self.parse_paren_expr()?;
                let body = self.parse_statement()?;
                Ok(self.alloc_stmt(
                    StmtKind::While { test, body },
                    start.merge(self.cursor.previous_span()),
                ))
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.parse_statement()?;
                self.cursor.expect(&TokenKind::While, "`while` after do-while body")?;
                let test = self.parse_paren_expr()?;
                // `do ; while (x) foo()` is legal without a separator.
                self.cursor.eat(&TokenKind::Semicolon);
                Ok(self.alloc_stmt(
                    StmtKind::DoWhile { body, test },
                    start.merge(self.cursor.previous_span()),
                ))
            }
            TokenKind::For => self.parse_for(),
            TokenKind::Return => {
                self.cursor.advance();
                let argument = if self.operand_follows() {
                    self.parse_expression()?
                } else {
                    ExprId::INVALID
                };
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(
                    StmtKind::Return(argument),
                    start.merge(self.cursor.previous_span()),
                ))
            }
            TokenKind::Throw => {
                self.cursor.advance();
                if self.cursor.has_newline_before() {
                    return Err(ParseError::from_kind(
                        ParseErrorKind::NewlineAfterThrow,
                        start,
                    ));
                }
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(
                    StmtKind::Throw(argument),
                    start.merge(self.cursor.previous_span()),
                ))
            }
            TokenKind::Break | TokenKind::Continue => {
                let kind = if self.cursor.advance().kind == TokenKind::Break {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                };
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(kind, start.merge(self.cursor.previous_span())))
            }
            TokenKind::Try => self.parse_try(),
            TokenKind::Catch | TokenKind::Finally => self.parse_stray_handler(),
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(self.alloc_stmt(StmtKind::Expr(expr), start.merge(self.cursor.previous_span())))
            }
        }
    }

    /// Parse `{ statements }`, returning the statement list.
    pub(crate) fn parse_block_body(&mut self) -> Result<StmtRange, ParseError> {
        self.with_in(Self::parse_block_body_inner)
    }

    fn parse_block_body_inner(&mut self) -> Result<StmtRange, ParseError> {
        let open = self.cursor.expect(&TokenKind::LBrace, "`{`")?;
        let mut stmts = SmallVec::<[StmtId; 8]>::new();

        while !self.cursor.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::from_kind(
                    ParseErrorKind::UnclosedDelimiter {
                        open: TokenKind::LBrace,
                        open_span: open.span,
                    },
                    self.cursor.current_span(),
                ));
            }
            stmts.push(self.parse_statement_or_recover());
        }
        self.cursor.advance();

        Ok(self.ast.alloc_stmt_list(stmts))
    }

    fn parse_var_kind(&mut self) -> Result<VarKind, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Var => {
                self.cursor.advance();
                Ok(VarKind::Var)
            }
            TokenKind::Let => {
                self.cursor.advance();
                Ok(VarKind::Let)
            }
            TokenKind::Const => {
                self.cursor.advance();
                Ok(VarKind::Const)
            }
            _ => Err(self.cursor.unexpected("`var`, `let` or `const`")),
        }
    }

    /// `var a = 1, b` without the terminating semicolon.
    fn parse_var_decl(&mut self) -> Result<(VarKind, DeclRange), ParseError> {
        let kind = self.parse_var_kind()?;
        let decls = self.parse_declarators()?;
        Ok((kind, decls))
    }

    fn parse_declarators(&mut self) -> Result<DeclRange, ParseError> {
        let mut decls = SmallVec::<[Declarator; 4]>::new();
        loop {
            let (name, name_span) = self.cursor.expect_ident("a variable name")?;
            let init = if self.cursor.eat(&TokenKind::Eq) {
                self.parse_assignment()?
            } else {
                ExprId::INVALID
            };
            let span = if init.is_valid() {
                name_span.merge(self.expr_span(init))
            } else {
                name_span
            };
            decls.push(Declarator { name, init, span });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(self.ast.alloc_decls(decls))
    }

    fn parse_function_decl(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, _) = self.cursor.expect_ident("a function name")?;
        let (params, body) = self.parse_function_rest()?;
        Ok(self.alloc_stmt(
            StmtKind::Function { name, params, body },
            start.merge(self.cursor.previous_span()),
        ))
    }

    /// `(params) { body }` of a function declaration or expression.
    pub(crate) fn parse_function_rest(&mut self) -> Result<(ParamRange, StmtRange), ParseError> {
        let params = self.parse_params()?;
        let body = self.parse_block_body()?;
        Ok((params, body))
    }

    /// `(a, b, c)` with an optional trailing comma.
    pub(crate) fn parse_params(&mut self) -> Result<ParamRange, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen, "`(`")?;
        let mut params = SmallVec::<[Name; 4]>::new();
        while !self.cursor.check(&TokenKind::RParen) {
            if self.cursor.is_at_end() {
                return Err(ParseError::from_kind(
                    ParseErrorKind::UnclosedDelimiter {
                        open: TokenKind::LParen,
                        open_span: open.span,
                    },
                    self.cursor.current_span(),
                ));
            }
            let (name, _) = self.cursor.expect_ident("a parameter name")?;
            params.push(name);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen, "`)` after parameters")?;
        Ok(self.ast.alloc_params(params))
    }

    fn parse_if(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        let test = self.parse_paren_expr()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.cursor.eat(&TokenKind::Else) {
            self.parse_statement()?
        } else {
            StmtId::INVALID
        };
        Ok(self.alloc_stmt(
            StmtKind::If {
                test,
                consequent,
                alternate,
            },
            start.merge(self.cursor.previous_span()),
        ))
    }

    /// `( expression )` as in `if`, `while`.
    fn parse_paren_expr(&mut self) -> Result<ExprId, ParseError> {
        self.cursor.expect(&TokenKind::LParen, "`(`")?;
        let expr = self.parse_expression()?;
        self.cursor.expect(&TokenKind::RParen, "`)`")?;
        Ok(expr)
    }

    fn parse_for(&mut self) -> Result<StmtId, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::LParen, "`(` after `for`")?;

        // `for (let x of xs)` / `for (x in obj)`
        let decl_offset = usize::from(matches!(
            self.cursor.current_kind(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ));
        if matches!(self.cursor.peek_kind_at(decl_offset), TokenKind::Ident(_)) {
            if let Some(kind) = self.for_each_kind_at(decl_offset + 1) {
                return self.parse_for_each(start, kind);
            }
        }

        let init = match self.cursor.current_kind() {
            TokenKind::Semicolon => ForInit::None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let (kind, decls) = self.without_in(Self::parse_var_decl)?;
                ForInit::VarDecl { kind, decls }
            }
            _ => ForInit::Expr(self.without_in(Self::parse_expression)?),
        };
        self.cursor.expect(&TokenKind::Semicolon, "`;` after for-loop initializer")?;

        let test = if self.cursor.check(&TokenKind::Semicolon) {
            ExprId::INVALID
        } else {
            self.parse_expression()?
        };
        self.cursor.expect(&TokenKind::Semicolon, "`;` after for-loop condition")?;

        let update = if self.cursor.check(&TokenKind::RParen) {
            ExprId::INVALID
        } else {
            self.parse_expression()?
        };
        self.cursor.expect(&TokenKind::RParen, "`)` after for-loop header")?;

        let body = self.parse_statement()?;
        Ok(self.alloc_stmt(
            StmtKind::For {
                init,
                test,
                update,
                body,
            },
            start.merge(self.cursor.previous_span()),
        ))
    }

    fn for_each_kind_at(&self, offset: usize) -> Option<ForEachKind> {
        match self.cursor.peek_kind_at(offset) {
            TokenKind::In => Some(ForEachKind::In),
            TokenKind::Ident(name) if name == self.of_name => Some(ForEachKind::Of),
            _ => None,
        }
    }

    fn parse_for_each(&mut self, start: Span, kind: ForEachKind) -> Result<StmtId, ParseError> {
        let decl = if matches!(self.cursor.current_kind(), TokenKind::Ident(_)) {
            None
        } else {
            Some(self.parse_var_kind()?)
        };
        let (binding, _) = self.cursor.expect_ident("a loop variable")?;
        self.cursor.advance(); // `of` / `in`

        let iterable = match kind {
            ForEachKind::Of => self.parse_assignment()?,
            ForEachKind::In => self.parse_expression()?,
        };
        self.cursor.expect(&TokenKind::RParen, "`)` after for-loop header")?;

        let body = self.parse_statement()?;
        Ok(self.alloc_stmt(
            StmtKind::ForEach {
                kind,
                decl,
                binding,
                iterable,
                body,
            },
            start.merge(self.cursor.previous_span()),
        ))
    }

    /// Run `f` with `in` disabled as a binary operator.
    fn without_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.allow_in, false);
        let result = f(self);
        self.allow_in = saved;
        result
    }

    /// Run `f` with `in` enabled again, inside brackets and bodies.
    pub(crate) fn with_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.allow_in, true);
        let result = f(self);
        self.allow_in = saved;
        result
    }
}

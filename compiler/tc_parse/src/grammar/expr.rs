//! Expression parsing.
//!
//! Layers, loosest first: sequence, assignment (and arrows), conditional,
//! binary operators by precedence, unary, postfix update, left-hand-side
//! (`new`, calls, member access), primary.

use smallvec::SmallVec;
use tc_ir::{
    ArrowBody, ExprId, ExprKind, ExprRange, PropKey, Property, Span, TokenKind,
};
use tc_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseErrorKind, Parser};

/// Loosest binary precedence level (`??`).
const LOWEST_BINARY: u8 = 12;

impl Parser<'_> {
    /// `Expression`: assignments joined by commas.
    pub(crate) fn parse_expression(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_assignment()?;
        if !self.cursor.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut items = SmallVec::<[ExprId; 4]>::new();
        items.push(first);
        while self.cursor.eat(&TokenKind::Comma) {
            items.push(self.parse_assignment()?);
        }
        let span = self.expr_span(first).merge(self.cursor.previous_span());
        let items = self.ast.alloc_expr_list(items);
        Ok(self.alloc_expr(ExprKind::Sequence(items), span))
    }

    /// `AssignmentExpression`, including arrow functions.
    pub(crate) fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> Result<ExprId, ParseError> {
        if self.is_arrow_ahead() {
            return self.parse_arrow();
        }

        let target = self.parse_conditional()?;
        let Some(op) = self.match_assign_op() else {
            return Ok(target);
        };

        let target_span = self.expr_span(target);
        if !self.ast.expr(target).kind.is_assignment_target() {
            return Err(ParseError::from_kind(
                ParseErrorKind::InvalidAssignmentTarget,
                target_span,
            ));
        }
        self.cursor.advance();
        let value = self.parse_assignment()?;
        let span = target_span.merge(self.expr_span(value));
        Ok(self.alloc_expr(ExprKind::Assign { op, target, value }, span))
    }

    fn parse_conditional(&mut self) -> Result<ExprId, ParseError> {
        let test = self.parse_binary(LOWEST_BINARY)?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.with_in(Self::parse_assignment)?;
        self.cursor.expect(&TokenKind::Colon, "`:` in conditional expression")?;
        let alternate = self.parse_assignment()?;
        let span = self.expr_span(test).merge(self.expr_span(alternate));
        Ok(self.alloc_expr(
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            },
            span,
        ))
    }

    /// Binary operators whose precedence level is at most `max_level`
    /// (lower levels bind tighter).
    fn parse_binary(&mut self, max_level: u8) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_binary_op() {
            let level = op.precedence();
            if level > max_level {
                break;
            }
            self.cursor.advance();
            let right = if op.is_right_assoc() {
                self.parse_binary(level)?
            } else {
                self.parse_binary(level - 1)?
            };
            let span = self.expr_span(left).merge(self.expr_span(right));
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.current_span();

        if let Some(op) = self.match_unary_op() {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(self.expr_span(operand));
            return Ok(self.alloc_expr(ExprKind::Unary { op, operand }, span));
        }

        if let Some(op) = self.match_update_op() {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            self.check_update_target(operand)?;
            let span = start.merge(self.expr_span(operand));
            return Ok(self.alloc_expr(
                ExprKind::Update {
                    op,
                    prefix: true,
                    operand,
                },
                span,
            ));
        }

        let operand = self.parse_lhs_expression()?;
        // A line break before `++` starts a new statement.
        if self.cursor.has_newline_before() {
            return Ok(operand);
        }
        let Some(op) = self.match_update_op() else {
            return Ok(operand);
        };
        self.check_update_target(operand)?;
        self.cursor.advance();
        let span = self.expr_span(operand).merge(self.cursor.previous_span());
        Ok(self.alloc_expr(
            ExprKind::Update {
                op,
                prefix: false,
                operand,
            },
            span,
        ))
    }

    fn check_update_target(&self, operand: ExprId) -> Result<(), ParseError> {
        if self.ast.expr(operand).kind.is_assignment_target() {
            Ok(())
        } else {
            Err(ParseError::from_kind(
                ParseErrorKind::InvalidAssignmentTarget,
                self.expr_span(operand),
            ))
        }
    }

    /// `LeftHandSideExpression`: `new`, calls, `.name` and `[index]` on a
    /// primary expression. Catch type specifiers use this production.
    pub(crate) fn parse_lhs_expression(&mut self) -> Result<ExprId, ParseError> {
        let base = if self.cursor.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_member_suffixes(base, true)
    }

    fn parse_new(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let callee = if self.cursor.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        let callee = self.parse_member_suffixes(callee, false)?;
        let args = if self.cursor.check(&TokenKind::LParen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc_expr(ExprKind::New { callee, args }, span))
    }

    /// Member, index and (when `allow_call`) call suffixes.
    fn parse_member_suffixes(
        &mut self,
        mut expr: ExprId,
        allow_call: bool,
    ) -> Result<ExprId, ParseError> {
        loop {
            let kind = match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let (property, _) = self.cursor.expect_property_name()?;
                    ExprKind::Member {
                        object: expr,
                        property,
                    }
                }
                TokenKind::LBracket => {
                    let open = self.cursor.advance();
                    let index = self.with_in(Self::parse_expression)?;
                    self.expect_closing(&TokenKind::RBracket, "`]`", open.kind, open.span)?;
                    ExprKind::Index {
                        object: expr,
                        index,
                    }
                }
                TokenKind::LParen if allow_call => {
                    let args = self.parse_arguments()?;
                    ExprKind::Call { callee: expr, args }
                }
                _ => return Ok(expr),
            };
            let span = self.expr_span(expr).merge(self.cursor.previous_span());
            expr = self.alloc_expr(kind, span);
        }
    }

    /// `( args )` with an optional trailing comma.
    fn parse_arguments(&mut self) -> Result<ExprRange, ParseError> {
        let open = self.cursor.expect(&TokenKind::LParen, "`(`")?;
        let mut args = SmallVec::<[ExprId; 4]>::new();
        while !self.cursor.check(&TokenKind::RParen) && !self.cursor.is_at_end() {
            args.push(self.with_in(Self::parse_assignment)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RParen, "`)` after arguments", open.kind, open.span)?;
        Ok(self.ast.alloc_expr_list(args))
    }

    /// Expect a closing delimiter, reporting the opener if input ran out.
    fn expect_closing(
        &mut self,
        close: &TokenKind,
        expected: &'static str,
        open: TokenKind,
        open_span: Span,
    ) -> Result<(), ParseError> {
        if self.cursor.eat(close) {
            Ok(())
        } else if self.cursor.is_at_end() {
            Err(ParseError::from_kind(
                ParseErrorKind::UnclosedDelimiter { open, open_span },
                self.cursor.current_span(),
            ))
        } else {
            Err(self.cursor.unexpected(expected))
        }
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Number(bits) => ExprKind::Number(bits),
            TokenKind::String(name) => ExprKind::String(name),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::This => ExprKind::This,
            // Already reported by the lexer.
            TokenKind::Error => ExprKind::Error,
            TokenKind::Function => return self.parse_function_expr(),
            TokenKind::LParen => return self.parse_parenthesized(),
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_object(),
            TokenKind::Eof => return Err(self.cursor.unexpected("an expression")),
            found => {
                return Err(ParseError::from_kind(
                    ParseErrorKind::ExpectedExpression { found },
                    token.span,
                ))
            }
        };
        self.cursor.advance();
        Ok(self.alloc_expr(kind, token.span))
    }

    fn parse_parenthesized(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance();
        let inner = self.with_in(Self::parse_expression)?;
        self.expect_closing(&TokenKind::RParen, "`)`", open.kind, open.span)?;
        Ok(inner)
    }

    fn parse_function_expr(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let name = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Some(name)
            }
            _ => None,
        };
        let (params, body) = self.parse_function_rest()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc_expr(ExprKind::Function { name, params, body }, span))
    }

    /// `x =>` or `( ... ) =>` at the cursor. Scans tokens only.
    fn is_arrow_ahead(&self) -> bool {
        match self.cursor.current_kind() {
            TokenKind::Ident(_) => self.cursor.peek_kind_at(1) == TokenKind::Arrow,
            TokenKind::LParen => {
                let mut depth = 0usize;
                let mut offset = 0;
                loop {
                    match self.cursor.peek_kind_at(offset) {
                        TokenKind::LParen => depth += 1,
                        TokenKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return self.cursor.peek_kind_at(offset + 1) == TokenKind::Arrow;
                            }
                        }
                        TokenKind::Eof => return false,
                        _ => {}
                    }
                    offset += 1;
                }
            }
            _ => false,
        }
    }

    fn parse_arrow(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.current_span();
        let params = if let TokenKind::Ident(name) = self.cursor.current_kind() {
            self.cursor.advance();
            self.ast.alloc_params([name])
        } else {
            self.parse_params()?
        };
        self.cursor.expect(&TokenKind::Arrow, "`=>`")?;
        let body = if self.cursor.check(&TokenKind::LBrace) {
            ArrowBody::Block(self.parse_block_body()?)
        } else {
            ArrowBody::Expr(self.parse_assignment()?)
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc_expr(ExprKind::Arrow { params, body }, span))
    }

    /// `[a, , b]`: elisions become `ExprId::INVALID`.
    fn parse_array(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance();
        let mut elements = SmallVec::<[ExprId; 8]>::new();
        while !self.cursor.check(&TokenKind::RBracket) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Comma) {
                elements.push(ExprId::INVALID);
                continue;
            }
            elements.push(self.with_in(Self::parse_assignment)?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RBracket, "`]`", open.kind, open.span)?;
        let span = open.span.merge(self.cursor.previous_span());
        let elements = self.ast.alloc_expr_list(elements);
        Ok(self.alloc_expr(ExprKind::Array(elements), span))
    }

    fn parse_object(&mut self) -> Result<ExprId, ParseError> {
        let open = self.cursor.advance();
        let mut props = SmallVec::<[Property; 4]>::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            props.push(self.parse_property()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&TokenKind::RBrace, "`}`", open.kind, open.span)?;
        let span = open.span.merge(self.cursor.previous_span());
        let props = self.ast.alloc_props(props);
        Ok(self.alloc_expr(ExprKind::Object(props), span))
    }

    fn parse_property(&mut self) -> Result<Property, ParseError> {
        let key_token = self.cursor.current();
        let key = match key_token.kind {
            TokenKind::String(name) => {
                self.cursor.advance();
                PropKey::String(name)
            }
            TokenKind::Number(bits) => {
                self.cursor.advance();
                PropKey::Number(bits)
            }
            _ => PropKey::Ident(self.cursor.expect_property_name()?.0),
        };

        if let (PropKey::Ident(name), TokenKind::Ident(_)) = (key, key_token.kind) {
            if !self.cursor.check(&TokenKind::Colon) {
                let value = self.alloc_expr(ExprKind::Ident(name), key_token.span);
                return Ok(Property {
                    key,
                    value,
                    shorthand: true,
                    span: key_token.span,
                });
            }
        }

        self.cursor.expect(&TokenKind::Colon, "`:` after property name")?;
        let value = self.with_in(Self::parse_assignment)?;
        Ok(Property {
            key,
            value,
            shorthand: false,
            span: key_token.span.merge(self.expr_span(value)),
        })
    }
}

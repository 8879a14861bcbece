//! Token cursor for navigating the token stream.

use crate::error::{ParseError, ParseErrorKind};
use tc_ir::{Name, Span, StringInterner, Token, TokenFlags, TokenKind, TokenList};

/// Cursor over a token list that always ends in `Eof`.
///
/// Checks go through the dense `tags` array so a kind test is one byte
/// compare, independent of payload.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    tags: &'a [u8],
    flags: &'a [TokenFlags],
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        debug_assert!(
            tokens
                .as_slice()
                .last()
                .is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor {
            tokens,
            tags: tokens.tags(),
            flags: tokens.flags(),
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position, for progress checks and snapshots.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// A line terminator separates the current token from the previous one.
    #[inline]
    pub fn has_newline_before(&self) -> bool {
        self.flags[self.pos].has_newline_before()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.tags[self.pos] == TokenKind::TAG_EOF
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.tags[self.pos] == kind.discriminant_index()
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        self.tags[self.pos] == TokenKind::TAG_IDENT
    }

    /// Current token is the identifier `name` (contextual keywords).
    pub fn check_name(&self, name: Name) -> bool {
        self.current_kind() == TokenKind::Ident(name)
    }

    /// Kind of the token `n` ahead; `Eof` past the end.
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Consume the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with `expected` as the description.
    pub fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consume an identifier, naming what it was for on failure.
    pub fn expect_ident(&mut self, context: &'static str) -> Result<(Name, Span), ParseError> {
        let token = self.current();
        if let TokenKind::Ident(name) = token.kind {
            self.advance();
            Ok((name, token.span))
        } else if self.is_at_end() {
            Err(self.unexpected("an identifier"))
        } else {
            Err(ParseError::from_kind(
                ParseErrorKind::ExpectedIdentifier {
                    found: token.kind,
                    context,
                },
                token.span,
            ))
        }
    }

    /// Identifier or keyword, as allowed after `.` and as an object key.
    pub fn expect_property_name(&mut self) -> Result<(Name, Span), ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((name, token.span))
            }
            kind => match kind.keyword_str() {
                Some(text) => {
                    self.advance();
                    Ok((self.interner.intern(text), token.span))
                }
                None => self.expect_ident("a property name"),
            },
        }
    }

    /// Error for the current token when `expected` was wanted.
    #[cold]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParseError::from_kind(ParseErrorKind::UnexpectedEof { expected }, token.span)
        } else {
            ParseError::from_kind(
                ParseErrorKind::UnexpectedToken {
                    found: token.kind,
                    expected,
                },
                token.span,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_lexer::lex;

    #[test]
    fn test_advance_stops_at_eof() {
        let interner = StringInterner::new();
        let tokens = lex("a", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        cursor.advance();
        assert!(cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_check_ignores_payload() {
        let interner = StringInterner::new();
        let tokens = lex("err", &interner).tokens;
        let cursor = Cursor::new(&tokens, &interner);
        assert!(cursor.check(&TokenKind::Ident(Name::EMPTY)));
        assert!(cursor.check_ident());
        assert!(cursor.check_name(interner.intern("err")));
        assert!(!cursor.check_name(interner.intern("e")));
    }

    #[test]
    fn test_expect_reports_found_token() {
        let interner = StringInterner::new();
        let tokens = lex("}", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        let err = cursor.expect(&TokenKind::RParen, "`)`");
        assert_eq!(
            err.map_err(|e| e.kind),
            Err(ParseErrorKind::UnexpectedToken {
                found: TokenKind::RBrace,
                expected: "`)`"
            })
        );
    }

    #[test]
    fn test_expect_at_eof() {
        let interner = StringInterner::new();
        let tokens = lex("", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        let err = cursor.expect(&TokenKind::RBrace, "`}`").map_err(|e| e.kind);
        assert_eq!(
            err,
            Err(ParseErrorKind::UnexpectedEof { expected: "`}`" })
        );
    }

    #[test]
    fn test_keyword_property_name() {
        let interner = StringInterner::new();
        let tokens = lex("catch", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        let name = cursor.expect_property_name().map(|(n, _)| n);
        assert_eq!(name, Ok(interner.intern("catch")));
    }

    #[test]
    fn test_newline_before() {
        let interner = StringInterner::new();
        let tokens = lex("a\nb", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        assert!(!cursor.has_newline_before());
        cursor.advance();
        assert!(cursor.has_newline_before());
        assert_eq!(cursor.peek_kind_at(5), TokenKind::Eof);
    }
}

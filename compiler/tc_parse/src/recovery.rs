//! Error recovery: token sets and synchronization.
//!
//! After a syntax error the parser skips to a token that can begin or end
//! a statement and carries on, so one run reports every error in a file.

use crate::cursor::Cursor;
use tc_ir::TokenKind;

const _: () = assert!(
    TokenKind::TAG_EOF < 128,
    "TokenSet is a u128 bitset; discriminant indices must be < 128"
);

/// Set of token kinds as a bitset over discriminant indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[must_use]
    #[allow(
        clippy::needless_pass_by_value,
        reason = "const fn builder API; by-value required for static init"
    )]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Keywords that begin a statement.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Var)
    .with(TokenKind::Let)
    .with(TokenKind::Const)
    .with(TokenKind::Function)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Do)
    .with(TokenKind::For)
    .with(TokenKind::Return)
    .with(TokenKind::Throw)
    .with(TokenKind::Break)
    .with(TokenKind::Continue)
    .with(TokenKind::Try);

/// Where statement-level recovery stops.
pub const STMT_RECOVERY: TokenSet = STMT_START
    .with(TokenKind::Semicolon)
    .with(TokenKind::RBrace);

/// Skip tokens until one in `recovery` or `Eof`.
///
/// Returns `true` if a recovery token was found.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> bool {
    while !cursor.is_at_end() {
        if recovery.contains(&cursor.current_kind()) {
            return true;
        }
        cursor.advance();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_ir::StringInterner;
    use tc_lexer::lex;

    #[test]
    fn test_contains_ignores_payload() {
        let set = TokenSet::new().with(TokenKind::Ident(tc_ir::Name::EMPTY));
        let interner = StringInterner::new();
        assert!(set.contains(&TokenKind::Ident(interner.intern("anything"))));
        assert!(!set.contains(&TokenKind::Number(0)));
    }

    #[test]
    fn test_union() {
        let a = TokenSet::new().with(TokenKind::Catch);
        let b = TokenSet::new().with(TokenKind::Finally);
        let both = a.union(b);
        assert!(both.contains(&TokenKind::Catch));
        assert!(both.contains(&TokenKind::Finally));
        assert!(!both.contains(&TokenKind::Try));
    }

    #[test]
    fn test_recovery_set_includes_eof_neighbors() {
        assert!(STMT_RECOVERY.contains(&TokenKind::Semicolon));
        assert!(STMT_RECOVERY.contains(&TokenKind::RBrace));
        assert!(STMT_RECOVERY.contains(&TokenKind::Try));
        assert!(!STMT_RECOVERY.contains(&TokenKind::Catch));
    }

    #[test]
    fn test_synchronize_stops_at_statement_keyword() {
        let interner = StringInterner::new();
        let tokens = lex("1 + + ) throw x", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        assert!(synchronize(&mut cursor, STMT_RECOVERY));
        assert_eq!(cursor.current_kind(), TokenKind::Throw);
    }

    #[test]
    fn test_synchronize_hits_eof() {
        let interner = StringInterner::new();
        let tokens = lex("a b c", &interner).tokens;
        let mut cursor = Cursor::new(&tokens, &interner);
        assert!(!synchronize(&mut cursor, STMT_RECOVERY));
        assert!(cursor.is_at_end());
    }
}

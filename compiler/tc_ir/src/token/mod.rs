//! Tokens produced by the lexer.

mod flags;
mod kind;
mod list;

pub use flags::TokenFlags;
pub use kind::TokenKind;
pub use list::TokenList;

use std::fmt;

use super::Span;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Token with no source position, for tests and synthesized input.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    // Largest payload is Number(u64).
    crate::static_assert_size!(TokenKind, 16);
    crate::static_assert_size!(Token, 24);
}

#[cfg(test)]
mod tests;

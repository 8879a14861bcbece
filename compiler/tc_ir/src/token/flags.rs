//! Per-token trivia flags.

use bitflags::bitflags;

bitflags! {
    /// Whitespace context preceding a token.
    ///
    /// The parser reads `NEWLINE_BEFORE` for automatic semicolon insertion
    /// and the restricted productions (`throw`, `return`, postfix `++`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Spaces or tabs preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// A line terminator preceded this token, possibly inside a block comment.
        const NEWLINE_BEFORE = 1 << 1;
        /// A comment preceded this token.
        const TRIVIA_BEFORE = 1 << 2;
    }
}

impl TokenFlags {
    #[inline]
    pub fn has_newline_before(self) -> bool {
        self.contains(TokenFlags::NEWLINE_BEFORE)
    }
}

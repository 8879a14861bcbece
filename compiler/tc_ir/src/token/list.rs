//! Token list with parallel tag and flag arrays.

use std::fmt;
use std::ops::Index;

use super::{Token, TokenFlags};

/// Lexer output.
///
/// Alongside the tokens it keeps a dense `tags` array of discriminant
/// indices (`tags[i] == tokens[i].kind.discriminant_index()`) so the parser
/// can test token classes without touching the full `TokenKind`, and a
/// `flags` array with the trivia context of each token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
    tags: Vec<u8>,
    flags: Vec<TokenFlags>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
            tags: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
        }
    }

    /// Push a token with no trivia flags.
    #[inline]
    pub fn push(&mut self, token: Token) {
        self.push_with_flags(token, TokenFlags::empty());
    }

    #[inline]
    pub fn push_with_flags(&mut self, token: Token, flags: TokenFlags) {
        self.tags.push(token.kind.discriminant_index());
        self.flags.push(flags);
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Discriminant tag at `index`.
    #[inline]
    pub fn tag(&self, index: usize) -> u8 {
        self.tags[index]
    }

    #[inline]
    pub fn tags(&self) -> &[u8] {
        &self.tags
    }

    /// Trivia flags of the token at `index`.
    #[inline]
    pub fn flag(&self, index: usize) -> TokenFlags {
        self.flags[index]
    }

    #[inline]
    pub fn flags(&self) -> &[TokenFlags] {
        &self.flags
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

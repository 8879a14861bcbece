//! Lexer for the host language subset using logos with string interning.
//!
//! Produces a `TokenList` that always ends in `Eof`. Trivia is dropped but
//! remembered in per-token flags so the parser can apply automatic
//! semicolon insertion and the `throw`/newline restriction.

mod cook;
mod lex_error;
mod raw_token;

pub use lex_error::{LexError, LexErrorKind};

use logos::Logos;
use raw_token::RawToken;
use tc_ir::{Span, StringInterner, Token, TokenFlags, TokenKind, TokenList};

/// Tokens plus every lexical error found along the way.
#[derive(Debug)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex source code into a token list.
///
/// Never fails: malformed input becomes `TokenKind::Error` tokens paired
/// with entries in `errors`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut tokens = TokenList::with_capacity(source.len() / 3 + 1);
    let mut errors = Vec::new();
    let mut pending = TokenFlags::empty();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = span_of(logos.span());
        let slice = logos.slice();

        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let c = slice.chars().next().unwrap_or('\u{FFFD}');
                errors.push(LexError::new(LexErrorKind::InvalidChar(c), span));
                tokens.push_with_flags(Token::new(TokenKind::Error, span), pending);
                pending = TokenFlags::empty();
                continue;
            }
        };

        let kind = match raw {
            RawToken::Whitespace => {
                pending |= TokenFlags::SPACE_BEFORE;
                continue;
            }
            RawToken::Newline => {
                pending |= TokenFlags::NEWLINE_BEFORE;
                continue;
            }
            RawToken::LineComment => {
                pending |= TokenFlags::TRIVIA_BEFORE;
                continue;
            }
            RawToken::BlockComment(shape) => {
                pending |= TokenFlags::TRIVIA_BEFORE;
                if shape.has_newline {
                    pending |= TokenFlags::NEWLINE_BEFORE;
                }
                if !shape.terminated {
                    errors.push(LexError::new(LexErrorKind::UnterminatedBlockComment, span));
                }
                continue;
            }
            RawToken::DoubleQuoted(terminated) | RawToken::SingleQuoted(terminated) => {
                string_kind(slice, span, terminated, interner, &mut errors)
            }
            RawToken::Decimal | RawToken::Hex | RawToken::Binary | RawToken::Octal => {
                match cook::cook_number(slice) {
                    Ok(value) => TokenKind::Number(value.to_bits()),
                    Err(kind) => {
                        errors.push(LexError::new(kind, span));
                        TokenKind::Error
                    }
                }
            }
            RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
            other => convert_fixed(other),
        };

        tokens.push_with_flags(Token::new(kind, span), pending);
        pending = TokenFlags::empty();
    }

    let eof = span_of(source.len()..source.len());
    tokens.push_with_flags(Token::new(TokenKind::Eof, eof), pending);

    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "lexed");
    LexOutput { tokens, errors }
}

/// Offsets past `u32::MAX` saturate; the driver rejects such inputs first.
fn span_of(range: std::ops::Range<usize>) -> Span {
    Span::try_from_range(range.clone()).unwrap_or_else(|_| {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        Span::new(start, u32::MAX)
    })
}

fn string_kind(
    slice: &str,
    span: Span,
    terminated: bool,
    interner: &StringInterner,
    errors: &mut Vec<LexError>,
) -> TokenKind {
    let quote = slice.chars().next().unwrap_or('"');
    if !terminated {
        errors.push(LexError::new(
            LexErrorKind::UnterminatedString { quote },
            span,
        ));
        return TokenKind::Error;
    }

    let body = &slice[1..slice.len() - 1];
    let cooked = cook::cook_string(body);
    if let Some((kind, offset)) = cooked.error {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "offset is inside a token whose span already fits in u32"
        )]
        let at = span.start + 1 + offset as u32;
        errors.push(LexError::new(kind, Span::new(at, at + 2)));
    }
    TokenKind::String(interner.intern(&cooked.value))
}

/// Tokens whose kind does not depend on their text.
fn convert_fixed(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Break => TokenKind::Break,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Const => TokenKind::Const,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Delete => TokenKind::Delete,
        RawToken::Do => TokenKind::Do,
        RawToken::Else => TokenKind::Else,
        RawToken::False => TokenKind::False,
        RawToken::Finally => TokenKind::Finally,
        RawToken::For => TokenKind::For,
        RawToken::Function => TokenKind::Function,
        RawToken::If => TokenKind::If,
        RawToken::In => TokenKind::In,
        RawToken::Instanceof => TokenKind::Instanceof,
        RawToken::Let => TokenKind::Let,
        RawToken::New => TokenKind::New,
        RawToken::Null => TokenKind::Null,
        RawToken::Return => TokenKind::Return,
        RawToken::This => TokenKind::This,
        RawToken::Throw => TokenKind::Throw,
        RawToken::True => TokenKind::True,
        RawToken::Try => TokenKind::Try,
        RawToken::Typeof => TokenKind::Typeof,
        RawToken::Var => TokenKind::Var,
        RawToken::Void => TokenKind::Void,
        RawToken::While => TokenKind::While,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Arrow => TokenKind::Arrow,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::UShr => TokenKind::UShr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::QuestionQuestion => TokenKind::QuestionQuestion,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::NotEqEq => TokenKind::NotEqEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::StarStarEq => TokenKind::StarStarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::UShrEq => TokenKind::UShrEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::AmpAmpEq => TokenKind::AmpAmpEq,
        RawToken::PipePipeEq => TokenKind::PipePipeEq,
        RawToken::QuestionQuestionEq => TokenKind::QuestionQuestionEq,

        // Handled by `lex` before reaching here.
        RawToken::Whitespace
        | RawToken::Newline
        | RawToken::LineComment
        | RawToken::BlockComment(_)
        | RawToken::DoubleQuoted(_)
        | RawToken::SingleQuoted(_)
        | RawToken::Decimal
        | RawToken::Hex
        | RawToken::Binary
        | RawToken::Octal
        | RawToken::Ident => TokenKind::Error,
    }
}

use super::*;
use crate::StringInterner;

const ALL_FIXED: &[TokenKind] = &[
    TokenKind::Break,
    TokenKind::Catch,
    TokenKind::Const,
    TokenKind::Continue,
    TokenKind::Delete,
    TokenKind::Do,
    TokenKind::Else,
    TokenKind::False,
    TokenKind::Finally,
    TokenKind::For,
    TokenKind::Function,
    TokenKind::If,
    TokenKind::In,
    TokenKind::Instanceof,
    TokenKind::Let,
    TokenKind::New,
    TokenKind::Null,
    TokenKind::Return,
    TokenKind::This,
    TokenKind::Throw,
    TokenKind::True,
    TokenKind::Try,
    TokenKind::Typeof,
    TokenKind::Var,
    TokenKind::Void,
    TokenKind::While,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Dot,
    TokenKind::Colon,
    TokenKind::Question,
    TokenKind::Arrow,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::StarStar,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::PlusPlus,
    TokenKind::MinusMinus,
    TokenKind::Shl,
    TokenKind::Shr,
    TokenKind::UShr,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Caret,
    TokenKind::Bang,
    TokenKind::Tilde,
    TokenKind::AmpAmp,
    TokenKind::PipePipe,
    TokenKind::QuestionQuestion,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::LtEq,
    TokenKind::GtEq,
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::EqEqEq,
    TokenKind::NotEqEq,
    TokenKind::Eq,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::StarStarEq,
    TokenKind::SlashEq,
    TokenKind::PercentEq,
    TokenKind::ShlEq,
    TokenKind::ShrEq,
    TokenKind::UShrEq,
    TokenKind::AmpEq,
    TokenKind::PipeEq,
    TokenKind::CaretEq,
    TokenKind::AmpAmpEq,
    TokenKind::PipePipeEq,
    TokenKind::QuestionQuestionEq,
    TokenKind::Error,
    TokenKind::Eof,
];

#[test]
fn discriminant_indices_are_unique_and_fit_u128() {
    let mut seen = [false; 128];
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let payload = [
        TokenKind::Number(1.0f64.to_bits()),
        TokenKind::String(x),
        TokenKind::Ident(x),
    ];
    for kind in payload.iter().chain(ALL_FIXED) {
        let idx = kind.discriminant_index() as usize;
        assert!(idx < 128, "{kind:?} index {idx} too large");
        assert!(!seen[idx], "{kind:?} shares index {idx}");
        seen[idx] = true;
    }
}

#[test]
fn tag_constants_match() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    assert_eq!(TokenKind::Ident(x).discriminant_index(), TokenKind::TAG_IDENT);
    assert_eq!(TokenKind::Eof.discriminant_index(), TokenKind::TAG_EOF);
}

#[test]
fn keyword_str_matches_interner_spelling() {
    let interner = StringInterner::new();
    for kind in ALL_FIXED {
        if let Some(kw) = kind.keyword_str() {
            assert!(interner.get(kw).is_some(), "{kw} not pre-interned");
            assert_eq!(kind.display_name(), kw);
        }
    }
    assert_eq!(TokenKind::Arrow.keyword_str(), None);
}

#[test]
fn token_list_keeps_parallel_arrays() {
    let mut list = TokenList::new();
    list.push(Token::new(TokenKind::Try, Span::new(0, 3)));
    list.push_with_flags(
        Token::new(TokenKind::LBrace, Span::new(4, 5)),
        TokenFlags::SPACE_BEFORE,
    );
    list.push_with_flags(
        Token::new(TokenKind::Eof, Span::point(5)),
        TokenFlags::NEWLINE_BEFORE,
    );

    assert_eq!(list.len(), 3);
    assert_eq!(list.tag(0), TokenKind::Try.discriminant_index());
    assert_eq!(list.tags().len(), list.flags().len());
    assert!(list.flag(1).contains(TokenFlags::SPACE_BEFORE));
    assert!(list.flag(2).has_newline_before());
    assert!(!list.flag(0).has_newline_before());
    assert_eq!(list[1].kind, TokenKind::LBrace);
}

#[test]
fn token_debug_format() {
    let token = Token::new(TokenKind::Catch, Span::new(2, 7));
    assert_eq!(format!("{token:?}"), "catch @ 2..7");
}

//! Token kinds for the host language subset.

use std::fmt;

use crate::Name;

/// Token kinds.
///
/// Number literals store their `f64` bits so the kind stays `Eq + Hash`.
/// Identifiers and string contents are interned.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Numeric literal (all radixes normalized to `f64` bits)
    Number(u64),
    /// String literal contents after escape processing
    String(Name),
    /// Identifier
    Ident(Name),

    // Keywords
    Break,
    Catch,
    Const,
    Continue,
    Delete,
    Do,
    Else,
    False,
    Finally,
    For,
    Function,
    If,
    In,
    Instanceof,
    Let,
    New,
    Null,
    Return,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,

    // Delimiters and punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Arrow,

    // Arithmetic and bitwise operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UShr,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    QuestionQuestion,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    StarStarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    UShrEq,
    AmpEq,
    PipeEq,
    CaretEq,
    AmpAmpEq,
    PipePipeEq,
    QuestionQuestionEq,

    /// Unrecognized input; the lexer reports the matching `LexError`.
    Error,
    Eof,
}

impl TokenKind {
    pub const TAG_IDENT: u8 = 2;
    pub const TAG_EOF: u8 = 96;

    /// Dense index of the variant, ignoring payloads.
    ///
    /// Used for `u128` token sets in parser recovery.
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::Number(_) => 0,
            TokenKind::String(_) => 1,
            TokenKind::Ident(_) => 2,
            TokenKind::Break => 3,
            TokenKind::Catch => 4,
            TokenKind::Const => 5,
            TokenKind::Continue => 6,
            TokenKind::Delete => 7,
            TokenKind::Do => 8,
            TokenKind::Else => 9,
            TokenKind::False => 10,
            TokenKind::Finally => 11,
            TokenKind::For => 12,
            TokenKind::Function => 13,
            TokenKind::If => 14,
            TokenKind::In => 15,
            TokenKind::Instanceof => 16,
            TokenKind::Let => 17,
            TokenKind::New => 18,
            TokenKind::Null => 19,
            TokenKind::Return => 20,
            TokenKind::This => 21,
            TokenKind::Throw => 22,
            TokenKind::True => 23,
            TokenKind::Try => 24,
            TokenKind::Typeof => 25,
            TokenKind::Var => 26,
            TokenKind::Void => 27,
            TokenKind::While => 28,
            TokenKind::LParen => 29,
            TokenKind::RParen => 30,
            TokenKind::LBrace => 31,
            TokenKind::RBrace => 32,
            TokenKind::LBracket => 33,
            TokenKind::RBracket => 34,
            TokenKind::Semicolon => 35,
            TokenKind::Comma => 36,
            TokenKind::Dot => 37,
            TokenKind::Colon => 38,
            TokenKind::Question => 39,
            TokenKind::Arrow => 40,
            TokenKind::Plus => 41,
            TokenKind::Minus => 42,
            TokenKind::Star => 43,
            TokenKind::StarStar => 44,
            TokenKind::Slash => 45,
            TokenKind::Percent => 46,
            TokenKind::PlusPlus => 47,
            TokenKind::MinusMinus => 48,
            TokenKind::Shl => 49,
            TokenKind::Shr => 50,
            TokenKind::UShr => 51,
            TokenKind::Amp => 52,
            TokenKind::Pipe => 53,
            TokenKind::Caret => 54,
            TokenKind::Bang => 55,
            TokenKind::Tilde => 56,
            TokenKind::AmpAmp => 57,
            TokenKind::PipePipe => 58,
            TokenKind::QuestionQuestion => 59,
            TokenKind::Lt => 60,
            TokenKind::Gt => 61,
            TokenKind::LtEq => 62,
            TokenKind::GtEq => 63,
            TokenKind::EqEq => 64,
            TokenKind::NotEq => 65,
            TokenKind::EqEqEq => 66,
            TokenKind::NotEqEq => 67,
            TokenKind::Eq => 68,
            TokenKind::PlusEq => 69,
            TokenKind::MinusEq => 70,
            TokenKind::StarEq => 71,
            TokenKind::StarStarEq => 72,
            TokenKind::SlashEq => 73,
            TokenKind::PercentEq => 74,
            TokenKind::ShlEq => 75,
            TokenKind::ShrEq => 76,
            TokenKind::UShrEq => 77,
            TokenKind::AmpEq => 78,
            TokenKind::PipeEq => 79,
            TokenKind::CaretEq => 80,
            TokenKind::AmpAmpEq => 81,
            TokenKind::PipePipeEq => 82,
            TokenKind::QuestionQuestionEq => 83,
            TokenKind::Error => 95,
            TokenKind::Eof => 96,
        }
    }

    /// Source spelling of a keyword, or `None` for non-keywords.
    ///
    /// Keywords are valid property names (`promise.catch`, `{ default: 1 }`),
    /// so the parser needs their text back.
    pub fn keyword_str(&self) -> Option<&'static str> {
        let s = match self {
            TokenKind::Break => "break",
            TokenKind::Catch => "catch",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::Let => "let",
            TokenKind::New => "new",
            TokenKind::Null => "null",
            TokenKind::Return => "return",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            _ => return None,
        };
        Some(s)
    }

    /// Check whether this token can begin an expression.
    pub fn can_start_expr(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::Ident(_)
                | TokenKind::False
                | TokenKind::True
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Function
                | TokenKind::New
                | TokenKind::Typeof
                | TokenKind::Void
                | TokenKind::Delete
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    /// Human-readable name for diagnostics.
    pub fn display_name(&self) -> &'static str {
        if let Some(kw) = self.keyword_str() {
            return kw;
        }
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Arrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::UShr => ">>>",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::QuestionQuestion => "??",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::EqEqEq => "===",
            TokenKind::NotEqEq => "!==",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::StarStarEq => "**=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::UShrEq => ">>>=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::AmpAmpEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::QuestionQuestionEq => "??=",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
            // Keywords returned above.
            _ => "keyword",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            TokenKind::String(name) => write!(f, "String({name:?})"),
            TokenKind::Ident(name) => write!(f, "Ident({name:?})"),
            other => write!(f, "{}", other.display_name()),
        }
    }
}

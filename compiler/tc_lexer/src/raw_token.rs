//! Raw token definition.
//!
//! `RawToken` is the logos-derived tokenizer output before interning and
//! conversion to `TokenKind`. Whitespace, newlines and comments are real
//! tokens here so the driver loop can compute trivia flags.

use logos::{Lexer, Logos};

/// Shape of a block comment, computed while scanning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommentShape {
    pub terminated: bool,
    pub has_newline: bool,
}

fn block_comment(lex: &mut Lexer<RawToken>) -> CommentShape {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            let body = &rest[..end];
            lex.bump(end + 2);
            CommentShape {
                terminated: true,
                has_newline: body.contains(is_line_terminator),
            }
        }
        None => {
            lex.bump(rest.len());
            CommentShape {
                terminated: false,
                has_newline: rest.contains(is_line_terminator),
            }
        }
    }
}

/// Scan the body of a string literal opened by `quote`.
///
/// Stops after the closing quote, or before an unescaped line terminator.
/// Returns whether the literal was closed.
fn string_body(lex: &mut Lexer<RawToken>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                // Any escaped char, including a line continuation. `\r\n`
                // counts as one terminator.
                if let Some((_, '\r')) = chars.next() {
                    if rest[i + 2..].starts_with('\n') {
                        chars.next();
                    }
                }
            }
            '\n' | '\r' => {
                lex.bump(i);
                return false;
            }
            c if c == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    false
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub(crate) enum RawToken {
    // Trivia
    #[regex(r"[ \t\x0B\x0C\u{A0}\u{FEFF}]+")]
    Whitespace,
    #[regex(r"\r\n|\n|\r|\u{2028}|\u{2029}")]
    Newline,
    #[regex(r"//[^\n\r\u{2028}\u{2029}]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment(CommentShape),

    // Literals
    #[token("\"", |lex| string_body(lex, '"'))]
    DoubleQuoted(bool),
    #[token("'", |lex| string_body(lex, '\''))]
    SingleQuoted(bool),

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]*)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]*)?")]
    Decimal,
    #[regex(r"0[xX][0-9a-zA-Z_]*")]
    Hex,
    #[regex(r"0[bB][0-9_]*")]
    Binary,
    #[regex(r"0[oO][0-9_]*")]
    Octal,

    // Keywords
    #[token("break")]
    Break,
    #[token("catch")]
    Catch,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("delete")]
    Delete,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("finally")]
    Finally,
    #[token("for")]
    For,
    #[token("function")]
    Function,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("instanceof")]
    Instanceof,
    #[token("let")]
    Let,
    #[token("new")]
    New,
    #[token("null")]
    Null,
    #[token("return")]
    Return,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("true")]
    True,
    #[token("try")]
    Try,
    #[token("typeof")]
    Typeof,
    #[token("var")]
    Var,
    #[token("void")]
    Void,
    #[token("while")]
    While,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=>")]
    Arrow,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("**=")]
    StarStarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UShrEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("??=")]
    QuestionQuestionEq,
}

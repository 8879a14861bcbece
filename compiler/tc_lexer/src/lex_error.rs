//! Lexer errors.

use tc_diagnostic::{Diagnostic, ErrorCode};
use tc_ir::Span;

/// A lexical error and where it happened.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing quote before the end of the line.
    UnterminatedString { quote: char },
    /// `/*` without a matching `*/`.
    UnterminatedBlockComment,
    /// A character no token starts with.
    InvalidChar(char),
    /// `0x`, `0b`, `0o` with no digits.
    MissingRadixDigits { radix: u32 },
    /// A digit outside the radix, as in `0b102`.
    InvalidDigitForRadix { digit: char, radix: u32 },
    /// `1e` or `1e+` with no exponent digits.
    EmptyExponent,
    /// Legacy octal `07` with a fraction, exponent or `_`.
    InvalidLeadingZero,
    /// Malformed `\x`, `\u` escape.
    InvalidEscape { escape: char },
    /// `\uD800` not followed by a low surrogate, or a lone low surrogate.
    LoneSurrogate,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
            LexErrorKind::InvalidChar(_) => ErrorCode::E0002,
            LexErrorKind::MissingRadixDigits { .. }
            | LexErrorKind::InvalidDigitForRadix { .. }
            | LexErrorKind::EmptyExponent
            | LexErrorKind::InvalidLeadingZero => ErrorCode::E0003,
            LexErrorKind::UnterminatedBlockComment => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } | LexErrorKind::LoneSurrogate => ErrorCode::E0005,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedString { quote } => {
                format!("unterminated string literal: missing closing `{quote}`")
            }
            LexErrorKind::UnterminatedBlockComment => "unterminated block comment".to_string(),
            LexErrorKind::InvalidChar(c) => format!("invalid character `{}`", c.escape_debug()),
            LexErrorKind::MissingRadixDigits { radix } => {
                format!("base-{radix} number literal has no digits")
            }
            LexErrorKind::InvalidDigitForRadix { digit, radix } => {
                format!("invalid digit `{digit}` in base-{radix} number literal")
            }
            LexErrorKind::EmptyExponent => "number literal exponent has no digits".to_string(),
            LexErrorKind::InvalidLeadingZero => {
                "legacy octal literal cannot have a fraction, exponent or `_`".to_string()
            }
            LexErrorKind::InvalidEscape { escape } => {
                format!("invalid escape sequence `\\{escape}`")
            }
            LexErrorKind::LoneSurrogate => {
                "unpaired UTF-16 surrogate in escape sequence".to_string()
            }
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => {
                Some("strings cannot span lines; escape the line break with `\\`")
            }
            LexErrorKind::UnterminatedBlockComment => Some("close the comment with `*/`"),
            LexErrorKind::InvalidEscape { escape: 'x' } => {
                Some("`\\x` takes exactly two hex digits, as in `\\x41`")
            }
            LexErrorKind::InvalidEscape { escape: 'u' } => {
                Some("`\\u` takes four hex digits or a braced code point, as in `\\u{1F600}`")
            }
            LexErrorKind::InvalidLeadingZero => Some("write octal numbers as `0o7`"),
            LexErrorKind::LoneSurrogate => Some(
                "strings hold Unicode scalar values; pair it as in `\\uD83D\\uDE00` or use `\\u{...}`",
            ),
            _ => None,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.error_code())
            .with_message(self.message())
            .with_label(self.span, "here");
        if let Some(hint) = self.hint() {
            diag = diag.with_suggestion(hint);
        }
        diag
    }
}

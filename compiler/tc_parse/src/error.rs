//! Parse error types.
//!
//! `ParseErrorKind` describes what went wrong in structured form; a
//! `ParseError` is the kind rendered to a code, message and span, ready to
//! become a [`Diagnostic`].

use tc_diagnostic::{Diagnostic, ErrorCode};
use tc_ir::{Span, TokenKind};

/// Structured syntax error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected a specific token, found something else.
    UnexpectedToken {
        found: TokenKind,
        expected: &'static str,
    },

    /// Input ended while more was required.
    UnexpectedEof { expected: &'static str },

    /// Expected an expression but found something else.
    ExpectedExpression { found: TokenKind },

    /// Expected an identifier, e.g. a declaration or parameter name.
    ExpectedIdentifier {
        found: TokenKind,
        context: &'static str,
    },

    /// `(`, `[` or `{` was never closed.
    UnclosedDelimiter { open: TokenKind, open_span: Span },

    /// Left side of an assignment or update is not a reference.
    InvalidAssignmentTarget,

    /// `throw` followed by a line break.
    NewlineAfterThrow,

    // === Catch clauses ===
    /// Catch parameter list is not `(ident)` or `(ident: Specifier)`.
    MalformedCatchParameter { found: TokenKind },

    /// `catch (e:)` with nothing after the colon.
    MissingTypeSpecifier { found: TokenKind },

    /// A typed catch follows the default catch.
    TypedCatchAfterDefault { default_span: Span },

    /// A second default catch.
    DuplicateDefaultCatch { first_span: Span },

    /// `try { }` with neither catch nor finally.
    MissingCatchOrFinally,

    /// Strict grammar: typed catches without a trailing default catch.
    MissingDefaultCatch,
}

impl ParseErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedToken { .. } => ErrorCode::E1001,
            Self::ExpectedExpression { .. } => ErrorCode::E1002,
            Self::UnclosedDelimiter { .. } => ErrorCode::E1003,
            Self::ExpectedIdentifier { .. } => ErrorCode::E1004,
            Self::UnexpectedEof { .. } => ErrorCode::E1005,
            Self::InvalidAssignmentTarget => ErrorCode::E1006,
            Self::NewlineAfterThrow => ErrorCode::E1007,
            Self::MalformedCatchParameter { .. } => ErrorCode::E1010,
            Self::MissingTypeSpecifier { .. } => ErrorCode::E1011,
            Self::TypedCatchAfterDefault { .. } => ErrorCode::E1012,
            Self::DuplicateDefaultCatch { .. } => ErrorCode::E1013,
            Self::MissingCatchOrFinally => ErrorCode::E1014,
            Self::MissingDefaultCatch => ErrorCode::E1015,
        }
    }

    /// Short uppercase heading, e.g. for `tcatch check` summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "UNEXPECTED TOKEN",
            Self::UnexpectedEof { .. } => "UNEXPECTED END OF FILE",
            Self::ExpectedExpression { .. } => "EXPECTED EXPRESSION",
            Self::ExpectedIdentifier { .. } => "EXPECTED IDENTIFIER",
            Self::UnclosedDelimiter { .. } => "UNCLOSED DELIMITER",
            Self::InvalidAssignmentTarget => "INVALID ASSIGNMENT TARGET",
            Self::NewlineAfterThrow => "LINE BREAK AFTER THROW",
            Self::MalformedCatchParameter { .. }
            | Self::MissingTypeSpecifier { .. }
            | Self::TypedCatchAfterDefault { .. }
            | Self::DuplicateDefaultCatch { .. }
            | Self::MissingCatchOrFinally
            | Self::MissingDefaultCatch => "INVALID CATCH CLAUSE",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedToken { found, expected } => {
                format!("expected {expected}, found `{}`", found.display_name())
            }
            Self::UnexpectedEof { expected } => {
                format!("unexpected end of file, expected {expected}")
            }
            Self::ExpectedExpression { found } => {
                format!("expected an expression, found `{}`", found.display_name())
            }
            Self::ExpectedIdentifier { found, context } => format!(
                "expected an identifier for {context}, found `{}`",
                found.display_name()
            ),
            Self::UnclosedDelimiter { open, .. } => {
                format!("unclosed delimiter `{}`", open.display_name())
            }
            Self::InvalidAssignmentTarget => "invalid assignment target".to_string(),
            Self::NewlineAfterThrow => "line break is not allowed after `throw`".to_string(),
            Self::MalformedCatchParameter { found } => format!(
                "malformed catch parameter: expected `(name)` or `(name: Type)`, found `{}`",
                found.display_name()
            ),
            Self::MissingTypeSpecifier { found } => format!(
                "expected a type specifier after `:`, found `{}`",
                found.display_name()
            ),
            Self::TypedCatchAfterDefault { .. } => {
                "typed catch clause after the default catch clause".to_string()
            }
            Self::DuplicateDefaultCatch { .. } => {
                "try statement has more than one default catch clause".to_string()
            }
            Self::MissingCatchOrFinally => {
                "try statement needs a catch clause or a finally block".to_string()
            }
            Self::MissingDefaultCatch => {
                "typed catch clauses must end with a default catch clause".to_string()
            }
        }
    }

    /// Actionable hint, when there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnexpectedToken {
                found: TokenKind::Colon,
                ..
            } => Some("a type annotation is only allowed on a catch parameter"),
            Self::NewlineAfterThrow => Some("put the thrown expression on the same line as `throw`"),
            Self::MalformedCatchParameter {
                found: TokenKind::Comma,
            } => Some("a catch clause binds exactly one name"),
            Self::MalformedCatchParameter {
                found: TokenKind::LBrace | TokenKind::LBracket,
            } => Some("destructuring catch parameters are not supported; bind a name instead"),
            Self::MissingTypeSpecifier { .. } => {
                Some("write the constructor to test against, as in `catch (e: TypeError)`")
            }
            Self::TypedCatchAfterDefault { .. } => {
                Some("the default catch matches everything, so it must come last")
            }
            Self::DuplicateDefaultCatch { .. } => Some("merge the two default catch bodies"),
            Self::MissingCatchOrFinally => Some("add `catch (e) { ... }` or `finally { ... }`"),
            Self::MissingDefaultCatch => {
                Some("add `catch (e) { throw e; }` to rethrow unmatched errors")
            }
            _ => None,
        }
    }

    /// Related location and its label.
    fn related(&self) -> Option<(Span, &'static str)> {
        match self {
            Self::UnclosedDelimiter { open_span, .. } => Some((*open_span, "opened here")),
            Self::TypedCatchAfterDefault { default_span } => {
                Some((*default_span, "default catch is here"))
            }
            Self::DuplicateDefaultCatch { first_span } => {
                Some((*first_span, "first default catch is here"))
            }
            _ => None,
        }
    }
}

/// Parse error with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Error code for searchability.
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Label text at the primary span.
    pub context: Option<String>,
    pub help: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn from_kind(kind: ParseErrorKind, span: Span) -> Self {
        let code = kind.error_code();
        let message = kind.message();
        let help = kind.hint().map(str::to_string).into_iter().collect();
        ParseError {
            kind,
            code,
            message,
            span,
            context: None,
            help,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"));

        if let Some((span, label)) = self.kind.related() {
            diag = diag.with_secondary_label(span, label);
        }
        for help in &self.help {
            diag = diag.with_suggestion(help);
        }
        diag
    }
}

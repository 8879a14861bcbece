//! Embedded long-form error documentation for `tcatch explain`.
//!
//! Each code has an `EXXXX.md` file in this directory, embedded at compile
//! time. Adding a code means adding its file and a `DOCS` entry.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for `code`, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Lexer errors (E0xxx)
    (ErrorCode::E0001, include_str!("E0001.md")),
    (ErrorCode::E0002, include_str!("E0002.md")),
    (ErrorCode::E0003, include_str!("E0003.md")),
    (ErrorCode::E0004, include_str!("E0004.md")),
    (ErrorCode::E0005, include_str!("E0005.md")),
    // Parser errors (E1xxx)
    (ErrorCode::E1001, include_str!("E1001.md")),
    (ErrorCode::E1002, include_str!("E1002.md")),
    (ErrorCode::E1003, include_str!("E1003.md")),
    (ErrorCode::E1004, include_str!("E1004.md")),
    (ErrorCode::E1005, include_str!("E1005.md")),
    (ErrorCode::E1006, include_str!("E1006.md")),
    (ErrorCode::E1007, include_str!("E1007.md")),
    (ErrorCode::E1010, include_str!("E1010.md")),
    (ErrorCode::E1011, include_str!("E1011.md")),
    (ErrorCode::E1012, include_str!("E1012.md")),
    (ErrorCode::E1013, include_str!("E1013.md")),
    (ErrorCode::E1014, include_str!("E1014.md")),
    (ErrorCode::E1015, include_str!("E1015.md")),
    // Structural errors (E2xxx)
    (ErrorCode::E2001, include_str!("E2001.md")),
    (ErrorCode::E2002, include_str!("E2002.md")),
    (ErrorCode::E2003, include_str!("E2003.md")),
    (ErrorCode::E2004, include_str!("E2004.md")),
    (ErrorCode::E2005, include_str!("E2005.md")),
    (ErrorCode::E2006, include_str!("E2006.md")),
    (ErrorCode::E2007, include_str!("E2007.md")),
    // Internal errors (E9xxx)
    (ErrorCode::E9001, include_str!("E9001.md")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented() {
        for code in ErrorCode::ALL {
            assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
        }
        assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_docs_start_with_their_code() {
        for code in ErrorDocs::all_codes() {
            let doc = ErrorDocs::get(code).unwrap_or_default();
            assert!(
                doc.starts_with(&format!("# {code}:")),
                "{code} doc has the wrong heading"
            );
        }
    }
}

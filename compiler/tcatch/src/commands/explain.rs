//! The `explain` command: documentation for diagnostic codes.

use tc_diagnostic::{ErrorCode, ErrorDocs};

use super::CommandError;

/// Look up the long-form documentation for `code_str`, e.g. `E2004`.
pub fn explain_error(code_str: &str) -> Result<&'static str, CommandError> {
    let code = code_str.parse::<ErrorCode>()?;
    ErrorDocs::get(code).ok_or(CommandError::NoDocs(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code() {
        let Ok(doc) = explain_error("E2004") else {
            panic!("E2004 is documented");
        };
        assert!(doc.starts_with("# E2004"), "{doc}");
    }

    #[test]
    fn codes_parse_loosely() {
        assert!(explain_error("e2004").is_ok());
        assert!(explain_error(" E1012 ").is_ok());
    }

    #[test]
    fn unknown_code() {
        assert!(matches!(
            explain_error("nonsense"),
            Err(CommandError::UnknownCode(_))
        ));
    }
}

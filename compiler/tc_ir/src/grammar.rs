//! Catch-clause grammar modes shared by the parser and the validator.

use std::fmt;
use std::str::FromStr;

/// Which reading of the catch-clause grammar to accept.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum GrammarMode {
    /// A list of typed catches may end without a default catch. An
    /// exception that matches none of them is rethrown.
    #[default]
    Relaxed,
    /// The literal extended grammar: a non-empty typed list must be
    /// followed by a default catch.
    Strict,
}

impl GrammarMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            GrammarMode::Relaxed => "relaxed",
            GrammarMode::Strict => "strict",
        }
    }

    #[inline]
    pub const fn requires_default(self) -> bool {
        matches!(self, GrammarMode::Strict)
    }
}

impl fmt::Display for GrammarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown grammar mode name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGrammarMode(pub String);

impl fmt::Display for UnknownGrammarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown grammar mode '{}' (expected 'relaxed' or 'strict')",
            self.0
        )
    }
}

impl std::error::Error for UnknownGrammarMode {}

impl FromStr for GrammarMode {
    type Err = UnknownGrammarMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(GrammarMode::Relaxed),
            "strict" => Ok(GrammarMode::Strict),
            _ => Err(UnknownGrammarMode(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!("strict".parse(), Ok(GrammarMode::Strict));
        assert_eq!(" Relaxed ".parse(), Ok(GrammarMode::Relaxed));
        assert_eq!(
            "loose".parse::<GrammarMode>(),
            Err(UnknownGrammarMode("loose".to_owned()))
        );
        assert_eq!(GrammarMode::default(), GrammarMode::Relaxed);
        assert!(GrammarMode::Strict.requires_default());
    }
}

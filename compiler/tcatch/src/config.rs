//! Pipeline configuration.

use tc_desugar::DesugarOptions;
use tc_fmt::PrintOptions;
use tc_ir::{GrammarMode, UnknownGrammarMode};
use tc_parse::ParseOptions;

/// Environment variable naming the default grammar mode.
pub const GRAMMAR_ENV: &str = "TCATCH_GRAMMAR";

/// Options for every phase of a transform.
///
/// The grammar mode is stored twice (parser and validator); set it through
/// [`with_grammar`](Self::with_grammar) so the two agree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformConfig {
    pub parse: ParseOptions,
    pub desugar: DesugarOptions,
    pub print: PrintOptions,
}

impl TransformConfig {
    /// Defaults, with the grammar mode taken from `TCATCH_GRAMMAR` if set.
    pub fn from_env() -> Result<Self, UnknownGrammarMode> {
        Self::default().with_grammar_name(std::env::var(GRAMMAR_ENV).ok().as_deref())
    }

    /// Apply a grammar mode given by name; `None` keeps the current mode.
    pub fn with_grammar_name(self, name: Option<&str>) -> Result<Self, UnknownGrammarMode> {
        match name {
            Some(name) => Ok(self.with_grammar(name.parse()?)),
            None => Ok(self),
        }
    }

    #[must_use]
    pub fn with_grammar(mut self, grammar: GrammarMode) -> Self {
        self.parse.grammar = grammar;
        self.desugar.grammar = grammar;
        self
    }

    pub fn grammar(&self) -> GrammarMode {
        self.desugar.grammar
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.print.indent_width = width;
        self
    }

    /// Base name of the synthetic catch parameter. Callers validate that
    /// it is an identifier.
    #[must_use]
    pub fn with_error_name(mut self, name: impl Into<String>) -> Self {
        self.desugar.error_name = name.into();
        self
    }
}

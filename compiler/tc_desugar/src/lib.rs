//! Validation and lowering of typed catch clauses.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Validate → Lower** → Print
//! ```
//!
//! [`validate_program`] re-checks the clause ordering rules on any tree,
//! including trees built by tooling rather than the parser. [`desugar`]
//! validates and then rewrites every try statement with typed catches into
//! a single untyped catch whose body tests each specifier in source order:
//!
//! ```text
//! try { F } catch ($error) {
//!     let $caught;
//!     if (($caught = Object($error)) instanceof A) { let e = $caught; BODY_A }
//!     else if (($caught = Object($error)) instanceof B) { let e = $caught; BODY_B }
//!     else { throw $error; }
//! } finally { G }
//! ```
//!
//! When a function, block or catch clause rebinds `Object`, the lowered
//! program starts with `const $Object = Object;` and the tests call
//! `$Object`. A program-scope binding of `Object` is an error.
//!
//! The input arena is never touched. Lowering builds a fresh arena and it
//! is returned only when the whole program lowered.

mod builtin;
#[cfg(debug_assertions)]
mod check;
mod hygiene;
mod lower;
mod validate;

use tc_ir::{Ast, GrammarMode, Name, Program, StringInterner};
use tracing::debug;

use crate::builtin::{scan_object, ObjectBinding};

pub use validate::{validate_program, StructuralError, StructuralErrorKind};

/// Default base name of the synthetic catch parameter.
pub const DEFAULT_ERROR_NAME: &str = "$error";

/// Default base name of the per-attempt boxing slot.
pub const DEFAULT_CAUGHT_NAME: &str = "$caught";

/// Base name of the saved built-in `Object`, when one is needed.
pub const OBJECT_ALIAS_NAME: &str = "$Object";

/// Desugaring configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesugarOptions {
    pub grammar: GrammarMode,
    /// Base name for the synthetic catch parameter. A numeric suffix is
    /// added when the try statement already uses the name.
    pub error_name: String,
    /// Base name for the slot holding `Object(error)` during a test.
    pub caught_name: String,
}

impl DesugarOptions {
    #[must_use]
    pub fn with_grammar(mut self, grammar: GrammarMode) -> Self {
        self.grammar = grammar;
        self
    }

    #[must_use]
    pub fn with_error_name(mut self, name: impl Into<String>) -> Self {
        self.error_name = name.into();
        self
    }

    #[must_use]
    pub fn with_caught_name(mut self, name: impl Into<String>) -> Self {
        self.caught_name = name.into();
        self
    }
}

impl Default for DesugarOptions {
    fn default() -> Self {
        DesugarOptions {
            grammar: GrammarMode::default(),
            error_name: DEFAULT_ERROR_NAME.to_owned(),
            caught_name: DEFAULT_CAUGHT_NAME.to_owned(),
        }
    }
}

/// A lowered program and its arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Desugared {
    pub program: Program,
    pub ast: Ast,
    /// Number of try statements that were rewritten.
    pub lowered: usize,
}

/// Check that lowering `program` would succeed, without lowering it.
///
/// Runs [`validate_program`] and then rejects a program-scope binding of
/// `Object` ([`StructuralErrorKind::ObjectRebound`]).
pub fn validate_lowerable(
    program: &Program,
    ast: &Ast,
    interner: &StringInterner,
    grammar: GrammarMode,
) -> Result<(), Vec<StructuralError>> {
    validate_program(program, ast, grammar)?;
    object_alias(program, ast, interner).map(|_| ())
}

/// The name lowered type tests call instead of `Object`, if one is needed.
fn object_alias(
    program: &Program,
    ast: &Ast,
    interner: &StringInterner,
) -> Result<Option<Name>, Vec<StructuralError>> {
    match scan_object(program, ast, interner) {
        ObjectBinding::Free => Ok(None),
        ObjectBinding::Nested => Ok(Some(hygiene::fresh_program_name(
            program,
            ast,
            interner,
            OBJECT_ALIAS_NAME,
        ))),
        ObjectBinding::ProgramScope(span) => Err(vec![StructuralError::new(
            StructuralErrorKind::ObjectRebound,
            span,
        )]),
    }
}

/// Validate `program` and lower every typed catch list.
///
/// Returns every structural violation if validation fails, or
/// [`StructuralErrorKind::ObjectRebound`] when program scope shadows
/// `Object`; nothing is lowered in either case.
pub fn desugar(
    program: &Program,
    ast: &Ast,
    interner: &StringInterner,
    options: &DesugarOptions,
) -> Result<Desugared, Vec<StructuralError>> {
    validate_program(program, ast, options.grammar)?;
    let object_alias = object_alias(program, ast, interner)?;

    let result = lower::lower_program(program, ast, interner, options, object_alias);
    debug!(lowered = result.lowered, "desugared program");

    #[cfg(debug_assertions)]
    check::check_lowered(&result.program, &result.ast);

    Ok(result)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

//! The lex → parse → validate → lower → print pipeline.

use rayon::prelude::*;
use tc_desugar::{desugar, validate_lowerable, StructuralError};
use tc_diagnostic::{Diagnostic, ErrorCode};
use tc_ir::visitor::{walk_expr, walk_stmt, walk_try, Visitor};
use tc_ir::{Ast, Expr, Span, Stmt, StringInterner, TryStmt};
use tc_lexer::LexError;
use tc_parse::{ParseError, ParseOutput};
use tc_stack::ensure_sufficient_stack;
use tracing::{debug, info};

use crate::TransformConfig;

/// Lowered source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// Try statements that were rewritten.
    pub lowered: usize,
}

/// Catch-clause counts from a successful check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub try_statements: usize,
    pub typed_clauses: usize,
    pub default_clauses: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Lexical and syntax errors, in source order.
    #[error("{} syntax error{}", .0.len(), plural(.0.len()))]
    Syntax(Vec<Diagnostic>),
    /// The tree parsed but breaks a clause ordering rule.
    #[error("{} structural error{}", .0.len(), plural(.0.len()))]
    Structure(Vec<Diagnostic>),
    /// The source cannot be processed at all.
    #[error("{}", .0.message)]
    Internal(Diagnostic),
}

impl TransformError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TransformError::Syntax(diagnostics) | TransformError::Structure(diagnostics) => {
                diagnostics
            }
            TransformError::Internal(diagnostic) => std::slice::from_ref(diagnostic),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Desugar one source text with a private interner.
pub fn transform(source: &str, config: &TransformConfig) -> Result<TransformOutput, TransformError> {
    transform_with(source, &StringInterner::new(), config)
}

/// Desugar one source text.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn transform_with(
    source: &str,
    interner: &StringInterner,
    config: &TransformConfig,
) -> Result<TransformOutput, TransformError> {
    let parsed = parse_clean(source, interner, config)?;
    let desugared = desugar(&parsed.program, &parsed.ast, interner, &config.desugar)
        .map_err(|errors| structure_error(&errors))?;
    let code = tc_fmt::print_program(&desugared.program, &desugared.ast, interner, &config.print);
    info!(lowered = desugared.lowered, bytes = code.len(), "transformed");
    Ok(TransformOutput {
        code,
        lowered: desugared.lowered,
    })
}

/// Desugar many independent sources in parallel. Results are in input
/// order; one source failing does not affect the others.
pub fn transform_many<S: AsRef<str> + Sync>(
    sources: &[S],
    config: &TransformConfig,
) -> Vec<Result<TransformOutput, TransformError>> {
    let interner = StringInterner::new();
    debug!(count = sources.len(), "batch transform");
    sources
        .par_iter()
        .map(|source| transform_with(source.as_ref(), &interner, config))
        .collect()
}

/// Lex, parse and validate without lowering. Fails exactly where
/// [`transform`] would.
pub fn check(source: &str, config: &TransformConfig) -> Result<CheckSummary, TransformError> {
    check_with(source, &StringInterner::new(), config)
}

pub fn check_with(
    source: &str,
    interner: &StringInterner,
    config: &TransformConfig,
) -> Result<CheckSummary, TransformError> {
    let parsed = parse_clean(source, interner, config)?;
    validate_lowerable(&parsed.program, &parsed.ast, interner, config.grammar())
        .map_err(|errors| structure_error(&errors))?;

    let mut counter = ClauseCounter::default();
    counter.visit_program(&parsed.program, &parsed.ast);
    info!(
        tries = counter.summary.try_statements,
        typed = counter.summary.typed_clauses,
        "checked"
    );
    Ok(counter.summary)
}

/// Lex and parse, failing with every lexical and syntax error.
fn parse_clean(
    source: &str,
    interner: &StringInterner,
    config: &TransformConfig,
) -> Result<ParseOutput, TransformError> {
    // Spans are u32 offsets.
    if u32::try_from(source.len()).is_err() {
        return Err(TransformError::Internal(
            Diagnostic::error(ErrorCode::E9001)
                .with_message(format!("source is {} bytes; the limit is 4 GiB", source.len()))
                .with_label(Span::DUMMY, "file too large"),
        ));
    }

    let lexed = tc_lexer::lex(source, interner);
    let parsed = tc_parse::parse(&lexed.tokens, interner, &config.parse);
    if lexed.has_errors() || parsed.has_errors() {
        let mut diagnostics: Vec<Diagnostic> = lexed
            .errors
            .iter()
            .map(LexError::to_diagnostic)
            .chain(parsed.errors.iter().map(ParseError::to_diagnostic))
            .collect();
        diagnostics.sort_by_key(|diagnostic| diagnostic.primary_span().map(|span| span.start));
        return Err(TransformError::Syntax(diagnostics));
    }
    Ok(parsed)
}

fn structure_error(errors: &[StructuralError]) -> TransformError {
    TransformError::Structure(errors.iter().map(StructuralError::to_diagnostic).collect())
}

#[derive(Default)]
struct ClauseCounter {
    summary: CheckSummary,
}

impl<'ast> Visitor<'ast> for ClauseCounter {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_stmt(self, stmt, ast));
    }

    fn visit_expr(&mut self, expr: &'ast Expr, ast: &'ast Ast) {
        ensure_sufficient_stack(|| walk_expr(self, expr, ast));
    }

    fn visit_try(&mut self, try_stmt: &'ast TryStmt, _span: Span, ast: &'ast Ast) {
        self.summary.try_statements += 1;
        for clause in ast.catches(try_stmt.handlers) {
            if clause.is_typed() {
                self.summary.typed_clauses += 1;
            } else {
                self.summary.default_clauses += 1;
            }
        }
        walk_try(self, try_stmt, ast);
    }
}

//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::path::Path;

use tc_ir::visitor::{walk_try, Visitor};
use tc_ir::{Ast, CatchKind, Span, StringInterner, TryStmt};

use super::{read_file, CommandError};
use crate::TransformConfig;

/// Parse a file and print the tree back as source, plus one line per
/// catch clause.
pub fn parse_file(path: &Path, config: &TransformConfig) -> Result<(), CommandError> {
    let content = read_file(path)?;
    let interner = StringInterner::new();
    let lexed = tc_lexer::lex(&content, &interner);
    let parsed = tc_parse::parse(&lexed.tokens, &interner, &config.parse);

    println!("Parse result for '{}':", path.display());
    println!("  Statements: {}", parsed.ast.stmt_count());
    println!("  Expressions: {}", parsed.ast.expr_count());
    println!("  Errors: {}", lexed.errors.len() + parsed.errors.len());

    let mut lister = ClauseLister {
        interner: &interner,
        lines: Vec::new(),
    };
    lister.visit_program(&parsed.program, &parsed.ast);
    if !lister.lines.is_empty() {
        println!();
        println!("Catch clauses:");
        for line in &lister.lines {
            println!("  {line}");
        }
    }

    println!();
    print!(
        "{}",
        tc_fmt::print_program(&parsed.program, &parsed.ast, &interner, &config.print)
    );

    if lexed.has_errors() || parsed.has_errors() {
        println!();
        println!("Errors:");
        for error in &lexed.errors {
            println!("  {}: {}", error.span, error.message());
        }
        for error in &parsed.errors {
            println!("  {}: {}", error.span, error.message);
        }
    }
    Ok(())
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &Path) -> Result<(), CommandError> {
    let content = read_file(path)?;
    let interner = StringInterner::new();
    let lexed = tc_lexer::lex(&content, &interner);

    println!(
        "Tokens for '{}' ({} tokens):",
        path.display(),
        lexed.tokens.len()
    );
    for token in &lexed.tokens {
        println!("  {:?} @ {}", token.kind, token.span);
    }
    for error in &lexed.errors {
        println!("  error @ {}: {}", error.span, error.message());
    }
    Ok(())
}

struct ClauseLister<'a> {
    interner: &'a StringInterner,
    lines: Vec<String>,
}

impl<'ast> Visitor<'ast> for ClauseLister<'_> {
    fn visit_try(&mut self, try_stmt: &'ast TryStmt, span: Span, ast: &'ast Ast) {
        for clause in ast.catches(try_stmt.handlers) {
            let line = match clause.kind {
                CatchKind::Typed { param, specifier } => format!(
                    "{span} typed ({}: {})",
                    self.interner.lookup(param),
                    tc_fmt::print_expr(specifier, ast, self.interner)
                ),
                CatchKind::Default { param: Some(param) } => {
                    format!("{span} default ({})", self.interner.lookup(param))
                }
                CatchKind::Default { param: None } => format!("{span} default"),
            };
            self.lines.push(line);
        }
        walk_try(self, try_stmt, ast);
    }
}

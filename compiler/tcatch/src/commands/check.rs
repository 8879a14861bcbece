use tc_ir::StringInterner;
use tracing::debug;

use super::report::report_to_stderr;
use super::{read_file, CheckArgs, CommandError};
use crate::{check_with, CheckSummary};

/// Validate every input without writing output.
pub fn run_check(args: &CheckArgs) -> Result<CheckSummary, CommandError> {
    let interner = StringInterner::new();
    let mut total = CheckSummary::default();
    let mut failed = 0;

    for path in &args.files {
        let source = read_file(path)?;
        match check_with(&source, &interner, &args.config) {
            Ok(summary) => {
                println!(
                    "ok: {} ({} try statement{}, {} typed catch clause{})",
                    path.display(),
                    summary.try_statements,
                    plural(summary.try_statements),
                    summary.typed_clauses,
                    plural(summary.typed_clauses),
                );
                total.try_statements += summary.try_statements;
                total.typed_clauses += summary.typed_clauses;
                total.default_clauses += summary.default_clauses;
            }
            Err(error) => {
                debug!(path = %path.display(), %error, "check failed");
                failed += 1;
                report_to_stderr(path, &source, error.diagnostics(), &args.report);
            }
        }
    }

    if failed > 0 {
        return Err(CommandError::Failed {
            failed,
            total: args.files.len(),
        });
    }
    Ok(total)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

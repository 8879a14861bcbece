//! Command handlers for the `tcatch` CLI.
//!
//! Each handler returns `Result<_, CommandError>`; `main` prints the error
//! and picks the exit code. Diagnostics for individual files are rendered
//! as they are found, so a failed batch still reports every file.

mod args;
mod check;
mod debug;
mod desugar;
mod explain;
mod report;

use std::io;
use std::path::{Path, PathBuf};

use tc_diagnostic::{ErrorCode, UnknownErrorCode};
use tc_ir::UnknownGrammarMode;

pub use args::{parse_check_args, parse_desugar_args, CheckArgs, DesugarArgs, OutputTarget};
pub use check::run_check;
pub use debug::{lex_file, parse_file};
pub use desugar::run_desugar;
pub use explain::explain_error;
pub use report::{render_diagnostics, DiagnosticFormat, ReportOptions};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{}", read_message(.path, .source))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Grammar(#[from] UnknownGrammarMode),
    #[error(transparent)]
    UnknownCode(#[from] UnknownErrorCode),
    #[error("no documentation available for {0}")]
    NoDocs(ErrorCode),
    /// Some inputs had diagnostics; they were already reported.
    #[error("{failed} of {total} file{} had errors", if *.total == 1 { "" } else { "s" })]
    Failed { failed: usize, total: usize },
}

fn read_message(path: &Path, error: &io::Error) -> String {
    let path = path.display();
    match error.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {error}"),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_owned(),
        source,
    })
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), CommandError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };
    write().map_err(|source| CommandError::Write {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_errors_name_the_file() {
        let error = read_file(Path::new("/definitely/not/here.js"));
        let Err(error) = error else {
            panic!("reading a missing file should fail");
        };
        assert_eq!(
            error.to_string(),
            "cannot find file '/definitely/not/here.js'"
        );
    }

    #[test]
    fn failure_summary() {
        let error = CommandError::Failed {
            failed: 1,
            total: 1,
        };
        assert_eq!(error.to_string(), "1 of 1 file had errors");
        let error = CommandError::Failed {
            failed: 2,
            total: 3,
        };
        assert_eq!(error.to_string(), "2 of 3 files had errors");
    }
}

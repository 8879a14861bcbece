use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use super::report::report_to_stderr;
use super::{read_file, write_file, CommandError, DesugarArgs, OutputTarget};
use crate::transform_many;

/// Desugar every input. Returns how many try statements were lowered.
///
/// Inputs are read up front so an unreadable file stops the run before
/// anything is written.
pub fn run_desugar(args: &DesugarArgs) -> Result<usize, CommandError> {
    let sources = args
        .files
        .iter()
        .map(|path| read_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    let results = transform_many(&sources, &args.config);

    let mut failed = 0;
    let mut lowered = 0;
    for ((path, source), result) in args.files.iter().zip(&sources).zip(results) {
        match result {
            Ok(output) => {
                info!(path = %path.display(), lowered = output.lowered, "desugared");
                lowered += output.lowered;
                match &args.output {
                    OutputTarget::Stdout => {
                        let mut stdout = std::io::stdout().lock();
                        stdout
                            .write_all(output.code.as_bytes())
                            .map_err(|source| CommandError::Write {
                                path: PathBuf::from("<stdout>"),
                                source,
                            })?;
                    }
                    OutputTarget::File(out) => write_file(out, &output.code)?,
                    OutputTarget::Dir(dir) => {
                        let name = path.file_name().unwrap_or(path.as_os_str());
                        write_file(&dir.join(name), &output.code)?;
                    }
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "not desugared");
                failed += 1;
                report_to_stderr(path, source, error.diagnostics(), &args.report);
            }
        }
    }

    if failed > 0 {
        return Err(CommandError::Failed {
            failed,
            total: args.files.len(),
        });
    }
    Ok(lowered)
}

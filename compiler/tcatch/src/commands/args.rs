//! Hand-rolled argument parsing for `desugar` and `check`.

use std::path::PathBuf;

use tc_diagnostic::emitter::ColorMode;
use tc_ir::{GrammarMode, StringInterner, TokenKind};

use super::{CommandError, ReportOptions};
use crate::TransformConfig;

/// Where lowered source goes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// `-o <path>`; only valid with a single input.
    File(PathBuf),
    /// `--out-dir <dir>`; each input is written under its file name.
    Dir(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesugarArgs {
    pub files: Vec<PathBuf>,
    pub output: OutputTarget,
    pub config: TransformConfig,
    pub report: ReportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub config: TransformConfig,
    pub report: ReportOptions,
}

/// Largest accepted `--indent` value.
const MAX_INDENT: usize = 16;

/// Parse `tcatch desugar` arguments (everything after the subcommand).
///
/// `config` supplies defaults, e.g. from the environment.
pub fn parse_desugar_args(
    args: &[String],
    mut config: TransformConfig,
) -> Result<DesugarArgs, CommandError> {
    let mut files = Vec::new();
    let mut output = OutputTarget::Stdout;
    let mut report = ReportOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "-o" || arg == "--out-dir" {
            let Some(value) = args.get(i + 1) else {
                return Err(usage(format!("`{arg}` needs a path")));
            };
            output = set_output(output, arg, PathBuf::from(value))?;
            i += 2;
            continue;
        }

        if let Some(path) = arg.strip_prefix("--output=") {
            output = set_output(output, "-o", PathBuf::from(path))?;
        } else if let Some(path) = arg.strip_prefix("--out-dir=") {
            output = set_output(output, "--out-dir", PathBuf::from(path))?;
        } else if let Some(width) = arg.strip_prefix("--indent=") {
            config = config.with_indent_width(parse_indent(width)?);
        } else if let Some(name) = arg.strip_prefix("--error-name=") {
            if !is_identifier(name) {
                return Err(usage(format!("`{name}` is not a valid identifier")));
            }
            config = config.with_error_name(name);
        } else if !common_flag(arg, &mut config, &mut report)? {
            if arg.starts_with('-') {
                return Err(usage(format!("unknown option `{arg}`")));
            }
            files.push(PathBuf::from(arg));
        }
        i += 1;
    }

    if files.is_empty() {
        return Err(usage("no input files".to_owned()));
    }
    if matches!(output, OutputTarget::File(_)) && files.len() > 1 {
        return Err(usage("`-o` needs exactly one input; use `--out-dir`".to_owned()));
    }

    Ok(DesugarArgs {
        files,
        output,
        config,
        report,
    })
}

/// Parse `tcatch check` arguments.
pub fn parse_check_args(
    args: &[String],
    mut config: TransformConfig,
) -> Result<CheckArgs, CommandError> {
    let mut files = Vec::new();
    let mut report = ReportOptions::default();

    for arg in args {
        if common_flag(arg, &mut config, &mut report)? {
            continue;
        }
        if arg.starts_with('-') {
            return Err(usage(format!("unknown option `{arg}`")));
        }
        files.push(PathBuf::from(arg));
    }

    if files.is_empty() {
        return Err(usage("no input files".to_owned()));
    }
    Ok(CheckArgs {
        files,
        config,
        report,
    })
}

/// Flags shared by every command that reports diagnostics. Returns whether
/// `arg` was one of them.
fn common_flag(
    arg: &str,
    config: &mut TransformConfig,
    report: &mut ReportOptions,
) -> Result<bool, CommandError> {
    if arg == "--strict" {
        *config = std::mem::take(config).with_grammar(GrammarMode::Strict);
    } else if arg == "--relaxed" {
        *config = std::mem::take(config).with_grammar(GrammarMode::Relaxed);
    } else if let Some(format) = arg.strip_prefix("--format=") {
        report.format = format.parse()?;
    } else if let Some(color) = arg.strip_prefix("--color=") {
        report.color = color
            .parse::<ColorMode>()
            .map_err(|error| usage(error.to_string()))?;
    } else {
        return Ok(false);
    }
    Ok(true)
}

fn set_output(
    current: OutputTarget,
    flag: &str,
    path: PathBuf,
) -> Result<OutputTarget, CommandError> {
    if current != OutputTarget::Stdout {
        return Err(usage("give at most one of `-o` and `--out-dir`".to_owned()));
    }
    Ok(if flag == "-o" {
        OutputTarget::File(path)
    } else {
        OutputTarget::Dir(path)
    })
}

fn parse_indent(value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(width) if (1..=MAX_INDENT).contains(&width) => Ok(width),
        _ => Err(usage(format!(
            "`--indent` expects a number from 1 to {MAX_INDENT}, got `{value}`"
        ))),
    }
}

/// A single identifier token: not a keyword, not empty.
fn is_identifier(name: &str) -> bool {
    let interner = StringInterner::new();
    let lexed = tc_lexer::lex(name, &interner);
    !lexed.has_errors()
        && lexed.tokens.len() == 2
        && matches!(lexed.tokens[0].kind, TokenKind::Ident(_))
        && lexed.tokens[0].span.len() as usize == name.len()
}

fn usage(message: String) -> CommandError {
    CommandError::Usage(message)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tc_diagnostic::emitter::ColorMode;
use tc_ir::GrammarMode;

use super::*;
use crate::commands::DiagnosticFormat;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|&arg| arg.to_owned()).collect()
}

fn desugar(args: &[&str]) -> Result<DesugarArgs, CommandError> {
    parse_desugar_args(&strings(args), TransformConfig::default())
}

fn usage_message(result: Result<DesugarArgs, CommandError>) -> String {
    match result {
        Err(CommandError::Usage(message)) => message,
        other => panic!("expected a usage error, got {other:?}"),
    }
}

#[test]
fn defaults() {
    let args = desugar(&["a.js"]).unwrap();
    assert_eq!(
        args,
        DesugarArgs {
            files: vec![PathBuf::from("a.js")],
            output: OutputTarget::Stdout,
            config: TransformConfig::default(),
            report: ReportOptions::default(),
        }
    );
}

#[test]
fn every_flag() {
    let args = desugar(&[
        "--strict",
        "in/a.js",
        "--out-dir",
        "out",
        "--indent=2",
        "--error-name=err",
        "--format=json",
        "--color=never",
        "in/b.js",
    ])
    .unwrap();

    assert_eq!(args.files, vec![PathBuf::from("in/a.js"), PathBuf::from("in/b.js")]);
    assert_eq!(args.output, OutputTarget::Dir(PathBuf::from("out")));
    assert_eq!(args.config.grammar(), GrammarMode::Strict);
    assert_eq!(args.config.parse.grammar, GrammarMode::Strict);
    assert_eq!(args.config.print.indent_width, 2);
    assert_eq!(args.config.desugar.error_name, "err");
    assert_eq!(args.report.format, DiagnosticFormat::Json);
    assert_eq!(args.report.color, ColorMode::Never);
}

#[test]
fn output_file() {
    let args = desugar(&["a.js", "-o", "b.js"]).unwrap();
    assert_eq!(args.output, OutputTarget::File(PathBuf::from("b.js")));

    let args = desugar(&["--output=b.js", "a.js"]).unwrap();
    assert_eq!(args.output, OutputTarget::File(PathBuf::from("b.js")));
}

#[test]
fn flags_override_environment_defaults() {
    let base = TransformConfig::default().with_grammar(GrammarMode::Strict);
    let args = parse_desugar_args(&strings(&["--relaxed", "a.js"]), base).unwrap();
    assert_eq!(args.config.grammar(), GrammarMode::Relaxed);
}

#[test]
fn rejected_arguments() {
    assert_eq!(usage_message(desugar(&[])), "no input files");
    assert_eq!(usage_message(desugar(&["a.js", "-o"])), "`-o` needs a path");
    assert_eq!(
        usage_message(desugar(&["a.js", "b.js", "-o", "c.js"])),
        "`-o` needs exactly one input; use `--out-dir`"
    );
    assert_eq!(
        usage_message(desugar(&["a.js", "-o", "c.js", "--out-dir=d"])),
        "give at most one of `-o` and `--out-dir`"
    );
    assert_eq!(
        usage_message(desugar(&["a.js", "--indent=0"])),
        "`--indent` expects a number from 1 to 16, got `0`"
    );
    assert_eq!(
        usage_message(desugar(&["a.js", "--bogus"])),
        "unknown option `--bogus`"
    );
    assert_eq!(
        usage_message(desugar(&["a.js", "--format=xml"])),
        "unknown format `xml` (expected `human` or `json`)"
    );
}

#[test]
fn error_name_must_be_an_identifier() {
    for name in ["$err", "_e", "e2"] {
        assert!(is_identifier(name), "{name}");
    }
    for name in ["", "2e", "catch", "a b", "a-b", " e"] {
        assert!(!is_identifier(name), "{name:?}");
    }
    assert_eq!(
        usage_message(desugar(&["a.js", "--error-name=try"])),
        "`try` is not a valid identifier"
    );
}

#[test]
fn check_args() {
    let args = parse_check_args(
        &strings(&["--strict", "a.js", "--color=always"]),
        TransformConfig::default(),
    )
    .unwrap();
    assert_eq!(args.files, vec![PathBuf::from("a.js")]);
    assert_eq!(args.config.grammar(), GrammarMode::Strict);
    assert_eq!(args.report.color, ColorMode::Always);

    let result = parse_check_args(&strings(&["-o", "x"]), TransformConfig::default());
    assert!(matches!(result, Err(CommandError::Usage(_))));
}

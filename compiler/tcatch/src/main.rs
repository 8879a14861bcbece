//! `tcatch` command-line driver.

use std::path::Path;

use tcatch::commands::{
    explain_error, lex_file, parse_check_args, parse_desugar_args, parse_file, run_check,
    run_desugar, CommandError,
};
use tcatch::{init_tracing, TransformConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    let result = match args[1].as_str() {
        "desugar" => desugar(&args[2..]),
        "check" => check(&args[2..]),
        "parse" | "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: tcatch {} <file.js>", args[1]);
                std::process::exit(2);
            };
            if args[1] == "parse" {
                TransformConfig::from_env()
                    .map_err(CommandError::from)
                    .and_then(|config| parse_file(Path::new(path), &config))
            } else {
                lex_file(Path::new(path))
            }
        }
        "explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: tcatch explain <code>");
                eprintln!("Example: tcatch explain E2004");
                std::process::exit(2);
            };
            explain_error(code).map(|doc| println!("{doc}"))
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("tcatch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        let code = if matches!(error, CommandError::Usage(_)) {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn desugar(args: &[String]) -> Result<(), CommandError> {
    let config = TransformConfig::from_env()?;
    let args = parse_desugar_args(args, config)?;
    run_desugar(&args).map(|_| ())
}

fn check(args: &[String]) -> Result<(), CommandError> {
    let config = TransformConfig::from_env()?;
    let args = parse_check_args(args, config)?;
    run_check(&args).map(|_| ())
}

fn print_usage() {
    eprintln!("tcatch: typed catch clause desugarer");
    eprintln!();
    eprintln!("Usage: tcatch <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  desugar <files...>  Lower typed catch clauses to plain JavaScript");
    eprintln!("  check <files...>    Parse and validate without writing output");
    eprintln!("  parse <file>        Show catch clauses and the parsed tree");
    eprintln!("  lex <file>          Show the token stream");
    eprintln!("  explain <code>      Show documentation for a diagnostic code");
    eprintln!("  help                Show this message");
    eprintln!("  version             Show the version");
    eprintln!();
    eprintln!("Options (desugar, check):");
    eprintln!("  --strict            Require a default catch after typed clauses");
    eprintln!("  --relaxed           Allow typed clauses without a default (rethrow)");
    eprintln!("  --format=<fmt>      Diagnostics as `human` (default) or `json`");
    eprintln!("  --color=<when>      auto, always or never");
    eprintln!();
    eprintln!("Options (desugar):");
    eprintln!("  -o <path>           Output file (single input only)");
    eprintln!("  --out-dir <dir>     Write each output under <dir>");
    eprintln!("  --indent=<n>        Indent width, 1 to 16 (default 4)");
    eprintln!("  --error-name=<id>   Name of the synthetic catch parameter");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TCATCH_GRAMMAR      Default grammar mode: relaxed or strict");
    eprintln!("  TCATCH_LOG          Log filter, e.g. tc_desugar=debug");
}

//! Rendering diagnostics for one input file.

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::str::FromStr;

use tc_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use tc_diagnostic::Diagnostic;

use super::CommandError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DiagnosticFormat {
    /// Source snippets with labels, for people.
    #[default]
    Human,
    /// A JSON array per file, for tools.
    Json,
}

impl FromStr for DiagnosticFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(DiagnosticFormat::Human),
            "json" => Ok(DiagnosticFormat::Json),
            _ => Err(CommandError::Usage(format!(
                "unknown format `{s}` (expected `human` or `json`)"
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: DiagnosticFormat,
    pub color: ColorMode,
}

/// Write `diagnostics` for the file at `path` and hand the writer back.
pub fn render_diagnostics<W: Write>(
    writer: W,
    path: &Path,
    source: &str,
    diagnostics: &[Diagnostic],
    options: &ReportOptions,
    is_tty: bool,
) -> W {
    let path = path.display().to_string();
    match options.format {
        DiagnosticFormat::Human => {
            let mut emitter = TerminalEmitter::with_color_mode(writer, options.color, is_tty)
                .with_source(source)
                .with_file_path(path);
            emitter.emit_all(diagnostics);
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            emitter.emit_summary(errors, diagnostics.len() - errors);
            emitter.flush();
            emitter.into_inner()
        }
        DiagnosticFormat::Json => {
            let mut emitter = JsonEmitter::new(writer)
                .with_source(source)
                .with_file_path(path);
            emitter.begin();
            emitter.emit_all(diagnostics);
            emitter.end();
            emitter.flush();
            emitter.into_inner()
        }
    }
}

/// [`render_diagnostics`] to stderr.
pub(crate) fn report_to_stderr(
    path: &Path,
    source: &str,
    diagnostics: &[Diagnostic],
    options: &ReportOptions,
) {
    let stderr = std::io::stderr();
    let is_tty = stderr.is_terminal();
    let _ = render_diagnostics(stderr.lock(), path, source, diagnostics, options, is_tty);
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;
    use tc_diagnostic::ErrorCode;
    use tc_ir::Span;

    use super::*;

    fn missing_catch() -> Diagnostic {
        Diagnostic::error(ErrorCode::E1014)
            .with_message("missing catch or finally after try")
            .with_label(Span::new(0, 6), "this try has no handler")
    }

    fn render(options: &ReportOptions) -> String {
        let out = render_diagnostics(
            Vec::new(),
            Path::new("a.js"),
            "try {}\n",
            &[missing_catch()],
            options,
            false,
        );
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn human_output_names_file_and_code() {
        let text = render(&ReportOptions::default());
        assert!(text.contains("E1014"), "{text}");
        assert!(text.contains("a.js"), "{text}");
        assert!(text.contains("missing catch or finally after try"), "{text}");
        assert!(text.contains("aborting due to previous error"), "{text}");
        assert!(!text.contains('\x1b'), "no color off a terminal: {text}");
    }

    #[test]
    fn always_colors() {
        let text = render(&ReportOptions {
            format: DiagnosticFormat::Human,
            color: ColorMode::Always,
        });
        assert!(text.contains('\x1b'), "{text}");
    }

    #[test]
    fn json_output_is_an_array() {
        let text = render(&ReportOptions {
            format: DiagnosticFormat::Json,
            color: ColorMode::Always,
        });
        assert!(text.starts_with("[\n"), "{text}");
        assert!(text.ends_with("\n]\n"), "{text}");
        assert!(text.contains("\"code\": \"E1014\""), "{text}");
        assert!(text.contains("\"file\": \"a.js\""), "{text}");
        assert!(!text.contains('\x1b'), "{text}");
    }

    #[test]
    fn format_names() {
        assert_eq!("json".parse::<DiagnosticFormat>().unwrap(), DiagnosticFormat::Json);
        assert_eq!("human".parse::<DiagnosticFormat>().unwrap(), DiagnosticFormat::Human);
        assert!(matches!(
            "JSON".parse::<DiagnosticFormat>(),
            Err(CommandError::Usage(_))
        ));
    }
}

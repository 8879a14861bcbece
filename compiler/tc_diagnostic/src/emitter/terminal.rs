//! Human-readable diagnostic output with optional ANSI color.
//!
//! Given the source text, labels are rendered as annotated snippets:
//!
//! ```text
//! error[E1012]: typed catch clause after the default catch
//!  --> input.js:4:3
//!   |
//! 4 | } catch (e: TypeError) {
//!   |   ^^^^^^^^^^^^^^^^^^^^^^ typed catch here
//!   |
//!   = help: move the default catch to the end
//! ```
//!
//! Without source, spans are shown as byte ranges.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn digit_count(mut n: u32) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColorMode(pub String);

impl fmt::Display for UnknownColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color mode '{}' (expected 'auto', 'always' or 'never')",
            self.0
        )
    }
}

impl std::error::Error for UnknownColorMode {}

impl FromStr for ColorMode {
    type Err = UnknownColorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(UnknownColorMode(s.to_owned())),
        }
    }
}

/// Source text attached to a terminal emitter.
struct SourceContext {
    text: String,
    lines: LineOffsetTable,
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceContext>,
    file_path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` decides color for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Attach source text so labels render as snippets with line numbers.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let text = source.into();
        let lines = LineOffsetTable::build(&text);
        self.source = Some(SourceContext { text, lines });
        self
    }

    /// Path shown in `-->` location lines.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Recover the writer, e.g. to inspect buffered output.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn label_color(label: &Label) -> &'static str {
        if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        }
    }

    /// Labels as `--> 10..20: message` when no source is attached.
    fn emit_labels_plain(&mut self, labels: &[Label]) {
        for label in labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_colored(&label.message, Self::label_color(label));
            let _ = writeln!(self.writer);
        }
    }

    fn emit_labels_snippet(&mut self, labels: &[Label]) {
        let Some(source) = self.source.take() else {
            self.emit_labels_plain(labels);
            return;
        };

        let max_line = labels
            .iter()
            .map(|l| source.lines.line_from_offset(l.span.start))
            .max()
            .unwrap_or(1);
        let width = digit_count(max_line);
        let pad = " ".repeat(width);

        if let Some(primary) = labels.iter().find(|l| l.is_primary).or(labels.first()) {
            let (line, col) = source.lines.span_start(&source.text, primary.span);
            let _ = write!(self.writer, "{pad}");
            self.write_colored("-->", colors::SECONDARY);
            match &self.file_path {
                Some(path) => {
                    let _ = writeln!(self.writer, " {path}:{line}:{col}");
                }
                None => {
                    let _ = writeln!(self.writer, " {line}:{col}");
                }
            }
        }

        self.write_gutter(&pad, None);
        let _ = writeln!(self.writer);
        for label in labels {
            let (line, col) = source.lines.span_start(&source.text, label.span);
            let text = source.lines.line_text(&source.text, line).unwrap_or("");
            self.write_gutter(&pad, Some(line));
            let _ = writeln!(self.writer, " {text}");

            let skip = (col as usize).saturating_sub(1);
            let available = text.chars().count().saturating_sub(skip);
            let span_chars = source
                .text
                .get(label.span.to_range())
                .map_or(0, |s| s.chars().take_while(|c| *c != '\n').count());
            let underline_len = span_chars.min(available).max(1);
            let mark = if label.is_primary { "^" } else { "-" };

            self.write_gutter(&pad, None);
            let _ = write!(self.writer, " {}", " ".repeat(skip));
            let underline = mark.repeat(underline_len);
            let color = Self::label_color(label);
            if label.message.is_empty() {
                self.write_colored(&underline, color);
            } else {
                self.write_colored(&format!("{underline} {}", label.message), color);
            }
            let _ = writeln!(self.writer);
        }
        self.write_gutter(&pad, None);
        let _ = writeln!(self.writer);

        self.source = Some(source);
    }

    /// ` 12 |` with a line number, or `    |` without.
    fn write_gutter(&mut self, pad: &str, line: Option<u32>) {
        let gutter = match line {
            Some(n) => format!("{n:>width$} |", width = pad.len()),
            None => format!("{pad} |"),
        };
        self.write_colored(&gutter, colors::SECONDARY);
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if !diagnostic.labels.is_empty() {
            if self.source.is_some() {
                self.emit_labels_snippet(&diagnostic.labels);
            } else {
                self.emit_labels_plain(&diagnostic.labels);
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

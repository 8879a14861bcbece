//! Machine-readable diagnostic output.

use std::io::Write;

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// Writes diagnostics as a JSON array of objects.
///
/// Call [`begin`](Self::begin) before the first diagnostic and
/// [`end`](Self::end) after the last.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
    file_path: Option<String>,
    source: Option<(String, LineOffsetTable)>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
            file_path: None,
            source: None,
        }
    }

    /// Attach the source so labels also carry `line` and `column`.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let text = source.into();
        let table = LineOffsetTable::build(&text);
        self.source = Some((text, table));
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        // Built by hand; the shape is small and fixed.
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"code\": \"{}\",",
            diagnostic.code.as_str()
        );
        let _ = writeln!(
            self.writer,
            "    \"severity\": \"{}\",",
            diagnostic.severity
        );
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );
        if let Some(path) = &self.file_path {
            let _ = writeln!(self.writer, "    \"file\": \"{}\",", escape_json(path));
        }

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let _ = writeln!(self.writer, "      {{");
            let _ = writeln!(self.writer, "        \"start\": {},", label.span.start);
            let _ = writeln!(self.writer, "        \"end\": {},", label.span.end);
            if let Some((text, table)) = &self.source {
                let (line, column) = table.offset_to_line_col(text, label.span.start);
                let _ = writeln!(self.writer, "        \"line\": {line},");
                let _ = writeln!(self.writer, "        \"column\": {column},");
            }
            let _ = writeln!(
                self.writer,
                "        \"message\": \"{}\",",
                escape_json(&label.message)
            );
            let _ = writeln!(self.writer, "        \"primary\": {}", label.is_primary);
            let _ = writeln!(self.writer, "      }}{comma}");
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{}", escape_json(note), comma);
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(
                self.writer,
                "      \"{}\"{}",
                escape_json(suggestion),
                comma
            );
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array itself is the summary.
    }
}

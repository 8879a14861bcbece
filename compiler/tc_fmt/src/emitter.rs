//! Output Emitter
//!
//! Abstraction for output production during printing.

/// Trait for emitting printed output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize);

    /// Emit a single space.
    fn emit_space(&mut self);
}

/// String-based emitter for in-memory printing.
pub struct StringEmitter {
    buffer: String,
    indent_width: usize,
}

impl StringEmitter {
    /// Create an emitter indenting by `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        StringEmitter {
            buffer: String::new(),
            indent_width,
        }
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(indent_width: usize, capacity: usize) -> Self {
        StringEmitter {
            buffer: String::with_capacity(capacity),
            indent_width,
        }
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Default for StringEmitter {
    fn default() -> Self {
        StringEmitter::new(crate::DEFAULT_INDENT_WIDTH)
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        let spaces = level * self.indent_width;
        self.buffer.extend(std::iter::repeat(' ').take(spaces));
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}

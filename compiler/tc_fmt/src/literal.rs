//! Literal text.

use std::fmt::Write;

/// Source text for a numeric literal stored as `f64` bits.
///
/// `f64`'s `Display` is the shortest text that reads back to the same
/// value and never uses exponent notation, so the lexer accepts it as is.
pub(crate) fn number(bits: u64) -> String {
    let value = f64::from_bits(bits);
    if value.is_infinite() {
        // Only an overflowing literal gets here; any huge literal reads back
        // as infinity.
        "1e999".to_owned()
    } else {
        format!("{value}")
    }
}

/// Double-quoted string literal with escapes.
pub(crate) fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:X}}}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

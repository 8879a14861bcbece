//! Cooking raw slices into literal values.

use crate::lex_error::LexErrorKind;

/// Result of cooking a string literal body.
pub(crate) struct CookedString {
    pub value: String,
    /// First malformed escape, if any. The escape is kept verbatim in `value`.
    pub error: Option<(LexErrorKind, usize)>,
}

/// Process escapes in the body of a string literal (quotes excluded).
///
/// Error offsets are byte offsets into `body`.
pub(crate) fn cook_string(body: &str) -> CookedString {
    let mut value = String::with_capacity(body.len());
    let mut error = None;
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            value.push('\\');
            break;
        };
        match esc {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            // Legacy octal escape (Annex B): up to `\377`. `\0` alone is NUL.
            first @ '0'..='7' => {
                let max_len = if first <= '3' { 3 } else { 2 };
                let mut code = first.to_digit(8).unwrap_or(0);
                for _ in 1..max_len {
                    let Some(digit) = chars.peek().and_then(|(_, next)| next.to_digit(8)) else {
                        break;
                    };
                    code = code * 8 + digit;
                    chars.next();
                }
                value.extend(char::from_u32(code));
            }
            // Line continuation
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if chars.peek().is_some_and(|(_, next)| *next == '\n') {
                    chars.next();
                }
            }
            'x' => {
                let digits: String = chars.by_ref().take(2).map(|(_, d)| d).collect();
                match u8::from_str_radix(&digits, 16) {
                    Ok(byte) if digits.len() == 2 => value.push(char::from(byte)),
                    _ => {
                        value.push_str("\\x");
                        value.push_str(&digits);
                        error.get_or_insert((LexErrorKind::InvalidEscape { escape: 'x' }, i));
                    }
                }
            }
            'u' => match cook_unicode_escape(body, &mut chars) {
                Ok(c) => value.push(c),
                Err(kind) => {
                    value.push_str("\\u");
                    error.get_or_insert((kind, i));
                }
            },
            other => value.push(other),
        }
    }

    CookedString { value, error }
}

type CharIter<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

/// Cook the part of a `\u` escape after the `u`.
fn cook_unicode_escape(body: &str, chars: &mut CharIter<'_>) -> Result<char, LexErrorKind> {
    let invalid = LexErrorKind::InvalidEscape { escape: 'u' };

    let first = read_code_unit(chars).ok_or(invalid.clone())?;
    if !(0xD800..=0xDFFF).contains(&first) {
        return char::from_u32(first).ok_or(invalid);
    }
    if first >= 0xDC00 {
        return Err(LexErrorKind::LoneSurrogate);
    }

    // High surrogate: require `\uDC00`-`\uDFFF` next.
    let Some(&(pos, '\\')) = chars.peek() else {
        return Err(LexErrorKind::LoneSurrogate);
    };
    if !body[pos..].starts_with("\\u") {
        return Err(LexErrorKind::LoneSurrogate);
    }
    chars.next();
    chars.next();
    let second = read_code_unit(chars).ok_or(invalid)?;
    if !(0xDC00..=0xDFFF).contains(&second) {
        return Err(LexErrorKind::LoneSurrogate);
    }
    let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
    char::from_u32(combined).ok_or(LexErrorKind::LoneSurrogate)
}

/// `XXXX` or `{X...}` after `\u`.
fn read_code_unit(chars: &mut CharIter<'_>) -> Option<u32> {
    if chars.peek().is_some_and(|(_, c)| *c == '{') {
        chars.next();
        let mut digits = String::new();
        for (_, c) in chars.by_ref() {
            if c == '}' {
                return u32::from_str_radix(&digits, 16)
                    .ok()
                    .filter(|v| *v <= 0x0010_FFFF && !digits.is_empty());
            }
            digits.push(c);
        }
        return None;
    }
    let digits: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
    if digits.len() != 4 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Value of a numeric literal slice, or what is wrong with it.
pub(crate) fn cook_number(slice: &str) -> Result<f64, LexErrorKind> {
    let radix = match slice.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0b" | "0B") => 2,
        Some("0o" | "0O") => 8,
        _ => return cook_decimal(slice),
    };

    let digits = &slice[2..];
    let mut value = 0f64;
    let mut any = false;
    for c in digits.chars().filter(|c| *c != '_') {
        let digit = c
            .to_digit(radix)
            .ok_or(LexErrorKind::InvalidDigitForRadix { digit: c, radix })?;
        value = value * f64::from(radix) + f64::from(digit);
        any = true;
    }
    if any {
        Ok(value)
    } else {
        Err(LexErrorKind::MissingRadixDigits { radix })
    }
}

fn cook_decimal(slice: &str) -> Result<f64, LexErrorKind> {
    if let Some(legacy) = cook_leading_zero(slice) {
        return legacy;
    }
    let cleaned: String = slice.chars().filter(|c| *c != '_').collect();
    if let Some(exp_at) = cleaned.find(['e', 'E']) {
        let exponent = cleaned[exp_at + 1..].trim_start_matches(['+', '-']);
        if exponent.is_empty() {
            return Err(LexErrorKind::EmptyExponent);
        }
    }
    // `1.` is valid source but not valid for `f64::from_str`.
    let normalized = cleaned.replace(".e", ".0e").replace(".E", ".0E");
    let normalized = normalized.strip_suffix('.').unwrap_or(&normalized);
    normalized
        .parse::<f64>()
        .map_err(|_| LexErrorKind::EmptyExponent)
}

/// Decimal literals starting with `0` and another digit (Annex B).
///
/// All-octal digits (`010`) are a legacy octal integer. With an `8` or `9`
/// (`019`, `08.5`) the literal is decimal. Returns `None` for other slices.
fn cook_leading_zero(slice: &str) -> Option<Result<f64, LexErrorKind>> {
    let rest = slice.strip_prefix('0')?;
    if !rest.starts_with(|c: char| c.is_ascii_digit() || c == '_') {
        return None;
    }
    let int_end = rest.find(['.', 'e', 'E']).unwrap_or(rest.len());
    let (int_part, tail) = rest.split_at(int_end);
    if int_part.contains('_') {
        return Some(Err(LexErrorKind::InvalidLeadingZero));
    }
    if int_part.contains(['8', '9']) {
        return None;
    }
    if !tail.is_empty() {
        return Some(Err(LexErrorKind::InvalidLeadingZero));
    }
    let value = int_part
        .chars()
        .filter_map(|c| c.to_digit(8))
        .fold(0f64, |value, digit| value * 8.0 + f64::from(digit));
    Some(Ok(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_escapes() {
        let cooked = cook_string(r"a\nb\t\\\'\x41B\u{1F600}\0");
        assert_eq!(cooked.value, "a\nb\t\\'AB\u{1F600}\0");
        assert!(cooked.error.is_none());
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(cook_string("one \\\ntwo").value, "one two");
        assert_eq!(cook_string("one \\\r\ntwo").value, "one two");
    }

    #[test]
    fn test_surrogate_pair() {
        let cooked = cook_string(r"\uD83D\uDE00");
        assert_eq!(cooked.value, "\u{1F600}");
        assert!(cooked.error.is_none());
    }

    #[test]
    fn test_lone_surrogate() {
        let cooked = cook_string(r"x\uD83Dy");
        assert_eq!(cooked.error, Some((LexErrorKind::LoneSurrogate, 1)));
    }

    #[test]
    fn test_bad_hex_escape() {
        let cooked = cook_string(r"\xZZ");
        assert_eq!(
            cooked.error,
            Some((LexErrorKind::InvalidEscape { escape: 'x' }, 0))
        );
    }

    #[test]
    fn test_identity_escape() {
        assert_eq!(cook_string(r"\q").value, "q");
        assert_eq!(cook_string(r"\8\9").value, "89");
    }

    #[test]
    fn test_legacy_octal_escapes() {
        assert_eq!(cook_string(r"\101").value, "A");
        assert_eq!(cook_string(r"\7").value, "\u{7}");
        assert_eq!(cook_string(r"\12x").value, "\nx");
        assert_eq!(cook_string(r"\377").value, "\u{FF}");
        // `\4` takes at most one more digit; `\3` takes two.
        assert_eq!(cook_string(r"\477").value, "\u{27}7");
        assert_eq!(cook_string(r"\0").value, "\0");
        assert_eq!(cook_string(r"\08").value, "\u{0}8");
        assert!(cook_string(r"\101").error.is_none());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(cook_number("42"), Ok(42.0));
        assert_eq!(cook_number("1_000"), Ok(1000.0));
        assert_eq!(cook_number("1.5e3"), Ok(1500.0));
        assert_eq!(cook_number(".25"), Ok(0.25));
        assert_eq!(cook_number("3."), Ok(3.0));
        assert_eq!(cook_number("0xff"), Ok(255.0));
        assert_eq!(cook_number("0b101"), Ok(5.0));
        assert_eq!(cook_number("0o17"), Ok(15.0));
        assert_eq!(cook_number("0"), Ok(0.0));
        assert_eq!(cook_number("0.5"), Ok(0.5));
        assert_eq!(cook_number("0e1"), Ok(0.0));
    }

    #[test]
    fn test_leading_zero_numbers() {
        assert_eq!(cook_number("010"), Ok(8.0));
        assert_eq!(cook_number("0777"), Ok(511.0));
        assert_eq!(cook_number("00"), Ok(0.0));
        assert_eq!(cook_number("019"), Ok(19.0));
        assert_eq!(cook_number("08.5"), Ok(8.5));
        assert_eq!(cook_number("07.5"), Err(LexErrorKind::InvalidLeadingZero));
        assert_eq!(cook_number("07e1"), Err(LexErrorKind::InvalidLeadingZero));
        assert_eq!(cook_number("0_7"), Err(LexErrorKind::InvalidLeadingZero));
    }

    #[test]
    fn test_bad_numbers() {
        assert_eq!(
            cook_number("0x"),
            Err(LexErrorKind::MissingRadixDigits { radix: 16 })
        );
        assert_eq!(
            cook_number("0b102"),
            Err(LexErrorKind::InvalidDigitForRadix { digit: '2', radix: 2 })
        );
        assert_eq!(cook_number("1e"), Err(LexErrorKind::EmptyExponent));
        assert_eq!(cook_number("1e+"), Err(LexErrorKind::EmptyExponent));
    }
}

//! Decoding of number and string literal text.
//!
//! The parser keeps constants as source text; they are decoded here each
//! time they are evaluated.

use lumen_ir::ConstantKind;

use crate::Value;

pub fn decode(kind: ConstantKind, text: &str) -> Value {
    match kind {
        ConstantKind::Number => Value::Number(decode_number(text)),
        ConstantKind::String => Value::Str(decode_string(text).into()),
    }
}

/// Value of a number literal: hex (`0x`), binary (`0b`), legacy octal (a `0`
/// followed only by octal digits) or decimal with optional fraction and
/// exponent. Malformed text is NaN.
pub fn decode_number(text: &str) -> f64 {
    let bytes = text.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', ..] => digits_value(&text[2..], 16),
        [b'0', b'b' | b'B', ..] => digits_value(&text[2..], 2),
        [b'0', rest @ ..] if !rest.is_empty() && rest.iter().all(|b| (b'0'..=b'7').contains(b)) => {
            digits_value(&text[1..], 8)
        }
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

/// Value of `digits` in `radix`, or NaN if there are none or any is out of
/// range.
pub(crate) fn digits_value(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return f64::NAN;
        };
        value = value * f64::from(radix) + f64::from(d);
    }
    value
}

/// Contents of a string literal: quotes stripped, escapes replaced.
///
/// `\n`, `\t` and `\r` name control characters; a backslash before any other
/// character stands for that character.
pub fn decode_string(text: &str) -> String {
    let inner = text
        .len()
        .checked_sub(1)
        .and_then(|end| text.get(1..end))
        .unwrap_or("");
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_prefixes() {
        assert_eq!(decode_number("0x1F"), 31.0);
        assert_eq!(decode_number("0XfF"), 255.0);
        assert_eq!(decode_number("0b101"), 5.0);
        assert_eq!(decode_number("0777"), 511.0);
        assert_eq!(decode_number("02"), 2.0);
    }

    #[test]
    fn decimals() {
        assert_eq!(decode_number("0"), 0.0);
        assert_eq!(decode_number("42"), 42.0);
        assert_eq!(decode_number(".5e2"), 50.0);
        assert_eq!(decode_number("5."), 5.0);
        assert_eq!(decode_number("10e10"), 100_000_000_000.0);
        assert_eq!(decode_number("2e-3"), 0.002);
        // Not octal: `8` is out of range, so it is decimal.
        assert_eq!(decode_number("08"), 8.0);
        assert_eq!(decode_number("0.5"), 0.5);
    }

    #[test]
    fn malformed_is_nan() {
        assert!(decode_number("0x").is_nan());
        assert!(decode_number("0b").is_nan());
        assert!(decode_number("1e").is_nan());
        assert!(decode_number("1e+").is_nan());
    }

    #[test]
    fn string_escapes() {
        assert_eq!(decode_string(r"'abc'"), "abc");
        assert_eq!(decode_string(r#""a\"b""#), "a\"b");
        assert_eq!(decode_string(r"'it\'s'"), "it's");
        assert_eq!(decode_string(r"'a\nb\tc\rd'"), "a\nb\tc\rd");
        assert_eq!(decode_string(r"'back\\slash'"), "back\\slash");
        assert_eq!(decode_string(r"'\q\u'"), "qu");
        assert_eq!(decode_string("''"), "");
        assert_eq!(decode_string("'é'"), "é");
    }

    #[test]
    fn decode_by_kind() {
        assert_eq!(decode(ConstantKind::Number, "0x10"), Value::from(16));
        assert_eq!(decode(ConstantKind::String, "'x'"), Value::from("x"));
    }
}

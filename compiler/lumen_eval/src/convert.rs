//! JavaScript type conversions: `ToBoolean`, `ToNumber`, `ToString`,
//! `ToPrimitive` and `ToPropertyKey`.

use std::sync::Arc;

use lumen_stack::ensure_sufficient_stack;

use crate::{Array, Value};

/// Truthiness.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Pending(_) => true,
    }
}

pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::Str(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_string(value)),
        Value::Object(_) | Value::Function(_) | Value::Pending(_) => f64::NAN,
    }
}

/// Objects and arrays become their string form; primitives are unchanged.
pub fn to_primitive(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Pending(_) => {
            Value::Str(to_string(value).into())
        }
        _ => value.clone(),
    }
}

pub fn to_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::Str(s) => s.to_string(),
        Value::Array(a) => array_to_string(a, &mut Vec::new()),
        Value::Object(_) => "[object Object]".to_owned(),
        Value::Function(_) => "function () { [native code] }".to_owned(),
        Value::Pending(_) => "[object Promise]".to_owned(),
    }
}

/// `Array::join(",")`. Nullish elements are empty, and an array met again
/// while it is already being joined is empty too, so cycles terminate.
fn array_to_string(array: &Array, visiting: &mut Vec<usize>) -> String {
    if visiting.contains(&array.id()) {
        return String::new();
    }
    visiting.push(array.id());
    let joined = ensure_sufficient_stack(|| {
        let parts: Vec<String> = array
            .to_vec()
            .iter()
            .map(|v| match v {
                Value::Undefined | Value::Null => String::new(),
                Value::Array(inner) => array_to_string(inner, visiting),
                _ => to_string(v),
            })
            .collect();
        parts.join(",")
    });
    visiting.pop();
    joined
}

/// The string a value names when used as a property key.
pub fn to_property_key(value: &Value) -> Arc<str> {
    match value {
        Value::Str(s) => Arc::clone(s),
        _ => to_string(value).into(),
    }
}

/// `StringToNumber`: surrounding white space is ignored, the empty string is
/// zero, anything else that is not a numeric literal is NaN.
fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return 0.0;
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return crate::constant::digits_value(&s[2..], radix);
    }
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // Rust also accepts `inf` and `nan`, which are not numbers here.
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// `Number::toString` with radix 10: the shortest digits that round-trip,
/// in positional notation for exponents in `-7..21` and scientific notation
/// otherwise.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    // `{:e}` gives the shortest round-trip digits as `d.ddde±x`.
    let sci = format!("{n:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, reason = "at most 17 digits")]
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        let zeros = "0".repeat((n - k).unsigned_abs() as usize);
        format!("{digits}{zeros}")
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n.unsigned_abs() as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        let zeros = "0".repeat(n.unsigned_abs() as usize);
        format!("0.{zeros}{digits}")
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let exp = (n - 1).unsigned_abs();
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{exp}")
        } else {
            format!("{first}.{rest}e{sign}{exp}")
        }
    }
}

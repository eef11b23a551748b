//! Built-in methods of arrays and strings.
//!
//! Each table is built once; reading `[].push` twice yields the same
//! function.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::convert::{to_number, to_string};
use crate::{strict_equals, EvalError, EvalResult, Function, Value};

type Method = fn(Value, Vec<Value>) -> EvalResult;

const ARRAY_METHODS: &[(&str, Method)] = &[
    ("concat", array_concat),
    ("includes", array_includes),
    ("indexOf", array_index_of),
    ("join", array_join),
    ("push", array_push),
    ("slice", array_slice),
];

const STRING_METHODS: &[(&str, Method)] = &[
    ("endsWith", string_ends_with),
    ("includes", string_includes),
    ("indexOf", string_index_of),
    ("startsWith", string_starts_with),
    ("toLowerCase", string_to_lower_case),
    ("toUpperCase", string_to_upper_case),
    ("trim", string_trim),
];

fn table(methods: &[(&'static str, Method)]) -> FxHashMap<&'static str, Function> {
    methods
        .iter()
        .map(|&(name, method)| (name, Function::new(method)))
        .collect()
}

pub fn array_method(name: &str) -> Option<Function> {
    static TABLE: OnceLock<FxHashMap<&'static str, Function>> = OnceLock::new();
    TABLE.get_or_init(|| table(ARRAY_METHODS)).get(name).cloned()
}

pub fn string_method(name: &str) -> Option<Function> {
    static TABLE: OnceLock<FxHashMap<&'static str, Function>> = OnceLock::new();
    TABLE.get_or_init(|| table(STRING_METHODS)).get(name).cloned()
}

// === Helpers ===

#[cold]
fn wrong_receiver(method: &str, expected: &str, found: &Value) -> EvalError {
    EvalError::host(format!(
        "{method}: receiver is {}, not {expected}",
        found.type_name()
    ))
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

/// Resolve a relative index argument against `len`, as `slice` does.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "clamped to 0..=len before converting"
)]
fn relative_index(value: &Value, len: usize, default: usize) -> usize {
    if matches!(value, Value::Undefined) {
        return default;
    }
    let n = to_number(value);
    let n = if n.is_nan() { 0.0 } else { n.trunc() };
    let len_f = len as f64;
    let resolved = if n < 0.0 { (len_f + n).max(0.0) } else { n.min(len_f) };
    resolved as usize
}

#[allow(clippy::cast_precision_loss, reason = "indices stay far below 2^53")]
fn index_value(index: Option<usize>) -> Value {
    index.map_or(Value::Number(-1.0), |i| Value::Number(i as f64))
}

// === Arrays ===

fn array_receiver(method: &str, receiver: &Value) -> Result<Vec<Value>, EvalError> {
    match receiver {
        Value::Array(array) => Ok(array.to_vec()),
        other => Err(wrong_receiver(method, "array", other)),
    }
}

/// Arrays among the arguments are spread, anything else is appended.
fn array_concat(receiver: Value, args: Vec<Value>) -> EvalResult {
    let mut values = array_receiver("concat", &receiver)?;
    for arg in args {
        match arg {
            Value::Array(array) => values.extend(array.to_vec()),
            other => values.push(other),
        }
    }
    Ok(Value::from(values))
}

fn array_includes(receiver: Value, args: Vec<Value>) -> EvalResult {
    let values = array_receiver("includes", &receiver)?;
    let needle = arg(&args, 0);
    // SameValueZero: NaN finds NaN.
    let found = values.iter().any(|v| {
        strict_equals(v, &needle)
            || matches!((v, &needle), (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan())
    });
    Ok(Value::Bool(found))
}

fn array_index_of(receiver: Value, args: Vec<Value>) -> EvalResult {
    let values = array_receiver("indexOf", &receiver)?;
    let needle = arg(&args, 0);
    Ok(index_value(values.iter().position(|v| strict_equals(v, &needle))))
}

fn array_join(receiver: Value, args: Vec<Value>) -> EvalResult {
    let values = array_receiver("join", &receiver)?;
    let separator = match arg(&args, 0) {
        Value::Undefined => ",".to_owned(),
        other => to_string(&other),
    };
    let parts: Vec<String> = values
        .iter()
        .map(|v| if v.is_nullish() { String::new() } else { to_string(v) })
        .collect();
    Ok(Value::from(parts.join(&separator)))
}

fn array_push(receiver: Value, args: Vec<Value>) -> EvalResult {
    let Value::Array(array) = &receiver else {
        return Err(wrong_receiver("push", "array", &receiver));
    };
    let mut len = array.len();
    for arg in args {
        len = array.push(arg);
    }
    Ok(index_value(Some(len)))
}

fn array_slice(receiver: Value, args: Vec<Value>) -> EvalResult {
    let values = array_receiver("slice", &receiver)?;
    let len = values.len();
    let start = relative_index(&arg(&args, 0), len, 0);
    let end = relative_index(&arg(&args, 1), len, len);
    Ok(Value::array(
        values.get(start..end.max(start)).unwrap_or(&[]).iter().cloned(),
    ))
}

// === Strings ===

fn string_receiver<'a>(method: &str, receiver: &'a Value) -> Result<&'a str, EvalError> {
    receiver
        .as_str()
        .ok_or_else(|| wrong_receiver(method, "string", receiver))
}

fn string_to_upper_case(receiver: Value, _args: Vec<Value>) -> EvalResult {
    Ok(Value::from(string_receiver("toUpperCase", &receiver)?.to_uppercase()))
}

fn string_to_lower_case(receiver: Value, _args: Vec<Value>) -> EvalResult {
    Ok(Value::from(string_receiver("toLowerCase", &receiver)?.to_lowercase()))
}

fn string_trim(receiver: Value, _args: Vec<Value>) -> EvalResult {
    Ok(Value::from(string_receiver("trim", &receiver)?.trim()))
}

fn string_includes(receiver: Value, args: Vec<Value>) -> EvalResult {
    let s = string_receiver("includes", &receiver)?;
    Ok(Value::Bool(s.contains(to_string(&arg(&args, 0)).as_str())))
}

fn string_starts_with(receiver: Value, args: Vec<Value>) -> EvalResult {
    let s = string_receiver("startsWith", &receiver)?;
    Ok(Value::Bool(s.starts_with(to_string(&arg(&args, 0)).as_str())))
}

fn string_ends_with(receiver: Value, args: Vec<Value>) -> EvalResult {
    let s = string_receiver("endsWith", &receiver)?;
    Ok(Value::Bool(s.ends_with(to_string(&arg(&args, 0)).as_str())))
}

/// Index in UTF-16 code units, like the rest of the string properties.
fn string_index_of(receiver: Value, args: Vec<Value>) -> EvalResult {
    let s = string_receiver("indexOf", &receiver)?;
    let needle = to_string(&arg(&args, 0));
    let index = s
        .find(needle.as_str())
        .map(|byte| s[..byte].encode_utf16().count());
    Ok(index_value(index))
}

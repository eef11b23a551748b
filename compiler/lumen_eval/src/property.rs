//! Property reads and writes.
//!
//! Objects are keyed by string. Arrays have their elements under canonical
//! index keys (`"0"`, `"1"`, ...) plus `length` and a few methods. Strings
//! have `length` and single-character index reads, measured in UTF-16 code
//! units. Other primitives have no properties.

use crate::convert::number_to_string;
use crate::errors::{cannot_read_property, cannot_set_property, invalid_array_length};
use crate::methods;
use crate::{to_number, EvalError, EvalResult, Value};

/// Parse a canonical array index: digits without a leading zero.
fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    key.parse().ok()
}

/// Read `target[key]`. The result may itself be pending.
pub fn get_property(target: &Value, key: &str) -> EvalResult {
    let value = match target {
        Value::Undefined | Value::Null => {
            return Err(cannot_read_property(key, target.type_name()));
        }
        Value::Object(object) => object.get(key).unwrap_or(Value::Undefined),
        Value::Array(array) => {
            if let Some(index) = array_index(key) {
                array.get(index).unwrap_or(Value::Undefined)
            } else if key == "length" {
                #[allow(clippy::cast_precision_loss, reason = "array lengths stay far below 2^53")]
                let len = array.len() as f64;
                Value::Number(len)
            } else {
                methods::array_method(key).map_or(Value::Undefined, Value::Function)
            }
        }
        Value::Str(s) => {
            if let Some(index) = array_index(key) {
                s.encode_utf16()
                    .nth(index)
                    .map_or(Value::Undefined, |unit| {
                        Value::from(String::from_utf16_lossy(&[unit]))
                    })
            } else if key == "length" {
                Value::Number(f64::from(
                    u32::try_from(s.encode_utf16().count()).unwrap_or(u32::MAX),
                ))
            } else {
                methods::string_method(key).map_or(Value::Undefined, Value::Function)
            }
        }
        Value::Bool(_) | Value::Number(_) | Value::Function(_) | Value::Pending(_) => {
            Value::Undefined
        }
    };
    Ok(value)
}

/// Write `target[key] = value`.
pub fn set_property(target: &Value, key: &str, value: Value) -> Result<(), EvalError> {
    match target {
        Value::Object(object) => {
            object.insert(key, value);
            Ok(())
        }
        Value::Array(array) => {
            if let Some(index) = array_index(key) {
                return array.set(index, value);
            }
            if key == "length" {
                let len = to_number(&value);
                if !(len >= 0.0 && len.fract() == 0.0) {
                    return Err(invalid_array_length(number_to_string(len)));
                }
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "checked non-negative and integral; saturates past usize::MAX"
                )]
                let len = len as usize;
                return array.set_len(len);
            }
            Err(cannot_set_property(key, target.type_name()))
        }
        _ => Err(cannot_set_property(key, target.type_name())),
    }
}

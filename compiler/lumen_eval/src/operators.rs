//! Built-in operator semantics.
//!
//! Operands arrive already resolved. Dispatch is a `match` on the operator;
//! configured operators are looked up in the [`OperatorRegistry`] first, so
//! they may also replace a built-in.

use std::cmp::Ordering;

use lumen_ir::{BinaryOp, UnaryOp};

use crate::convert::{to_boolean, to_number, to_primitive, to_string};
use crate::errors::unsupported_operator;
use crate::{EvalResult, OperatorRegistry, Value};

/// Apply a binary operator of the equality, relational, additive or
/// multiplicative level.
pub fn evaluate_binary(
    registry: &OperatorRegistry,
    op: &BinaryOp,
    left: Value,
    right: Value,
) -> EvalResult {
    if let Some(f) = registry.binary(op.as_symbol()) {
        return f(left, right);
    }
    let value = match op {
        BinaryOp::Eq => Value::Bool(loose_equals(&left, &right)),
        BinaryOp::NotEq => Value::Bool(!loose_equals(&left, &right)),
        BinaryOp::StrictEq => Value::Bool(strict_equals(&left, &right)),
        BinaryOp::StrictNotEq => Value::Bool(!strict_equals(&left, &right)),
        BinaryOp::Lt => Value::Bool(compare(&left, &right) == Some(Ordering::Less)),
        BinaryOp::LtEq => Value::Bool(matches!(
            compare(&left, &right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::Gt => Value::Bool(compare(&left, &right) == Some(Ordering::Greater)),
        BinaryOp::GtEq => Value::Bool(matches!(
            compare(&left, &right),
            Some(Ordering::Greater | Ordering::Equal)
        )),
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub => Value::Number(to_number(&left) - to_number(&right)),
        BinaryOp::Mul => Value::Number(to_number(&left) * to_number(&right)),
        BinaryOp::Div => Value::Number(to_number(&left) / to_number(&right)),
        BinaryOp::Rem => Value::Number(to_number(&left) % to_number(&right)),
        BinaryOp::Custom(symbol) => return Err(unsupported_operator(symbol)),
    };
    Ok(value)
}

pub fn evaluate_unary(registry: &OperatorRegistry, op: &UnaryOp, operand: Value) -> EvalResult {
    if let Some(f) = registry.unary(op.as_symbol()) {
        return f(operand);
    }
    let value = match op {
        UnaryOp::Plus => Value::Number(to_number(&operand)),
        UnaryOp::Neg => Value::Number(-to_number(&operand)),
        UnaryOp::Not => Value::Bool(!to_boolean(&operand)),
        UnaryOp::Custom(symbol) => return Err(unsupported_operator(symbol)),
    };
    Ok(value)
}

/// `+`: string concatenation if either primitive form is a string,
/// numeric addition otherwise.
fn add(left: &Value, right: &Value) -> Value {
    let (left, right) = (to_primitive(left), to_primitive(right));
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        let mut s = to_string(&left);
        s.push_str(&to_string(&right));
        return Value::Str(s.into());
    }
    Value::Number(to_number(&left) + to_number(&right))
}

/// Relational ordering. Two strings compare by UTF-16 code units, anything
/// else numerically; `None` when either side is NaN.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let (left, right) = (to_primitive(left), to_primitive(right));
    if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
        return Some(a.encode_utf16().cmp(b.encode_utf16()));
    }
    to_number(&left).partial_cmp(&to_number(&right))
}

/// `===`: same type and value; containers and functions by identity.
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        (Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// `==`: `null` and `undefined` equal each other and nothing else; other
/// mixed types are compared after conversion to primitives and numbers.
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    if std::mem::discriminant(left) == std::mem::discriminant(right) {
        return strict_equals(left, right);
    }
    match (left, right) {
        (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
        (Value::Number(n), Value::Str(_)) => *n == to_number(right),
        (Value::Str(_), Value::Number(n)) => to_number(left) == *n,
        (Value::Bool(_), _) => loose_equals(&Value::Number(to_number(left)), right),
        (_, Value::Bool(_)) => loose_equals(left, &Value::Number(to_number(right))),
        (Value::Array(_) | Value::Object(_) | Value::Function(_), Value::Number(_) | Value::Str(_))
        | (Value::Number(_) | Value::Str(_), Value::Array(_) | Value::Object(_) | Value::Function(_)) => {
            loose_equals(&to_primitive(left), &to_primitive(right))
        }
        _ => false,
    }
}

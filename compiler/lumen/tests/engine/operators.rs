//! Engines with configured operators.

use lumen::{ConfigError, Engine, EvalError, OperatorGroup, Value};
use pretty_assertions::assert_eq;

use crate::common::{empty, init_tracing, object};

fn number(value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| EvalError::host(format!("expected a number, found {}", value.type_name())))
}

fn engine() -> Engine {
    Engine::builder()
        .binary_operator(OperatorGroup::Additive, "++", |a, b| {
            Ok(Value::string(format!("{a}{b}")))
        })
        .binary_operator(OperatorGroup::Multiplicative, "**", |a, b| {
            Ok(Value::from(number(&a)?.powf(number(&b)?)))
        })
        .binary_operator(OperatorGroup::Equality, "~=", |a, b| {
            Ok(Value::from((number(&a)? - number(&b)?).abs() < 0.01))
        })
        .unary_operator("#", |v| {
            let len = match v {
                Value::Array(array) => array.len(),
                other => other.to_string().len(),
            };
            Ok(Value::from(u32::try_from(len).unwrap_or(u32::MAX)))
        })
        .build()
        .unwrap()
}

async fn eval(engine: &Engine, source: &str) -> Value {
    engine
        .parse(source)
        .unwrap()
        .evaluate(Value::Undefined, empty())
        .await
        .unwrap()
}

#[tokio::test]
async fn custom_operators_take_their_group_precedence() {
    init_tracing();
    let engine = engine();
    assert_eq!(eval(&engine, "1 + 2 ** 3").await, Value::from(9));
    assert_eq!(eval(&engine, "2 ** 3 ** 2").await, Value::from(64));
    assert_eq!(eval(&engine, "'a' ++ 1 + 2").await, Value::from("a12"));
    assert_eq!(eval(&engine, "1 ++ 2 * 3").await, Value::from("16"));
    assert_eq!(eval(&engine, "0.1 + 0.2 ~= 0.3").await, Value::from(true));
    assert_eq!(eval(&engine, "10 / 3 ~= 3.33").await, Value::from(true));
    assert_eq!(eval(&engine, "1 ~= 1.5").await, Value::from(false));
}

#[tokio::test]
async fn builtins_still_work_beside_custom_operators() {
    let engine = engine();
    assert_eq!(eval(&engine, "1 + +2").await, Value::from(3));
    assert_eq!(eval(&engine, "6 * 7").await, Value::from(42));
    assert_eq!(eval(&engine, "3 == '3'").await, Value::from(true));
}

#[tokio::test]
async fn custom_unary_operator() {
    let engine = engine();
    assert_eq!(eval(&engine, "#[1, 2, 3]").await, Value::from(3));
    assert_eq!(eval(&engine, "#'four' + 1").await, Value::from(5));
    assert_eq!(eval(&engine, "!#[]").await, Value::from(true));
}

#[tokio::test]
async fn overriding_a_builtin_operator() {
    let engine = Engine::builder()
        .binary_operator(OperatorGroup::Additive, "-", |a, b| {
            Ok(Value::string(format!("{a} minus {b}")))
        })
        .build()
        .unwrap();
    assert_eq!(eval(&engine, "5 - 3").await, Value::from("5 minus 3"));
    // Unary minus is a separate operator.
    assert_eq!(eval(&engine, "-5").await, Value::from(-5));
    // The default engine is unaffected.
    let value = lumen::eval("5 - 3", Value::Undefined, empty()).await.unwrap();
    assert_eq!(value, Value::from(2));
}

#[tokio::test]
async fn custom_operator_errors_propagate() {
    let engine = engine();
    let err = engine
        .parse("x ** 2")
        .unwrap()
        .evaluate(Value::Undefined, object([("x", Value::from("two"))]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "expected a number, found string");
}

#[test]
fn removed_operators_are_not_recognized() {
    let engine = Engine::builder()
        .remove_operator(OperatorGroup::Multiplicative, "%")
        .build()
        .unwrap();
    assert!(engine.parse("7 % 2").is_err());
    assert!(lumen::parse("7 % 2").is_ok());
}

#[test]
fn invalid_configuration_is_reported_by_build() {
    let err = Engine::builder()
        .binary_operator(OperatorGroup::Assignment, ":=", |_, b| Ok(b))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotBinaryGroup { .. }));

    let err: lumen::Error = Engine::builder()
        .unary_operator("not", Ok)
        .build()
        .unwrap_err()
        .into();
    assert_eq!(err.to_string(), "invalid operator symbol: \"not\"");
}

//! Parse and evaluation failures as the host sees them.

use lumen::{Error, EvalErrorKind, Location, ParseErrorKind, Value};
use pretty_assertions::assert_eq;

use crate::common::{empty, object};

async fn eval_err(source: &str, environment: Value) -> Error {
    lumen::eval(source, Value::Undefined, environment)
        .await
        .unwrap_err()
}

#[tokio::test]
async fn parse_errors_carry_positions() {
    let Error::Parse(err) = eval_err("a +", empty()).await else {
        panic!("expected a parse error");
    };
    assert_eq!(
        err.to_string(),
        "Expected expression but was end of input, at line: 1, column: 4."
    );

    let err = lumen::parse("a +\n\t)").unwrap_err();
    assert_eq!(err.location, Location { line: 2, column: 5 });
    assert_eq!(err.found, ")");
}

#[test]
fn lexical_errors_are_parse_errors() {
    let err = lumen::parse("'open").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Lexical(_)));
    let err = lumen::parse("1 /* open").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Lexical(_)));
}

#[test]
fn invalid_assignment_is_rejected_when_parsing() {
    let err = lumen::parse("a + 1 = 2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Trying to assign to a non l-value: 'a + 1', at line: 1, column: 1."
    );
}

#[test]
fn trailing_input() {
    let err = lumen::parse("a b").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedTrailingInput { rest: "b".into() }
    );
}

#[tokio::test]
async fn reading_through_nullish_values() {
    let Error::Eval(err) = eval_err("config.missing.value", object([("config", object([]))])).await
    else {
        panic!("expected an evaluation error");
    };
    assert_eq!(
        err.to_string(),
        "Cannot read properties of undefined (reading 'value')"
    );

    let err = eval_err("null.x", empty()).await;
    assert_eq!(
        err.to_string(),
        "Cannot read properties of null (reading 'x')"
    );
}

#[tokio::test]
async fn writing_to_primitives() {
    let Error::Eval(err) = eval_err("n.x = 1", object([("n", Value::from(5))])).await else {
        panic!("expected an evaluation error");
    };
    assert!(matches!(
        err.kind,
        EvalErrorKind::CannotSetProperty { .. }
    ));
}

#[tokio::test]
async fn calling_non_functions() {
    let err = eval_err("a.b(1)", object([("a", object([("b", Value::from("s"))]))])).await;
    assert_eq!(err.to_string(), "a.b is not a function (found string)");
}

#[tokio::test]
async fn host_errors_surface_unchanged() {
    let environment = object([(
        "fail",
        Value::function(|_, args| Err(lumen::EvalError::host(format!("failed with {}", args.len())))),
    )]);
    let err = eval_err("1 + fail(1, 2)", environment).await;
    assert_eq!(err, Error::Eval(lumen::EvalError::host("failed with 2")));
}

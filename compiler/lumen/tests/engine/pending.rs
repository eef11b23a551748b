//! Asynchronous values and `invoke`.

use std::time::Duration;

use lumen::Value;
use pretty_assertions::assert_eq;

use crate::common::{empty, init_tracing, later, object};

#[test]
fn invoke_returns_ready_values_directly() {
    let expr = lumen::parse("a * 2 + b.length").unwrap();
    let environment = object([("a", Value::from(4)), ("b", Value::from("xyz"))]);
    let value = expr.invoke(Value::Undefined, environment).unwrap();
    assert!(!value.is_pending());
    assert_eq!(value, Value::from(11));
}

#[test]
fn invoke_reports_errors_directly() {
    let expr = lumen::parse("missing()").unwrap();
    let err = expr.invoke(Value::Undefined, empty()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing is not a function (found undefined)"
    );
}

#[tokio::test]
async fn invoke_suspends_on_pending_values() {
    let expr = lumen::parse("x + y").unwrap();
    let environment = object([("x", later(10, 5)), ("y", later(20, 1))]);
    let value = expr.invoke(Value::Undefined, environment).unwrap();
    assert!(value.is_pending());
    assert_eq!(value.resolve().await.unwrap(), Value::from(30));
}

#[test]
fn already_resolved_pending_values_do_not_suspend() {
    let ready = Value::pending(async { Ok(Value::from(2)) });
    let expr = lumen::parse("x * 21").unwrap();
    let value = expr
        .invoke(Value::Undefined, object([("x", ready)]))
        .unwrap();
    assert_eq!(value, Value::from(42));
}

#[tokio::test]
async fn pending_values_anywhere() {
    init_tracing();
    let receiver = object([("scale", later(3, 2))]);
    let environment = object([
        ("config", later(object([("base", later(5, 1))]), 1)),
        (
            "fetch",
            Value::function(|_, args| Ok(later(Value::array(args), 2))),
        ),
    ]);
    let value = lumen::eval(
        "fetch(config.base, this.scale)[1] * config.base",
        receiver,
        environment,
    )
    .await
    .unwrap();
    assert_eq!(value, Value::from(15));
}

#[tokio::test]
async fn operands_resolve_concurrently() {
    let expr = lumen::parse("a + b").unwrap();
    let environment = object([("a", later(1, 150)), ("b", later(2, 150))]);
    let value = tokio::time::timeout(
        Duration::from_millis(280),
        expr.evaluate(Value::Undefined, environment),
    )
    .await
    .expect("operands should be awaited together")
    .unwrap();
    assert_eq!(value, Value::from(3));
}

#[tokio::test]
async fn failed_pending_value_aborts_evaluation() {
    let failing = Value::pending(async { Err(lumen::EvalError::host("lookup failed")) });
    let err = lumen::eval("1 + x", Value::Undefined, object([("x", failing)]))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "lookup failed");
}

#[tokio::test]
async fn evaluations_run_in_parallel_tasks() {
    let expr = lumen::parse("n * n").unwrap();
    let tasks: Vec<_> = (0..8_i32)
        .map(|n| {
            let expr = expr.clone();
            tokio::spawn(async move {
                let environment = object([("n", later(n, 1))]);
                expr.evaluate(Value::Undefined, environment).await
            })
        })
        .collect();
    for (n, task) in tasks.into_iter().enumerate() {
        let value = task.await.unwrap().unwrap();
        assert_eq!(value, Value::from(i32::try_from(n * n).unwrap()));
    }
}

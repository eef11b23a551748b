//! Parse once, evaluate against receivers and environments.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lumen::{Engine, Expr, Value};
use pretty_assertions::assert_eq;

use crate::common::{args, counter, empty, getter, init_tracing, object, returning};

async fn eval(source: &str) -> Value {
    lumen::eval(source, Value::Undefined, empty()).await.unwrap()
}

#[test]
fn parsing_is_deterministic() {
    let source = "a.b(1, [2, ,3], {x, [k]: 'v'}) ? !c : d = e || f";
    let first = lumen::parse(source).unwrap();
    let second = lumen::parse(source).unwrap();
    assert_eq!(first.ast(), second.ast());
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn literal_singletons_are_shared_across_expressions() {
    let (Expr::Literal(a), Expr::Literal(b)) = (
        lumen::parse("true").unwrap().ast().clone(),
        Engine::new().parse("true").unwrap().ast().clone(),
    ) else {
        panic!("expected literals");
    };
    assert!(std::ptr::eq(a, b));
}

#[tokio::test]
async fn containers_are_fresh_per_evaluation() {
    let expr = lumen::parse("[{}, []]").unwrap();
    let first = expr.evaluate(Value::Undefined, empty()).await.unwrap();
    let second = expr.evaluate(Value::Undefined, empty()).await.unwrap();
    assert_eq!(first, second);
    let (Value::Array(a), Value::Array(b)) = (&first, &second) else {
        panic!("expected arrays");
    };
    assert!(!a.ptr_eq(b));
    let (Some(Value::Object(x)), Some(Value::Object(y))) = (a.get(0), b.get(0)) else {
        panic!("expected objects");
    };
    assert!(!x.ptr_eq(&y));
}

#[tokio::test]
async fn numeric_constants() {
    assert_eq!(eval("0x1F").await, Value::from(31));
    assert_eq!(eval("0b101").await, Value::from(5));
    assert_eq!(eval("0777").await, Value::from(511));
    assert_eq!(eval(".5e2").await, Value::from(50));
    assert_eq!(eval("10e10").await, Value::from(100_000_000_000.0));
}

#[tokio::test]
async fn short_circuit_skips_side_effects() {
    let calls = Arc::new(AtomicUsize::new(0));
    let environment = object([("sideEffect", counter(&calls))]);
    for source in ["false && sideEffect()", "true || sideEffect()"] {
        lumen::eval(source, Value::Undefined, environment.clone())
            .await
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ternary_does_not_read_the_other_branch() {
    let reads = Arc::new(AtomicUsize::new(0));
    let tracked = {
        let reads = Arc::clone(&reads);
        Value::pending(async move {
            reads.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from("b"))
        })
    };
    let environment = object([
        ("a", Value::from(false)),
        ("b", tracked),
        ("c", Value::from("c")),
    ]);
    let value = lumen::eval("a ? b : c", Value::Undefined, environment)
        .await
        .unwrap();
    assert_eq!(value, Value::from("c"));
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn receiver_binding() {
    let receiver = object([("name", Value::from("root"))]);
    let environment = object([
        (
            "obj",
            object([("name", Value::from("obj")), ("get", getter("name"))]),
        ),
        ("get", getter("name")),
    ]);
    let expr = lumen::parse("[obj.get(), get(), obj['get']()]").unwrap();
    let value = expr.evaluate(receiver, environment).await.unwrap();
    assert_eq!(
        value,
        Value::array([Value::from("obj"), Value::from("root"), Value::from("obj")])
    );
}

#[tokio::test]
async fn assignment_writes_the_environment() {
    let receiver = object([]);
    let environment = object([]);
    let value = lumen::eval("x = 1", receiver.clone(), environment.clone())
        .await
        .unwrap();
    assert_eq!(value, Value::from(1));

    let (Value::Object(env), Value::Object(this)) = (&environment, &receiver) else {
        panic!("expected objects");
    };
    assert_eq!(env.get("x"), Some(Value::from(1)));
    assert_eq!(this.get("x"), None);
    let read_back = lumen::eval("this.x", receiver, environment).await.unwrap();
    assert_eq!(read_back, Value::Undefined);
}

#[tokio::test]
async fn array_length() {
    assert_eq!(eval("[1,2,3].length").await, Value::from(3));
    assert_eq!(eval("'héllo'.length").await, Value::from(5));
}

#[tokio::test]
async fn one_expression_many_environments() {
    let expr = lumen::parse("price * qty").unwrap();
    for (price, qty, total) in [(2, 3, 6), (5, 0, 0), (7, 7, 49)] {
        let environment = object([("price", Value::from(price)), ("qty", Value::from(qty))]);
        let value = expr.evaluate(Value::Undefined, environment).await.unwrap();
        assert_eq!(value, Value::from(total));
    }
}

#[tokio::test]
async fn mixed_expression() {
    init_tracing();
    let receiver = object([
        ("x", Value::from(10)),
        ("yyy", returning(object([("xxx", Value::from("xxx"))]))),
    ]);
    let environment = object([
        ("x", Value::from(10)),
        ("y", Value::from(20)),
        ("z", Value::from(30)),
        ("rnd", returning(0.25)),
        ("zzz", returning(object([("xxx", Value::from("xxx"))]))),
        (
            "a",
            object([(
                "b",
                object([(
                    "c",
                    object([("d", object([("e", object([("f", args())]))]))]),
                )]),
            )]),
        ),
    ]);
    let source = r#"w = {"v": 5},[w.v, 0x10 + 10e10, 6 * 6, (110-10)/this.x, this.yyy().xxx, zzz().xxx, [x, y, z].concat(1, 2, 3), { "r": rnd(), x, ["y"]: y, 30: [z] }['y'], a.b.c.d.e.f(1,2,3,4,5)]"#;

    let value = lumen::eval(source, receiver, environment.clone())
        .await
        .unwrap();
    let numbers = |ns: &[i32]| Value::array(ns.iter().map(|&n| Value::from(n)));
    assert_eq!(
        value,
        Value::array([
            Value::from(5),
            Value::from(100_000_000_016.0),
            Value::from(36),
            Value::from(10),
            Value::from("xxx"),
            Value::from("xxx"),
            numbers(&[10, 20, 30, 1, 2, 3]),
            Value::from(20),
            numbers(&[1, 2, 3, 4, 5]),
        ])
    );
    let Value::Object(env) = environment else {
        panic!("expected object");
    };
    assert_eq!(env.get("w"), Some(object([("v", Value::from(5))])));
}

#[tokio::test]
async fn display_is_reparseable() {
    let expr = lumen::parse("a  +  b*(c - d) ,  {x:1}['x']").unwrap();
    let again = lumen::parse(&expr.to_string()).unwrap();
    assert_eq!(expr.ast(), again.ast());

    let environment = object([
        ("a", Value::from(1)),
        ("b", Value::from(2)),
        ("c", Value::from(5)),
        ("d", Value::from(3)),
    ]);
    let value = again.evaluate(Value::Undefined, environment).await.unwrap();
    assert_eq!(value, Value::from(1));
}

//! Shared helpers for the end-to-end tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use lumen::Value;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=lumen_eval=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

pub fn object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::object(entries)
}

pub fn empty() -> Value {
    Value::object(Vec::<(&str, Value)>::new())
}

/// A value that becomes `value` after `millis` milliseconds.
pub fn later(value: impl Into<Value>, millis: u64) -> Value {
    let value = value.into();
    Value::pending(async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(value)
    })
}

/// A host function returning its arguments as an array.
pub fn args() -> Value {
    Value::function(|_, args| Ok(Value::array(args)))
}

/// A host function returning a constant.
pub fn returning(value: impl Into<Value>) -> Value {
    let value = value.into();
    Value::function(move |_, _| Ok(value.clone()))
}

/// A host function counting its calls.
pub fn counter(calls: &Arc<AtomicUsize>) -> Value {
    let calls = Arc::clone(calls);
    Value::function(move |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::from(true))
    })
}

/// A host function returning the property `name` of its receiver.
pub fn getter(name: &'static str) -> Value {
    Value::function(move |receiver, _| match receiver {
        Value::Object(object) => Ok(object.get(name).unwrap_or(Value::Undefined)),
        _ => Ok(Value::Undefined),
    })
}

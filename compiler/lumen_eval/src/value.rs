//! Runtime values.
//!
//! Containers are shared and mutable: cloning a [`Value::Array`] or
//! [`Value::Object`] clones a handle, not the contents, and `===` compares
//! handles. Locks are taken only for the duration of a single read or write
//! and are never held while a future is awaited.
//!
//! A [`Value::Pending`] is a value that is not available yet. The evaluator
//! resolves it wherever it is read, so expression authors never see one.

use std::fmt;
use std::future::Future;
use std::hash::BuildHasherDefault;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use indexmap::IndexMap;
use lumen_stack::ensure_sufficient_stack;
use parking_lot::RwLock;
use rustc_hash::FxHasher;

use crate::convert::number_to_string;
use crate::errors::invalid_array_length;
use crate::{EvalError, EvalResult};

/// A value the evaluator computes with.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Arc<str>),
    Array(Array),
    Object(Object),
    Function(Function),
    Pending(Pending),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// A fresh array holding `values`.
    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(values.into_iter().collect())
    }

    /// A fresh object holding `entries`. Later duplicates win.
    pub fn object<K: Into<Arc<str>>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(entries.into_iter().collect())
    }

    /// A host function called with `(receiver, arguments)`.
    pub fn function(f: impl Fn(Value, Vec<Value>) -> EvalResult + Send + Sync + 'static) -> Self {
        Value::Function(Function::new(f))
    }

    /// A value that becomes available when `future` completes.
    pub fn pending(future: impl Future<Output = EvalResult> + Send + 'static) -> Self {
        Value::Pending(Pending::new(future))
    }

    /// Name of the value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Pending(_) => "pending",
        }
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Value::Pending(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Wait for this value if it is pending, repeatedly, until it is not.
    pub async fn resolve(self) -> EvalResult {
        let mut value = self;
        while let Value::Pending(pending) = value {
            value = pending.await?;
        }
        Ok(value)
    }
}

/// Structural comparison, for tests and host code.
///
/// Containers compare by contents, functions and pending values by
/// identity. Expression `===` is [`crate::strict_equals`]. Two containers
/// already being compared further up count as equal, so cyclic values
/// terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structural_eq(self, other, &mut Vec::new())
    }
}

fn structural_eq(a: &Value, b: &Value, visiting: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let pair = (a.id(), b.id());
            if visiting.contains(&pair) {
                return true;
            }
            let (a, b) = (a.to_vec(), b.to_vec());
            visiting.push(pair);
            let equal = a.len() == b.len()
                && ensure_sufficient_stack(|| {
                    a.iter().zip(&b).all(|(x, y)| structural_eq(x, y, visiting))
                });
            visiting.pop();
            equal
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let pair = (a.id(), b.id());
            if visiting.contains(&pair) {
                return true;
            }
            let (a, b) = (a.entries(), b.snapshot());
            visiting.push(pair);
            let equal = a.len() == b.len()
                && ensure_sufficient_stack(|| {
                    a.iter()
                        .all(|(k, x)| b.get(k).is_some_and(|y| structural_eq(x, y, visiting)))
                });
            visiting.pop();
            equal
        }
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        (Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// Objects list their keys in insertion order. A container that contains
/// itself prints as `[Circular]` where it recurs.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(self, f, &mut Vec::new())
    }
}

fn write_debug(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    visiting: &mut Vec<usize>,
) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&number_to_string(*n)),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::Array(a) => {
            if visiting.contains(&a.id()) {
                return f.write_str("[Circular]");
            }
            visiting.push(a.id());
            let result = ensure_sufficient_stack(|| {
                f.write_str("[")?;
                for (i, item) in a.to_vec().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_debug(item, f, visiting)?;
                }
                f.write_str("]")
            });
            visiting.pop();
            result
        }
        Value::Object(o) => {
            if visiting.contains(&o.id()) {
                return f.write_str("[Circular]");
            }
            visiting.push(o.id());
            let result = ensure_sufficient_stack(|| {
                f.write_str("{")?;
                for (i, (k, v)) in o.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: ")?;
                    write_debug(v, f, visiting)?;
                }
                f.write_str("}")
            });
            visiting.pop();
            result
        }
        Value::Function(_) => f.write_str("[Function]"),
        Value::Pending(_) => f.write_str("[Pending]"),
    }
}

/// `ToString`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(Array::new(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Pending> for Value {
    fn from(p: Pending) -> Self {
        Value::Pending(p)
    }
}

// === Containers ===

/// Shared, growable list.
#[derive(Clone, Default)]
pub struct Array(Arc<RwLock<Vec<Value>>>);

impl Array {
    /// Longest an array may grow through an index or `length` write.
    pub const MAX_LEN: usize = 1 << 20;

    pub fn new(values: Vec<Value>) -> Self {
        Array(Arc::new(RwLock::new(values)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Store `value` at `index`, padding with `undefined` as needed.
    ///
    /// Fails without changing the array when `index` would grow it past
    /// [`Array::MAX_LEN`].
    pub fn set(&self, index: usize, value: Value) -> Result<(), EvalError> {
        let mut values = self.0.write();
        if index >= values.len() {
            let len = index.saturating_add(1);
            if len > Self::MAX_LEN {
                return Err(invalid_array_length(len));
            }
            values.resize(len, Value::Undefined);
        }
        values[index] = value;
        Ok(())
    }

    /// Append `value`, returning the new length.
    pub fn push(&self, value: Value) -> usize {
        let mut values = self.0.write();
        values.push(value);
        values.len()
    }

    /// Truncate, or pad with `undefined`, to `len` elements.
    pub fn set_len(&self, len: usize) -> Result<(), EvalError> {
        if len > Self::MAX_LEN {
            return Err(invalid_array_length(len));
        }
        self.0.write().resize(len, Value::Undefined);
        Ok(())
    }

    /// Copy of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the shared storage, for cycle detection.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array::new(iter.into_iter().collect())
    }
}

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Shared, string-keyed map. Keys keep the order they were first inserted
/// in; overwriting a key leaves its position unchanged.
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<FxIndexMap<Arc<str>, Value>>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<Arc<str>>, value: Value) {
        self.0.write().insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Copy of the current entries, in insertion order.
    pub fn entries(&self) -> Vec<(Arc<str>, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (Arc::clone(k), v.clone()))
            .collect()
    }

    /// Copy of the current map, so lookups need no lock.
    fn snapshot(&self) -> FxIndexMap<Arc<str>, Value> {
        self.0.read().clone()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let map = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Object(Arc::new(RwLock::new(map)))
    }
}

// === Callables and futures ===

type NativeFn = dyn Fn(Value, Vec<Value>) -> EvalResult + Send + Sync;

/// A host function. Receives the call's receiver and its arguments.
///
/// An asynchronous host function returns a [`Value::Pending`]; the
/// evaluator waits for it before the call completes.
#[derive(Clone)]
pub struct Function(Arc<NativeFn>);

impl Function {
    pub fn new(f: impl Fn(Value, Vec<Value>) -> EvalResult + Send + Sync + 'static) -> Self {
        Function(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, receiver: Value, args: Vec<Value>) -> EvalResult {
        (self.0)(receiver, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A shared future. Every clone observes the same outcome, and the
/// underlying future runs once no matter how many clones are awaited.
#[derive(Clone)]
pub struct Pending(Shared<BoxFuture<'static, EvalResult>>);

impl Pending {
    pub fn new(future: impl Future<Output = EvalResult> + Send + 'static) -> Self {
        Pending(future.boxed().shared())
    }

    /// The outcome, if the future has already completed.
    pub fn peek(&self) -> Option<&EvalResult> {
        self.0.peek()
    }

    pub fn ptr_eq(&self, other: &Pending) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Future for Pending {
    type Output = EvalResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<EvalResult> {
        Pin::new(&mut self.0).poll(cx)
    }
}

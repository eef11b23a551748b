//! Implementations for configured operators.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{EvalResult, Value};

pub type BinaryFn = Arc<dyn Fn(Value, Value) -> EvalResult + Send + Sync>;
pub type UnaryFn = Arc<dyn Fn(Value) -> EvalResult + Send + Sync>;

/// Operator implementations keyed by symbol.
///
/// An entry for a built-in symbol such as `+` replaces the built-in
/// behaviour. Binary and unary entries are separate, so `-` can have both.
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    binary: FxHashMap<Arc<str>, BinaryFn>,
    unary: FxHashMap<Arc<str>, UnaryFn>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_binary(
        &mut self,
        symbol: &str,
        f: impl Fn(Value, Value) -> EvalResult + Send + Sync + 'static,
    ) {
        self.binary.insert(symbol.into(), Arc::new(f));
    }

    pub fn register_unary(
        &mut self,
        symbol: &str,
        f: impl Fn(Value) -> EvalResult + Send + Sync + 'static,
    ) {
        self.unary.insert(symbol.into(), Arc::new(f));
    }

    pub fn remove_binary(&mut self, symbol: &str) -> bool {
        self.binary.remove(symbol).is_some()
    }

    pub fn remove_unary(&mut self, symbol: &str) -> bool {
        self.unary.remove(symbol).is_some()
    }

    #[inline]
    pub fn binary(&self, symbol: &str) -> Option<&BinaryFn> {
        if self.binary.is_empty() {
            return None;
        }
        self.binary.get(symbol)
    }

    #[inline]
    pub fn unary(&self, symbol: &str) -> Option<&UnaryFn> {
        if self.unary.is_empty() {
            return None;
        }
        self.unary.get(symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.binary.is_empty() && self.unary.is_empty()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut binary: Vec<&str> = self.binary.keys().map(|k| &**k).collect();
        let mut unary: Vec<&str> = self.unary.keys().map(|k| &**k).collect();
        binary.sort_unstable();
        unary.sort_unstable();
        f.debug_struct("OperatorRegistry")
            .field("binary", &binary)
            .field("unary", &unary)
            .finish()
    }
}

//! Stack growth for deep recursion.
//!
//! Nested brackets, unary chains and right-associative assignments recurse
//! once per level while parsing. Evaluation polls one nested future per
//! level, and converting or comparing nested containers walks them
//! recursively. Each of these entry points runs inside
//! [`ensure_sufficient_stack`], which moves onto a fresh stack segment when
//! the current one runs low, so nesting depth is bounded by memory rather
//! than by the thread's stack size.

/// Grow the stack when less than this much remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

//! Stack growth for deep expressions.
//!
//! Evaluating nested nodes polls nested futures, one poll frame per level.
//! [`GrowStack`] runs each poll inside [`ensure_sufficient_stack`], so depth
//! is bounded by memory rather than by the polling thread's stack size.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use lumen_stack::ensure_sufficient_stack;

/// Polls `F` with [`ensure_sufficient_stack`].
pub(crate) struct GrowStack<F>(pub(crate) F);

impl<F: Future + Unpin> Future for GrowStack<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<F::Output> {
        let inner = &mut self.0;
        ensure_sufficient_stack(|| Pin::new(inner).poll(cx))
    }
}

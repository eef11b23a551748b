//! Lumen IR: the data shared by the lexer, parser and evaluator.
//!
//! - [`Span`] and [`Location`] for source positions
//! - [`Name`] for interned identifier and operator text
//! - [`Token`] for lexer output
//! - [`ast`] for the expression tree
//!
//! Nothing in this crate evaluates anything. AST nodes are immutable once
//! built, own their children, and are `Send + Sync` so a parsed expression
//! can be shared between concurrent evaluations.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, ConstantKind, Expr, Literal, LogicalOp, MemberKey, Property, PropertyKey, UnaryOp,
};
pub use name::{Interner, Name};
pub use span::{Location, Span};
pub use token::{Token, TokenKind};

static_assert_size!(Span, 8);
static_assert_size!(Location, 8);

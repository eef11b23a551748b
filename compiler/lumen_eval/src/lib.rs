//! Lumen Eval: the asynchronous tree-walking evaluator.
//!
//! # Architecture
//!
//! - [`Value`]: the host value model, including [`Value::Pending`] for
//!   values that are not available yet
//! - [`Interpreter`]: evaluates an [`Expr`](lumen_ir::Expr) against a
//!   [`Scope`], resolving pending values wherever they are read
//! - `evaluate_binary` / `evaluate_unary`: direct `match` dispatch over the
//!   built-in operators with JavaScript semantics
//! - [`OperatorRegistry`]: implementations of configured operators
//! - `to_boolean`, `to_number`, `to_string`, `to_property_key`: the
//!   JavaScript conversions everything above is built on

mod constant;
mod convert;
pub mod errors;
mod interpreter;
mod methods;
mod operators;
mod property;
mod registry;
mod stack;
mod value;

pub use constant::{decode_number, decode_string};
pub use convert::{number_to_string, to_boolean, to_number, to_property_key, to_string};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, Scope};
pub use operators::{evaluate_binary, evaluate_unary, loose_equals, strict_equals};
pub use property::{get_property, set_property};
pub use registry::{BinaryFn, OperatorRegistry, UnaryFn};
pub use value::{Array, Function, Object, Pending, Value};

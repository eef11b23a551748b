//! Lumen: an embeddable JavaScript-like expression engine.
//!
//! Sources are parsed once into an [`Expression`] and evaluated any number
//! of times against a receiver (`this`) and an environment (the object
//! names resolve in). Values may be pending futures anywhere: in the
//! environment, inside objects, or returned from host functions. They are
//! awaited transparently as evaluation reaches them.
//!
//! ```ignore
//! let expr = lumen::parse("a + b * 2")?;
//! let env = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
//! assert_eq!(expr.evaluate(Value::Undefined, env).await?, Value::from(5));
//! ```
//!
//! Custom operators are configured through [`Engine::builder`].

mod engine;
mod error;
mod expression;

pub use engine::{Engine, EngineBuilder};
pub use error::{ConfigError, Error};
pub use expression::Expression;

pub use lumen_eval::{Array, EvalError, EvalErrorKind, EvalResult, Function, Object, Pending, Value};
pub use lumen_ir::{Expr, Location};
pub use lumen_lexer::OperatorGroup;
pub use lumen_parse::{ParseError, ParseErrorKind};

/// Parse `source` with the built-in operators.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    engine::default_engine().parse(source)
}

/// Parse `source` and evaluate it once.
pub async fn eval(
    source: &str,
    receiver: impl Into<Value>,
    environment: impl Into<Value>,
) -> Result<Value, Error> {
    let expression = parse(source)?;
    Ok(expression.evaluate(receiver, environment).await?)
}

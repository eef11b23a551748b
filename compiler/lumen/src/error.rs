//! The facade's error types.

use lumen_eval::EvalError;
use lumen_lexer::OperatorGroup;
use lumen_parse::ParseError;

/// Any failure from parsing, evaluating or configuring.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A rejected [`EngineBuilder`](crate::EngineBuilder) request.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Binary operators may only be added to the equality, relational,
    /// additive and multiplicative groups.
    #[error("cannot add binary operator `{symbol}` to the {group} group")]
    NotBinaryGroup {
        group: OperatorGroup,
        symbol: String,
    },
    /// The symbol would be read as something other than an operator.
    #[error("invalid operator symbol: {symbol:?}")]
    InvalidSymbol { symbol: String },
}

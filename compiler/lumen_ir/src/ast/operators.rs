//! Operator enums.
//!
//! Built-in operators are closed variants so the evaluator can dispatch with
//! a `match`. Operators added through engine configuration keep their text
//! in a `Custom` variant and are looked up by symbol at evaluation time.

use std::fmt;

use crate::Name;

/// `&&` and `||`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&&" => Some(LogicalOp::And),
            "||" => Some(LogicalOp::Or),
            _ => None,
        }
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Operators of the equality, relational, additive and multiplicative
/// levels.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Equality
    Eq,
    StrictEq,
    NotEq,
    StrictNotEq,
    // Relational
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    Rem,
    /// A configured operator without a built-in meaning.
    Custom(Name),
}

impl BinaryOp {
    /// Operator for `symbol` at the equality level.
    pub fn equality(symbol: Name) -> Self {
        match &*symbol {
            "==" => BinaryOp::Eq,
            "===" => BinaryOp::StrictEq,
            "!=" => BinaryOp::NotEq,
            "!==" => BinaryOp::StrictNotEq,
            _ => BinaryOp::Custom(symbol),
        }
    }

    /// Operator for `symbol` at the relational level.
    pub fn relational(symbol: Name) -> Self {
        match &*symbol {
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::LtEq,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::GtEq,
            _ => BinaryOp::Custom(symbol),
        }
    }

    /// Operator for `symbol` at the additive level.
    pub fn additive(symbol: Name) -> Self {
        match &*symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            _ => BinaryOp::Custom(symbol),
        }
    }

    /// Operator for `symbol` at the multiplicative level.
    pub fn multiplicative(symbol: Name) -> Self {
        match &*symbol {
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            _ => BinaryOp::Custom(symbol),
        }
    }

    pub fn as_symbol(&self) -> &str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::StrictEq => "===",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Custom(name) => name,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `+x`: numeric conversion.
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    Custom(Name),
}

impl UnaryOp {
    pub fn from_symbol(symbol: Name) -> Self {
        match &*symbol {
            "+" => UnaryOp::Plus,
            "-" => UnaryOp::Neg,
            "!" => UnaryOp::Not,
            _ => UnaryOp::Custom(symbol),
        }
    }

    pub fn as_symbol(&self) -> &str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Custom(name) => name,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

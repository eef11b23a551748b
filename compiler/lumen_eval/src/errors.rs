//! Evaluation errors.
//!
//! Every failure during evaluation is an [`EvalError`] built by one of the
//! `#[cold]` constructors below, so the messages live in one place.

use std::fmt;

/// Result of evaluating a node or applying an operator.
pub type EvalResult = Result<crate::Value, EvalError>;

/// What went wrong while evaluating.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EvalErrorKind {
    /// The callee of a call is not a function.
    NotCallable {
        callee: String,
        type_name: &'static str,
    },
    /// A property was read from `undefined` or `null`.
    CannotReadProperty {
        key: String,
        target: &'static str,
    },
    /// A property was written to something that cannot hold it.
    CannotSetProperty {
        key: String,
        target: &'static str,
    },
    /// An array was grown past [`Array::MAX_LEN`](crate::Array::MAX_LEN), or
    /// its `length` set to something that is not a valid length.
    InvalidArrayLength { length: String },
    /// `write` was asked to store into a node that is not writable.
    InvalidAssignmentTarget { target: String },
    /// A configured operator has no implementation.
    UnsupportedOperator { symbol: String },
    /// Raised by a host function or a pending value.
    Host(String),
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCallable { callee, type_name } => {
                write!(f, "{callee} is not a function (found {type_name})")
            }
            Self::CannotReadProperty { key, target } => {
                write!(f, "Cannot read properties of {target} (reading '{key}')")
            }
            Self::CannotSetProperty { key, target } => {
                write!(f, "Cannot set properties of {target} (setting '{key}')")
            }
            Self::InvalidArrayLength { length } => write!(f, "Invalid array length: {length}"),
            Self::InvalidAssignmentTarget { target } => {
                write!(f, "Trying to assign to a non l-value: '{target}'")
            }
            Self::UnsupportedOperator { symbol } => write!(f, "Unsupported operator: {symbol}"),
            Self::Host(message) => f.write_str(message),
        }
    }
}

/// An evaluation failure. The rest of the evaluation is abandoned.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    /// An error raised by host code.
    #[cold]
    pub fn host(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::Host(message.into()))
    }
}

#[cold]
pub fn not_callable(callee: impl fmt::Display, type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable {
        callee: callee.to_string(),
        type_name,
    })
}

#[cold]
pub fn cannot_read_property(key: &str, target: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::CannotReadProperty {
        key: key.to_owned(),
        target,
    })
}

#[cold]
pub fn cannot_set_property(key: &str, target: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::CannotSetProperty {
        key: key.to_owned(),
        target,
    })
}

#[cold]
pub fn invalid_array_length(length: impl fmt::Display) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidArrayLength {
        length: length.to_string(),
    })
}

#[cold]
pub fn invalid_assignment_target(target: impl fmt::Display) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidAssignmentTarget {
        target: target.to_string(),
    })
}

#[cold]
pub fn unsupported_operator(symbol: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UnsupportedOperator {
        symbol: symbol.to_owned(),
    })
}

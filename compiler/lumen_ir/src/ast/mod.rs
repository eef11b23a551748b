//! Expression tree.
//!
//! One [`Expr`] variant per grammar production. Nodes own their children
//! and never change after the parser builds them. The tree holds no
//! evaluation state, so one parse can be evaluated any number of times,
//! from any number of threads.
//!
//! `Display` prints an expression back as source text, adding parentheses
//! only where precedence requires them. Parsing the printed text yields an
//! equal tree.

mod literal;
mod operators;

use std::fmt;

use crate::Name;

pub use literal::{Literal, FALSE, NULL, TRUE, UNDEFINED};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};

/// How a [`Expr::Constant`]'s text is decoded.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstantKind {
    Number,
    String,
}

/// Member access key.
#[derive(Clone, PartialEq, Debug)]
pub enum MemberKey {
    /// `object.name`
    Static(Name),
    /// `object[expr]`
    Computed(Box<Expr>),
}

impl MemberKey {
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, MemberKey::Computed(_))
    }
}

/// Object literal key.
#[derive(Clone, PartialEq, Debug)]
pub enum PropertyKey {
    /// `{ name: v }` and shorthand `{ name }`.
    Identifier(Name),
    /// `{ "text": v }` or `{ 30: v }`; decoded like a constant.
    Constant { kind: ConstantKind, text: Box<str> },
    /// `{ [expr]: v }`
    Computed(Box<Expr>),
}

/// One `key: value` entry of an object literal.
#[derive(Clone, PartialEq, Debug)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
}

impl Property {
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self.key, PropertyKey::Computed(_))
    }
}

/// Expression node.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// `target = value`. `target` is always writable.
    Assignment { target: Box<Expr>, value: Box<Expr> },
    /// `a, b, c`: every element is evaluated, the last one is the result.
    Comma(Vec<Expr>),
    /// `test ? consequent : alternate`
    Ternary {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// `&&` / `||`, short-circuiting.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Equality {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Relational {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Additive {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Multiplicative {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// A name looked up in the environment.
    Identifier(Name),
    /// Number or string literal, kept as source text until evaluation.
    Constant { kind: ConstantKind, text: Box<str> },
    /// One of the shared keyword singletons.
    Literal(&'static Literal),
    /// `this`
    Receiver,
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Member { object: Box<Expr>, key: MemberKey },
    Array(Vec<Expr>),
    Object(Vec<Property>),
}

impl Expr {
    /// Whether the node can appear on the left of `=`.
    #[inline]
    pub fn is_writable(&self) -> bool {
        matches!(self, Expr::Identifier(_) | Expr::Member { .. })
    }

    /// Number constant from its source text.
    pub fn number(text: &str) -> Self {
        Expr::Constant {
            kind: ConstantKind::Number,
            text: text.into(),
        }
    }

    /// String constant from its source text, quotes included.
    pub fn string(text: &str) -> Self {
        Expr::Constant {
            kind: ConstantKind::String,
            text: text.into(),
        }
    }

    /// The shared literal node for `undefined`.
    pub fn undefined() -> Self {
        Expr::Literal(Literal::undefined())
    }

    /// Binding strength used when printing.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Comma(_) => 0,
            Expr::Assignment { .. } => 1,
            Expr::Ternary { .. } => 2,
            Expr::Logical {
                op: LogicalOp::Or, ..
            } => 3,
            Expr::Logical {
                op: LogicalOp::And,
                ..
            } => 4,
            Expr::Equality { .. } => 5,
            Expr::Relational { .. } => 6,
            Expr::Additive { .. } => 7,
            Expr::Multiplicative { .. } => 8,
            Expr::Unary { .. } => 9,
            _ => 10,
        }
    }
}

/// Print `expr`, parenthesised if it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if expr.precedence() < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        // Elements are parsed at assignment level.
        write_operand(f, item, 1)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        match self {
            Expr::Comma(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    // The head is an assignment, the rest are ternaries.
                    write_operand(f, item, if i == 0 { 1 } else { 2 })?;
                }
                Ok(())
            }
            Expr::Assignment { target, value } => {
                write_operand(f, target, 2)?;
                f.write_str(" = ")?;
                write_operand(f, value, 1)
            }
            Expr::Ternary {
                test,
                consequent,
                alternate,
            } => {
                write_operand(f, test, 3)?;
                write!(f, " ? {consequent} : ")?;
                // A bare comma here would absorb whatever follows the ternary.
                write_operand(f, alternate, 1)
            }
            Expr::Logical { op, left, right } => {
                write_operand(f, left, prec)?;
                write!(f, " {op} ")?;
                write_operand(f, right, prec + 1)
            }
            Expr::Equality { op, left, right }
            | Expr::Relational { op, left, right }
            | Expr::Additive { op, left, right }
            | Expr::Multiplicative { op, left, right } => {
                write_operand(f, left, prec)?;
                write!(f, " {op} ")?;
                write_operand(f, right, prec + 1)
            }
            Expr::Unary { op, operand } => {
                // Keeps `- -x` from printing as `--x`.
                let space = matches!(&**operand, Expr::Unary { .. });
                write!(f, "{op}{}", if space { " " } else { "" })?;
                write_operand(f, operand, prec)
            }
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Constant { text, .. } => f.write_str(text),
            Expr::Literal(literal) => write!(f, "{literal}"),
            Expr::Receiver => f.write_str("this"),
            Expr::Call { callee, args } => {
                write_operand(f, callee, 10)?;
                f.write_str("(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Member { object, key } => {
                write_operand(f, object, 10)?;
                match key {
                    MemberKey::Static(name) => write!(f, ".{name}"),
                    MemberKey::Computed(key) => write!(f, "[{key}]"),
                }
            }
            Expr::Array(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            Expr::Object(properties) => {
                if properties.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match &property.key {
                        PropertyKey::Identifier(name) => {
                            if matches!(&property.value, Expr::Identifier(v) if v == name) {
                                write!(f, "{name}")?;
                                continue;
                            }
                            write!(f, "{name}: ")?;
                        }
                        PropertyKey::Constant { text, .. } => write!(f, "{text}: ")?,
                        PropertyKey::Computed(key) => write!(f, "[{key}]: ")?,
                    }
                    write_operand(f, &property.value, 1)?;
                }
                f.write_str(" }")
            }
        }
    }
}

//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point (`parse_expr`) and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: literals, names, brackets, array and object literals
//! - `postfix.rs`: call, member and index chains

mod operators;
mod postfix;
mod primary;

use lumen_ir::{Expr, LogicalOp, Span};
use lumen_lexer::OperatorGroup;
use lumen_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a full expression, commas included.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested brackets cannot
    /// overflow the stack.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_comma())
    }

    /// `a, b, c`: the head is an assignment, the rest are ternaries.
    fn parse_comma(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_assignment()?;
        if !self.lexer.consume(b',')? {
            return Ok(first);
        }
        let mut items = vec![first];
        loop {
            items.push(self.parse_ternary()?);
            if !self.lexer.consume(b',')? {
                break;
            }
        }
        Ok(Expr::Comma(items))
    }

    /// Right-associative `target = value`.
    pub(crate) fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            self.lexer.advance()?;
            let start = self.lexer.position();
            let target = self.parse_ternary()?;
            if self
                .lexer
                .consume_symbol(OperatorGroup::Assignment)?
                .is_none()
            {
                return Ok(target);
            }
            if !target.is_writable() {
                let end = self.lexer.position();
                let span = Span::from_range(start..end);
                return Err(ParseError::invalid_assignment_target(
                    target.to_string(),
                    span,
                    self.lexer.location(start),
                ));
            }
            let value = self.parse_assignment()?;
            Ok(Expr::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            })
        })
    }

    /// `test ? consequent : alternate`; both branches are full expressions.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let test = self.parse_logical_or()?;
        if !self.lexer.consume(b'?')? {
            return Ok(test);
        }
        let consequent = self.parse_expr()?;
        self.expect(b':', ":")?;
        let alternate = self.parse_expr()?;
        Ok(Expr::Ternary {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// Parse `||` (loosest binary level).
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;
        while self.match_logical_op(LogicalOp::Or)? {
            let right = self.parse_logical_and()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse `&&`.
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.match_logical_op(LogicalOp::And)? {
            let right = self.parse_equality()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse `==`, `===`, `!=`, `!==` and configured equality operators.
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;
        while let Some(op) = self.match_equality_op()? {
            let right = self.parse_relational()?;
            left = Expr::Equality {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse `<`, `<=`, `>`, `>=` and configured relational operators.
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_relational_op()? {
            let right = self.parse_additive()?;
            left = Expr::Relational {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse `+` and `-`.
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op()? {
            let right = self.parse_multiplicative()?;
            left = Expr::Additive {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Parse `*`, `/` and `%`.
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op()? {
            let right = self.parse_unary()?;
            left = Expr::Multiplicative {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// Prefix operators, right-nested: `!!x` is `!(!x)`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            if let Some(op) = self.match_unary_op()? {
                let operand = self.parse_unary()?;
                return Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                });
            }
            self.parse_postfix()
        })
    }
}

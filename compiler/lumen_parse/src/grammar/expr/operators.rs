//! Operator matching helpers.
//!
//! Each helper consumes an operator of one precedence level if it comes
//! next and maps it to the AST operator.

use lumen_ir::{BinaryOp, LogicalOp, UnaryOp};
use lumen_lexer::OperatorGroup;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn match_logical_op(&mut self, op: LogicalOp) -> Result<bool, ParseError> {
        Ok(self.lexer.consume_text(op.as_symbol())?)
    }

    pub(crate) fn match_equality_op(&mut self) -> Result<Option<BinaryOp>, ParseError> {
        Ok(self
            .lexer
            .consume_symbol(OperatorGroup::Equality)?
            .map(BinaryOp::equality))
    }

    pub(crate) fn match_relational_op(&mut self) -> Result<Option<BinaryOp>, ParseError> {
        Ok(self
            .lexer
            .consume_symbol(OperatorGroup::Relational)?
            .map(BinaryOp::relational))
    }

    pub(crate) fn match_additive_op(&mut self) -> Result<Option<BinaryOp>, ParseError> {
        Ok(self
            .lexer
            .consume_symbol(OperatorGroup::Additive)?
            .map(BinaryOp::additive))
    }

    pub(crate) fn match_multiplicative_op(&mut self) -> Result<Option<BinaryOp>, ParseError> {
        Ok(self
            .lexer
            .consume_symbol(OperatorGroup::Multiplicative)?
            .map(BinaryOp::multiplicative))
    }

    pub(crate) fn match_unary_op(&mut self) -> Result<Option<UnaryOp>, ParseError> {
        Ok(self
            .lexer
            .consume_symbol(OperatorGroup::Unary)?
            .map(UnaryOp::from_symbol))
    }
}

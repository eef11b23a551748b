//! Postfix chains: calls, computed members and named members.
//!
//! A chain like `a.b[c](d).e` is parsed by a loop, not by recursion, so long
//! chains cost no stack.

use lumen_ir::{Expr, MemberKey};

use super::primary::is_keyword;
use crate::{ParseError, Parser};

impl Parser<'_> {
    #[inline]
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_primary()?;
        self.apply_postfix_ops(expr)
    }

    /// Wrap `expr` in every postfix operator that follows it.
    pub(crate) fn apply_postfix_ops(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.lexer.consume(b'(')? {
                let args = self.parse_elements(b')')?;
                self.expect(b')', ")")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.lexer.consume(b'[')? {
                let key = self.parse_expr()?;
                self.expect(b']', "]")?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    key: MemberKey::Computed(Box::new(key)),
                };
            } else if self.lexer.consume(b'.')? {
                let key = self.parse_member_name()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    key,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    /// The identifier after `.`. Keywords are rejected.
    fn parse_member_name(&mut self) -> Result<MemberKey, ParseError> {
        self.lexer.advance()?;
        match self.lexer.next_identifier()? {
            Some(token) if !is_keyword(token.text) => {
                let name = token
                    .name
                    .unwrap_or_else(|| lumen_ir::Name::new(token.text));
                Ok(MemberKey::Static(name))
            }
            Some(token) => Err(self.unexpected_at("<identifier>", token.text, token.span)),
            None => Err(self.unexpected("<identifier>")),
        }
    }
}

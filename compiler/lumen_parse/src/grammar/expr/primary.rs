//! Primary expressions: bracketed groups, array and object literals, names,
//! keywords and constants.

use lumen_ir::{ConstantKind, Expr, Literal, Name, Property, PropertyKey, Token, TokenKind};
use tracing::trace;

use crate::{ParseError, Parser};

/// Keywords that cannot name a member after `.`.
pub(crate) fn is_keyword(word: &str) -> bool {
    word == "this" || Literal::from_keyword(word).is_some()
}

fn interned(token: &Token<'_>) -> Name {
    token.name.clone().unwrap_or_else(|| Name::new(token.text))
}

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.lexer.consume(b'(')? {
            let expr = self.parse_expr()?;
            self.expect(b')', ")")?;
            return Ok(expr);
        }
        if self.lexer.consume(b'[')? {
            let elements = self.parse_elements(b']')?;
            self.expect(b']', "]")?;
            return Ok(Expr::Array(elements));
        }
        if self.lexer.consume(b'{')? {
            let properties = self.parse_object()?;
            self.expect(b'}', "}")?;
            return Ok(Expr::Object(properties));
        }

        self.lexer.advance()?;
        let Some(token) = self.lexer.next_token()? else {
            return Err(self.unexpected("expression"));
        };
        match token.kind {
            TokenKind::Identifier => {
                if token.text == "this" {
                    return Ok(Expr::Receiver);
                }
                if let Some(literal) = Literal::from_keyword(token.text) {
                    return Ok(Expr::Literal(literal));
                }
                Ok(Expr::Identifier(interned(&token)))
            }
            TokenKind::Number => Ok(Expr::number(token.text)),
            TokenKind::String => Ok(Expr::string(token.text)),
            TokenKind::Symbol => Err(self.unexpected_at("expression", token.text, token.span)),
        }
    }

    /// Comma-separated assignments up to `close`, for array literals and
    /// call arguments.
    ///
    /// An empty slot (`[1,,2]`) and a trailing comma (`[1,]`) each produce
    /// the shared `undefined` literal.
    pub(crate) fn parse_elements(&mut self, close: u8) -> Result<Vec<Expr>, ParseError> {
        let mut elements = Vec::new();
        let next = self.lexer.peek()?;
        if next.is_none() || next == Some(close) {
            return Ok(elements);
        }
        loop {
            let next = self.lexer.peek()?;
            if next == Some(b',') || next == Some(close) {
                elements.push(Expr::undefined());
            } else {
                elements.push(self.parse_assignment()?);
            }
            if !self.lexer.consume(b',')? {
                break;
            }
        }
        Ok(elements)
    }

    /// Properties up to `}`. Empty slots between commas are skipped.
    fn parse_object(&mut self) -> Result<Vec<Property>, ParseError> {
        let mut properties = Vec::new();
        let next = self.lexer.peek()?;
        if next.is_none() || next == Some(b'}') {
            return Ok(properties);
        }
        loop {
            let next = self.lexer.peek()?;
            if next != Some(b',') && next != Some(b'}') {
                properties.push(self.parse_property()?);
            }
            if !self.lexer.consume(b',')? {
                break;
            }
        }
        Ok(properties)
    }

    /// `name`, `name: value`, `"text": value`, `123: value` or
    /// `[key]: value`.
    fn parse_property(&mut self) -> Result<Property, ParseError> {
        if self.lexer.consume(b'[')? {
            let key = self.parse_assignment()?;
            self.expect(b']', "]")?;
            self.expect(b':', ":")?;
            let value = self.parse_assignment()?;
            return Ok(Property {
                key: PropertyKey::Computed(Box::new(key)),
                value,
            });
        }

        self.lexer.advance()?;
        let Some(token) = self.lexer.next_token()? else {
            return Err(self.unexpected("property"));
        };
        trace!(key = token.text, "property");
        let key = match token.kind {
            TokenKind::Number | TokenKind::String => {
                let kind = if token.kind == TokenKind::Number {
                    ConstantKind::Number
                } else {
                    ConstantKind::String
                };
                PropertyKey::Constant {
                    kind,
                    text: token.text.into(),
                }
            }
            TokenKind::Identifier => {
                let name = interned(&token);
                // Shorthand `{ x }` reads the variable `x`; keywords need a value.
                let value = if is_keyword(token.text) {
                    self.expect(b':', ":")?;
                    self.parse_assignment()?
                } else if self.lexer.consume(b':')? {
                    self.parse_assignment()?
                } else {
                    Expr::Identifier(name.clone())
                };
                return Ok(Property {
                    key: PropertyKey::Identifier(name),
                    value,
                });
            }
            TokenKind::Symbol => {
                let location = self.lexer.location(token.span.start as usize);
                return Err(ParseError::invalid_object_key(
                    token.text,
                    token.span,
                    location,
                ));
            }
        };
        self.expect(b':', ":")?;
        let value = self.parse_assignment()?;
        Ok(Property { key, value })
    }
}

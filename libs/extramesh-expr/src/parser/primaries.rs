//! # Primary Expression Parsing
//!
//! Parses primary expressions: number literals, names and parenthesized
//! expressions. Everything else that can start a Python expression is
//! reported as unsupported.

use super::Parser;
use crate::ast::{Expr, ExprKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse primary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// primary = number | identifier | "(" expression ")"
    /// ```
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.advance();
                let value = token.text.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.clone(),
                        },
                        token.span,
                    )
                })?;
                Ok(Expr::new(ExprKind::Number(value), token.span))
            }

            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expr::new(ExprKind::Name(token.text), token.span))
            }

            TokenKind::LParen => {
                let open = self.advance();
                if self.check(TokenKind::RParen) {
                    return Err(ParseError::new(
                        ParseErrorKind::Unsupported {
                            construct: "empty tuple".to_string(),
                        },
                        open.span,
                    ));
                }
                let mut inner = self.parse_expression()?;
                if self.check(TokenKind::Comma) {
                    return Err(ParseError::new(
                        ParseErrorKind::Unsupported {
                            construct: "tuple literal".to_string(),
                        },
                        self.peek().span,
                    ));
                }
                let close = self.expect(TokenKind::RParen)?;
                inner.span = open.span.merge(close.span);
                Ok(inner)
            }

            TokenKind::LBracket => Err(ParseError::new(
                ParseErrorKind::Unsupported {
                    construct: "list literal".to_string(),
                },
                self.peek().span,
            )),

            _ => Err(self.unexpected("expression")),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

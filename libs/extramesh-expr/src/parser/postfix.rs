//! # Postfix Expression Parsing
//!
//! Parses postfix expressions: function calls and subscripts.
//!
//! ## Responsibilities
//!
//! - Function calls: `sin(u)`, `atan2(y, x)`
//! - Subscripts: `frexp(x)[0]`

use super::Parser;
use crate::ast::{Expr, ExprKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse postfix expressions (call, subscript).
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("(" args ")" | "[" expression "]")*
    /// ```
    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek_kind() {
                TokenKind::LParen => expr = self.parse_call(expr)?,
                TokenKind::LBracket => expr = self.parse_subscript(expr)?,
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parse a call's argument list.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// args = (expression ("," expression)* ","?)?
    /// ```
    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        self.advance(); // (
        let mut args = Vec::new();

        while !self.check(TokenKind::RParen) {
            args.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        let close = self.expect(TokenKind::RParen)?;
        let span = callee.span.merge(close.span);
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    /// Parse `[index]`.
    fn parse_subscript(&mut self, target: Expr) -> Result<Expr, ParseError> {
        self.advance(); // [
        let index = self.parse_expression()?;
        let close = self.expect(TokenKind::RBracket)?;
        let span = target.span.merge(close.span);
        Ok(Expr::new(
            ExprKind::Subscript {
                target: Box::new(target),
                index: Box::new(index),
            },
            span,
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::ast::ExprKind;
    use crate::parser::parse;

    #[test]
    fn test_call_without_arguments() {
        match parse("hypot()").map(|e| e.kind) {
            Ok(ExprKind::Call { args, .. }) => assert!(args.is_empty()),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_chained_postfix() {
        let expr = parse("modf(u)[1](2)").unwrap();
        assert!(matches!(expr.kind, ExprKind::Call { .. }));
        assert_eq!(expr.depth, 4);
    }

    #[test]
    fn test_missing_comma() {
        assert!(parse("atan2(y x)").is_err());
    }

    #[test]
    fn test_empty_subscript() {
        assert!(parse("frexp(u)[]").is_err());
    }
}

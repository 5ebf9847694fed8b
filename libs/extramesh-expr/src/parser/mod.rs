//! # Expression Parser
//!
//! Recursive descent parser for the arithmetic subset. Produces an
//! [`Expr`] tree or the first [`ParseError`].
//!
//! ## Module Structure
//!
//! - `operators` - Binary, unary and conditional operators with precedence
//! - `postfix` - Call and subscript
//! - `primaries` - Literals, names and parentheses
//!
//! ## Example
//!
//! ```rust
//! use extramesh_expr::parser::parse;
//!
//! let expr = parse("1 - (x**2 + y**2)").unwrap();
//! assert_eq!(expr.depth, 4);
//! ```

mod operators;
mod postfix;
mod primaries;

use crate::ast::{Expr, ExprKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::Span;
use config::constants::{MAX_EXPRESSION_DEPTH, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

/// Parse a complete expression.
///
/// Trailing tokens after the expression are an error.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse()
}

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser over a token stream.
pub struct Parser {
    /// Token stream (always ends with EOF).
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Current recursion depth.
    depth: usize,
}

impl Parser {
    /// Create a new parser.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream as one expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    /// Parse an expression, including the conditional form.
    ///
    /// ```text
    /// body if test else orelse
    /// ```
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            let body = parser.parse_disjunction()?;
            if !parser.match_token(TokenKind::If) {
                return Ok(body);
            }
            let test = parser.parse_disjunction()?;
            parser.expect(TokenKind::Else)?;
            let orelse = parser.parse_expression()?;
            let span = body.span.merge(orelse.span);
            Ok(Expr::new(
                ExprKind::Conditional {
                    body: Box::new(body),
                    test: Box::new(test),
                    orelse: Box::new(orelse),
                },
                span,
            ))
        })
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.current.min(last)]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of input.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Advance to next token, returning the consumed one.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consume token if it matches expected kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", kind.display())))
        }
    }

    /// Try to consume token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Error for the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let error = match token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected),
            TokenKind::String => ParseError::new(
                ParseErrorKind::Unsupported {
                    construct: format!("string literal {}", token.text),
                },
                token.span,
            ),
            _ => ParseError::unexpected_token(&token.text, expected),
        };
        error.with_span(token.span)
    }

    /// Run a recursive step with depth accounting and stack growth.
    ///
    /// Only syntactic nesting counts; a long left-associative chain is
    /// built in a loop and stays at one level.
    fn nested<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_EXPRESSION_DEPTH {
            return Err(Self::too_deep(self.peek().span));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            step(self)
        });
        self.depth -= 1;
        result
    }

    fn too_deep(span: Span) -> ParseError {
        ParseError::new(
            ParseErrorKind::TooDeep {
                limit: MAX_EXPRESSION_DEPTH,
            },
            span,
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, CompareOp, LogicalOp, UnaryOp};

    fn parse_ok(source: &str) -> Expr {
        match parse(source) {
            Ok(expr) => expr,
            Err(e) => panic!("failed to parse {source:?}: {e}"),
        }
    }

    fn binary(expr: &Expr) -> (BinaryOp, &Expr, &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, lhs, rhs } => (*op, lhs, rhs),
            other => panic!("expected binary expression, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_ok("1.5").kind, ExprKind::Number(1.5));
        assert_eq!(parse_ok(".5").kind, ExprKind::Number(0.5));
        assert_eq!(parse_ok("1e-3").kind, ExprKind::Number(0.001));
    }

    #[test]
    fn test_factor_binds_tighter_than_term() {
        let expr = parse_ok("1 + 2 * 3");
        let (op, _, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(binary(rhs).0, BinaryOp::Mul);
    }

    #[test]
    fn test_term_is_left_associative() {
        let expr = parse_ok("1 - 2 - 3");
        let (op, lhs, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(binary(lhs).0, BinaryOp::Sub);
        assert_eq!(rhs.kind, ExprKind::Number(3.0));
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_ok("2 ** 3 ** 2");
        let (op, lhs, rhs) = binary(&expr);
        assert_eq!(op, BinaryOp::Pow);
        assert_eq!(lhs.kind, ExprKind::Number(2.0));
        assert_eq!(binary(rhs).0, BinaryOp::Pow);
    }

    #[test]
    fn test_power_binds_tighter_than_unary_minus() {
        let expr = parse_ok("-2 ** 2");
        match &expr.kind {
            ExprKind::Unary { op, operand } => {
                assert_eq!(*op, UnaryOp::Neg);
                assert_eq!(binary(operand).0, BinaryOp::Pow);
            }
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn test_power_accepts_unary_exponent() {
        let expr = parse_ok("2 ** -1");
        let (_, _, rhs) = binary(&expr);
        assert!(matches!(rhs.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
    }

    #[test]
    fn test_comparison_chain() {
        let expr = parse_ok("0 < u <= 1");
        match &expr.kind {
            ExprKind::Compare { rest, .. } => {
                let ops: Vec<CompareOp> = rest.iter().map(|(op, _)| *op).collect();
                assert_eq!(ops, vec![CompareOp::Lt, CompareOp::LtEq]);
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let expr = parse_ok("not u < 1");
        match &expr.kind {
            ExprKind::Not(inner) => assert!(matches!(inner.kind, ExprKind::Compare { .. })),
            other => panic!("expected not, got {other:?}"),
        }
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse_ok("a or b and c");
        match &expr.kind {
            ExprKind::Logical { op, rhs, .. } => {
                assert_eq!(*op, LogicalOp::Or);
                assert!(matches!(
                    rhs.kind,
                    ExprKind::Logical {
                        op: LogicalOp::And,
                        ..
                    }
                ));
            }
            other => panic!("expected or, got {other:?}"),
        }
    }

    #[test]
    fn test_conditional_is_lowest() {
        let expr = parse_ok("u + 1 if u < 0 else v * 2");
        match &expr.kind {
            ExprKind::Conditional { body, test, orelse } => {
                assert_eq!(binary(body).0, BinaryOp::Add);
                assert!(matches!(test.kind, ExprKind::Compare { .. }));
                assert_eq!(binary(orelse).0, BinaryOp::Mul);
            }
            other => panic!("expected conditional, got {other:?}"),
        }
    }

    #[test]
    fn test_call_and_subscript() {
        let expr = parse_ok("frexp(x)[0]");
        match &expr.kind {
            ExprKind::Subscript { target, index } => {
                assert!(matches!(target.kind, ExprKind::Call { .. }));
                assert_eq!(index.kind, ExprKind::Number(0.0));
            }
            other => panic!("expected subscript, got {other:?}"),
        }
    }

    #[test]
    fn test_call_trailing_comma() {
        match parse_ok("atan2(y, x,)").kind {
            ExprKind::Call { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_string_rejected() {
        let error = parse("__import__('os')").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::Unsupported { .. }));
        assert_eq!(error.span, Span::new(11, 15));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let error = parse("1 2").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unclosed_paren() {
        let error = parse("(1 + 2").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse("   ").unwrap_err().kind,
            ParseErrorKind::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_not_inside_arithmetic_rejected() {
        assert!(parse("1 + not 2").is_err());
    }

    #[test]
    fn test_deep_parentheses_rejected() {
        let depth = MAX_EXPRESSION_DEPTH + 10;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(
            parse(&source).unwrap_err().kind,
            ParseErrorKind::TooDeep { .. }
        ));
    }

    #[test]
    fn test_long_flat_sum_accepted() {
        let source = vec!["1"; MAX_EXPRESSION_DEPTH + 44].join(" + ");
        let expr = parse_ok(&source);
        assert_eq!(expr.depth, MAX_EXPRESSION_DEPTH + 44);
    }

    #[test]
    fn test_deep_unary_chain_rejected() {
        let source = format!("{}1", "-".repeat(MAX_EXPRESSION_DEPTH + 10));
        assert!(matches!(
            parse(&source).unwrap_err().kind,
            ParseErrorKind::TooDeep { .. }
        ));
    }

    #[test]
    fn test_moderate_nesting_accepted() {
        let source = format!("{}u{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(parse_ok(&source).kind, ExprKind::Name("u".into()));
    }
}

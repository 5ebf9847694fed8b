//! # Operator Parsing
//!
//! Parses binary, boolean and prefix operators using precedence climbing.
//!
//! ## Operator Precedence (lowest first)
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | `or` | Left |
//! | 2 | `and` | Left |
//! | 3 | `not` (prefix) | Right |
//! | 4 | `< <= > >= == !=` | Chained |
//! | 5 | `+ -` | Left |
//! | 6 | `* / // %` | Left |
//! | 7 | `- +` (prefix) | Right |
//! | 8 | `**` | Right |
//! | 9 | `() []` | Left |
//!
//! The conditional `a if c else b` sits below all of these and is handled
//! by `parse_expression`. The exponent of `**` may itself carry a prefix
//! sign, so `2 ** -1` parses while `-2 ** 2` is `-(2 ** 2)`.

use super::Parser;
use crate::ast::{BinaryOp, CompareOp, Expr, ExprKind, LogicalOp, UnaryOp};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Logical or: `or`
    Or = 1,
    /// Logical and: `and`
    And = 2,
    /// Logical not: `not`
    Not = 3,
    /// Comparison: `< <= > >= == !=`
    Comparison = 4,
    /// Addition/subtraction: `+ -`
    Term = 5,
    /// Multiplication/division: `* / // %`
    Factor = 6,
    /// Prefix sign: `- +`
    Unary = 7,
    /// Power: `**`
    Power = 8,
}

impl Precedence {
    /// Get precedence for binary operator.
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Or => Some(Self::Or),
            TokenKind::And => Some(Self::And),
            k if k.is_comparison() => Some(Self::Comparison),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::SlashSlash | TokenKind::Percent => {
                Some(Self::Factor)
            }
            TokenKind::StarStar => Some(Self::Power),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    ///
    /// Used for left-associative operators.
    pub(super) fn next(&self) -> Self {
        match self {
            Self::Or => Self::And,
            Self::And => Self::Not,
            Self::Not => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Unary,
            Self::Unary => Self::Power,
            Self::Power => Self::Power,
        }
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::SlashSlash => Some(BinaryOp::FloorDiv),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::StarStar => Some(BinaryOp::Pow),
        _ => None,
    }
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Lt => Some(CompareOp::Lt),
        TokenKind::LtEq => Some(CompareOp::LtEq),
        TokenKind::Gt => Some(CompareOp::Gt),
        TokenKind::GtEq => Some(CompareOp::GtEq),
        TokenKind::EqEq => Some(CompareOp::Eq),
        TokenKind::BangEq => Some(CompareOp::NotEq),
        _ => None,
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl Parser {
    /// Parse an `or` expression (everything but the conditional).
    pub(super) fn parse_disjunction(&mut self) -> Result<Expr, ParseError> {
        self.parse_precedence(Precedence::Or)
    }

    /// Parse expression with minimum precedence.
    ///
    /// ## Parameters
    ///
    /// - `min_prec`: Minimum precedence level to parse
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            let mut left = parser.parse_prefix(min_prec)?;

            while let Some(prec) = Precedence::of_binary(parser.peek_kind()) {
                if prec < min_prec {
                    break;
                }

                left = match prec {
                    Precedence::Or | Precedence::And => parser.parse_logical(left, prec)?,
                    Precedence::Comparison => parser.parse_comparison(left)?,
                    _ => parser.parse_binary_op(left, prec)?,
                };
            }

            Ok(left)
        })
    }

    /// Parse a prefix operator or fall through to postfix parsing.
    fn parse_prefix(&mut self, min_prec: Precedence) -> Result<Expr, ParseError> {
        let start = self.peek().span;
        match self.peek_kind() {
            TokenKind::Not if min_prec <= Precedence::Not => {
                self.advance();
                let operand = self.parse_precedence(Precedence::Not)?;
                let span = start.merge(operand.span);
                Ok(Expr::new(ExprKind::Not(Box::new(operand)), span))
            }
            TokenKind::Minus | TokenKind::Plus if min_prec <= Precedence::Unary => {
                let op = if self.advance().kind == TokenKind::Minus {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Pos
                };
                let operand = self.parse_precedence(Precedence::Unary)?;
                let span = start.merge(operand.span);
                Ok(Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: Box::new(operand),
                    },
                    span,
                ))
            }
            _ => self.parse_postfix(),
        }
    }

    /// Parse an arithmetic operator and its right operand.
    fn parse_binary_op(&mut self, left: Expr, prec: Precedence) -> Result<Expr, ParseError> {
        let token = self.advance();
        let op = binary_op(token.kind)
            .ok_or_else(|| ParseError::unexpected_token(&token.text, "operator").with_span(token.span))?;

        // `**` is right-associative and its exponent may be signed
        let right = if op == BinaryOp::Pow {
            self.parse_precedence(Precedence::Unary)?
        } else {
            self.parse_precedence(prec.next())?
        };

        let span = left.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            },
            span,
        ))
    }

    /// Parse `and` / `or`.
    fn parse_logical(&mut self, left: Expr, prec: Precedence) -> Result<Expr, ParseError> {
        let op = if self.advance().kind == TokenKind::Or {
            LogicalOp::Or
        } else {
            LogicalOp::And
        };
        let right = self.parse_precedence(prec.next())?;
        let span = left.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Logical {
                op,
                lhs: Box::new(left),
                rhs: Box::new(right),
            },
            span,
        ))
    }

    /// Parse a comparison chain after its first operand.
    fn parse_comparison(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut rest = Vec::new();
        let mut span = first.span;

        while let Some(op) = compare_op(self.peek_kind()) {
            self.advance();
            let operand = self.parse_precedence(Precedence::Comparison.next())?;
            span = span.merge(operand.span);
            rest.push((op, operand));
        }

        Ok(Expr::new(
            ExprKind::Compare {
                first: Box::new(first),
                rest,
            },
            span,
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

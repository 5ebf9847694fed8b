//! # Expression Syntax Tree
//!
//! Unresolved syntax produced by the parser. Names are still strings here;
//! the compiler resolves them against a [`Scope`](crate::scope::Scope).

use crate::span::{Span, Spanned};

/// A parsed expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Expression shape.
    pub kind: ExprKind,
    /// Source location.
    pub span: Span,
    /// Height of the tree rooted here (a leaf has depth 1).
    pub depth: usize,
}

impl Expr {
    /// Create a new expression node.
    ///
    /// The depth is derived from the direct children only, so building a
    /// tree never recurses through it.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let children = match &kind {
            ExprKind::Number(_) | ExprKind::Name(_) => 0,
            ExprKind::Unary { operand, .. } | ExprKind::Not(operand) => operand.depth,
            ExprKind::Binary { lhs, rhs, .. } | ExprKind::Logical { lhs, rhs, .. } => {
                lhs.depth.max(rhs.depth)
            }
            ExprKind::Compare { first, rest } => {
                rest.iter().map(|(_, e)| e.depth).fold(first.depth, usize::max)
            }
            ExprKind::Conditional { body, test, orelse } => {
                body.depth.max(test.depth).max(orelse.depth)
            }
            ExprKind::Call { callee, args } => {
                args.iter().map(|a| a.depth).fold(callee.depth, usize::max)
            }
            ExprKind::Subscript { target, index } => target.depth.max(index.depth),
        };
        Self {
            kind,
            span,
            depth: children + 1,
        }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Kinds of expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// Bare name: a binding, a constant or a function.
    Name(String),
    /// `-x` or `+x`.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `not x`.
    Not(Box<Expr>),
    /// Arithmetic operator.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `and` / `or`, returning the deciding operand.
    Logical {
        op: LogicalOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Comparison chain `a < b <= c`, each operand evaluated at most once.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CompareOp, Expr)>,
    },
    /// `body if test else orelse`.
    Conditional {
        body: Box<Expr>,
        test: Box<Expr>,
        orelse: Box<Expr>,
    },
    /// `callee(args...)`.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `target[index]`.
    Subscript { target: Box<Expr>, index: Box<Expr> },
}

/// Prefix arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Operator as written in source.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }
}

/// Short-circuit boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
}

impl CompareOp {
    /// Operator as written in source.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
        }
    }
}

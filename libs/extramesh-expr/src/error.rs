//! # Expression Errors
//!
//! Three layers of failure:
//!
//! - [`ParseError`]: the text is not in the language (with a byte span)
//! - [`CompileError`]: it parses but names or arities are not allowed
//! - [`EvalError`]: a numeric failure at a particular sample
//!
//! ## Example
//!
//! ```rust
//! use extramesh_expr::error::ParseError;
//!
//! let error = ParseError::unexpected_token(")", "expression");
//! assert!(error.to_string().contains("unexpected token ')'"));
//! ```

use crate::span::Span;
use std::fmt;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `found`: Token that was found
    /// - `expected`: Description of expected token
    pub fn unexpected_token(found: &str, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create unexpected end of input error.
    pub fn unexpected_eof(expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create error with span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.start)
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Found unexpected token.
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Input ended early.
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// Number literal that does not convert to a float.
    InvalidNumber {
        /// The invalid text.
        text: String,
    },

    /// Valid Python, but outside the arithmetic subset (strings, attribute
    /// access, assignments, ...).
    Unsupported {
        /// What was found.
        construct: String,
    },

    /// Nesting deeper than the configured limit.
    TooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token '{}', expected {}", found, expected)
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {}", expected)
            }
            Self::InvalidNumber { text } => write!(f, "invalid number '{}'", text),
            Self::Unsupported { construct } => {
                write!(f, "{} is not allowed in expressions", construct)
            }
            Self::TooDeep { limit } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

// =============================================================================
// COMPILE ERROR
// =============================================================================

/// Errors raised while turning source text into an [`Expression`](crate::Expression).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The source does not parse.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// A name outside the whitelist and the bound variables.
    #[error("name '{name}' is not defined")]
    UnknownName { name: String, span: Span },

    /// Calling something that is not a whitelisted function.
    #[error("'{name}' is not callable")]
    NotCallable { name: String, span: Span },

    /// A function used without calling it.
    #[error("function '{name}' must be called")]
    FunctionValue { name: String, span: Span },

    /// Wrong number of arguments to a function.
    #[error("{name}() takes {expected} but {found} were given")]
    Arity {
        name: String,
        expected: String,
        found: usize,
        span: Span,
    },
}

impl CompileError {
    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::Parse(e) => e.span,
            Self::UnknownName { span, .. }
            | Self::NotCallable { span, .. }
            | Self::FunctionValue { span, .. }
            | Self::Arity { span, .. } => *span,
        }
    }
}

// =============================================================================
// EVAL ERROR
// =============================================================================

/// Numeric failures during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Division, modulo or power by zero.
    #[error("division by zero: {message}")]
    ZeroDivision { message: &'static str },

    /// Argument outside a function's domain (e.g. `sqrt(-1)`).
    #[error("math domain error in {operation}")]
    Domain { operation: &'static str },

    /// Finite inputs produced an infinite result.
    #[error("numerical result out of range in {operation}")]
    Overflow { operation: &'static str },

    /// Operation applied to the wrong kind of value.
    #[error("type error: {message}")]
    Type { message: String },

    /// Tuple subscript outside its bounds.
    #[error("tuple index {index} out of range for length {len}")]
    Index { index: i64, len: usize },

    /// Fewer values supplied than the expression's scope declares.
    #[error("expected {expected} bound values, got {found}")]
    Unbound { expected: usize, found: usize },
}

impl EvalError {
    /// Creates a division by zero error.
    pub fn zero_division(message: &'static str) -> Self {
        Self::ZeroDivision { message }
    }

    /// Creates a domain error.
    pub fn domain(operation: &'static str) -> Self {
        Self::Domain { operation }
    }

    /// Creates an overflow error.
    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }

    /// Creates a type error.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

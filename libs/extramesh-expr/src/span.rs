//! # Source Spans
//!
//! Byte ranges into an expression string, used by tokens, syntax nodes
//! and errors.

use std::fmt;

/// A half-open byte range `[start, end)` in the source text.
///
/// ## Example
///
/// ```rust
/// use extramesh_expr::span::Span;
///
/// let span = Span::new(2, 5).merge(Span::new(7, 9));
/// assert_eq!(span, Span::new(2, 9));
/// assert_eq!(span.len(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// First byte covered.
    pub start: usize,
    /// One past the last byte covered.
    pub end: usize,
}

impl Span {
    /// Create a span from byte offsets.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span at offset zero.
    pub const fn zero() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Number of bytes covered.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both.
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Slice the covered text out of `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Anything that knows where it came from.
pub trait Spanned {
    /// Source span of the item.
    fn span(&self) -> Span;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_text() {
        let source = "sin(u) + v";
        assert_eq!(Span::new(0, 3).text(source), "sin");
        assert_eq!(Span::new(9, 10).text(source), "v");
        assert_eq!(Span::new(20, 30).text(source), "");
    }

    #[test]
    fn test_span_merge_is_order_independent() {
        let a = Span::new(4, 6);
        let b = Span::new(1, 2);
        assert_eq!(a.merge(b), b.merge(a));
        assert!(Span::zero().is_empty());
    }
}

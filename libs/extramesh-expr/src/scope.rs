//! # Binding Scope
//!
//! The ordered set of variable names an expression may read. Each name
//! maps to a slot index; evaluation supplies one `f64` per slot.

/// Names bound at evaluation time, in slot order.
///
/// ## Example
///
/// ```rust
/// use extramesh_expr::Scope;
///
/// let scope = Scope::new(&["x", "y"]);
/// assert_eq!(scope.slot("y"), Some(1));
/// assert_eq!(scope.slot("z"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    names: Vec<String>,
}

impl Scope {
    /// Create a scope from names in slot order.
    ///
    /// A repeated name keeps its first slot.
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Slot index of `name`, if bound.
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// A scope holding only the first `len` names.
    ///
    /// Used to compile a helper against the helpers defined before it.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            names: self.names[..len.min(self.names.len())].to_vec(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no names are bound.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Bound names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let scope = Scope::new(&["u", "v", "n", "a", "b"]);
        let prefix = scope.prefix(4);
        assert_eq!(prefix.len(), 4);
        assert_eq!(prefix.slot("a"), Some(3));
        assert_eq!(prefix.slot("b"), None);
        assert_eq!(scope.prefix(99), scope);
    }

    #[test]
    fn test_duplicate_keeps_first_slot() {
        let scope = Scope::new(&["x", "x"]);
        assert_eq!(scope.slot("x"), Some(0));
    }

    #[test]
    fn test_names_in_order() {
        let scope = Scope::new(&["u", "v"]);
        assert_eq!(scope.names().collect::<Vec<_>>(), vec!["u", "v"]);
        assert!(Scope::default().is_empty());
    }
}

//! # Compilation
//!
//! Resolves a parsed [`Expr`] against a [`Scope`] and the builtin
//! whitelist, producing an immutable [`Expression`] that evaluates
//! without any further name lookups.
//!
//! Resolution order for a bare name: bound variables, then the constants
//! `e` and `pi`. Call targets must be whitelisted functions. Anything else
//! is a [`CompileError`].

use crate::ast::{BinaryOp, CompareOp, Expr, ExprKind, LogicalOp, UnaryOp};
use crate::builtins::{constant, Builtin};
use crate::error::CompileError;
use crate::parser;
use crate::scope::Scope;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

// =============================================================================
// COMPILED TREE
// =============================================================================

/// Resolved expression node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Constant(f64),
    Slot(usize),
    Unary(UnaryOp, Box<Node>),
    Not(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Logical(LogicalOp, Box<Node>, Box<Node>),
    Compare(Box<Node>, Vec<(CompareOp, Node)>),
    Conditional {
        test: Box<Node>,
        body: Box<Node>,
        orelse: Box<Node>,
    },
    Call(Builtin, Vec<Node>),
    Subscript(Box<Node>, Box<Node>),
}

/// A compiled, sandboxed expression.
///
/// Immutable after compilation; safe to share across threads.
///
/// ## Example
///
/// ```rust
/// use extramesh_expr::{Expression, Scope};
///
/// let scope = Scope::new(&["x", "y"]);
/// let expr = Expression::compile("1 - ( x**2 + y**2 )", &scope)?;
/// assert_eq!(expr.eval(&[0.5, 0.5])?, 0.5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    pub(crate) root: Node,
    slot_count: usize,
}

impl Expression {
    /// Parse and compile `source` against `scope`.
    ///
    /// # Errors
    ///
    /// - [`CompileError::Parse`] for text outside the language
    /// - [`CompileError::UnknownName`] for names not bound and not whitelisted
    /// - [`CompileError::NotCallable`] / [`CompileError::FunctionValue`] for
    ///   misuse of variables and functions
    /// - [`CompileError::Arity`] for wrong argument counts
    pub fn compile(source: &str, scope: &Scope) -> Result<Self, CompileError> {
        let ast = parser::parse(source)?;
        let root = Compiler { scope }.compile(&ast)?;
        log::trace!("compiled expression {:?} over {} slots", source, scope.len());
        Ok(Self {
            source: source.to_string(),
            root,
            slot_count: scope.len(),
        })
    }

    /// Original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of bound values [`eval`](Self::eval) expects (at least).
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Check if the expression reads no bound variables, so its value is the
    /// same at every sample.
    pub fn is_constant(&self) -> bool {
        fn walk(node: &Node) -> bool {
            match node {
                Node::Constant(_) => true,
                Node::Slot(_) => false,
                Node::Unary(_, a) | Node::Not(a) => walk(a),
                Node::Binary(_, a, b) | Node::Logical(_, a, b) | Node::Subscript(a, b) => {
                    walk(a) && walk(b)
                }
                Node::Compare(first, rest) => walk(first) && rest.iter().all(|(_, n)| walk(n)),
                Node::Conditional { test, body, orelse } => {
                    walk(test) && walk(body) && walk(orelse)
                }
                Node::Call(_, args) => args.iter().all(walk),
            }
        }
        walk(&self.root)
    }
}

// =============================================================================
// COMPILER
// =============================================================================

struct Compiler<'a> {
    scope: &'a Scope,
}

impl Compiler<'_> {
    fn compile(&self, expr: &Expr) -> Result<Node, CompileError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.compile_node(expr)
        })
    }

    fn boxed(&self, expr: &Expr) -> Result<Box<Node>, CompileError> {
        self.compile(expr).map(Box::new)
    }

    fn compile_node(&self, expr: &Expr) -> Result<Node, CompileError> {
        let node = match &expr.kind {
            ExprKind::Number(n) => Node::Constant(*n),
            ExprKind::Name(name) => self.resolve(name, expr)?,
            ExprKind::Unary { op, operand } => Node::Unary(*op, self.boxed(operand)?),
            ExprKind::Not(operand) => Node::Not(self.boxed(operand)?),
            ExprKind::Binary { op, lhs, rhs } => {
                Node::Binary(*op, self.boxed(lhs)?, self.boxed(rhs)?)
            }
            ExprKind::Logical { op, lhs, rhs } => {
                Node::Logical(*op, self.boxed(lhs)?, self.boxed(rhs)?)
            }
            ExprKind::Compare { first, rest } => Node::Compare(
                self.boxed(first)?,
                rest.iter()
                    .map(|(op, e)| Ok((*op, self.compile(e)?)))
                    .collect::<Result<_, CompileError>>()?,
            ),
            ExprKind::Conditional { body, test, orelse } => Node::Conditional {
                test: self.boxed(test)?,
                body: self.boxed(body)?,
                orelse: self.boxed(orelse)?,
            },
            ExprKind::Call { callee, args } => self.compile_call(callee, args, expr)?,
            ExprKind::Subscript { target, index } => {
                Node::Subscript(self.boxed(target)?, self.boxed(index)?)
            }
        };
        Ok(node)
    }

    /// Resolve a name used as a value.
    fn resolve(&self, name: &str, expr: &Expr) -> Result<Node, CompileError> {
        if let Some(slot) = self.scope.slot(name) {
            return Ok(Node::Slot(slot));
        }
        if let Some(value) = constant(name) {
            return Ok(Node::Constant(value));
        }
        if Builtin::lookup(name).is_some() {
            return Err(CompileError::FunctionValue {
                name: name.to_string(),
                span: expr.span,
            });
        }
        Err(CompileError::UnknownName {
            name: name.to_string(),
            span: expr.span,
        })
    }

    fn compile_call(&self, callee: &Expr, args: &[Expr], call: &Expr) -> Result<Node, CompileError> {
        let name = match &callee.kind {
            ExprKind::Name(name) => name,
            _ => {
                return Err(CompileError::NotCallable {
                    name: "expression".to_string(),
                    span: callee.span,
                })
            }
        };

        // Bound variables shadow builtins of the same name
        let builtin = match (self.scope.slot(name), Builtin::lookup(name)) {
            (None, Some(builtin)) => builtin,
            (Some(_), _) => {
                return Err(CompileError::NotCallable {
                    name: name.clone(),
                    span: callee.span,
                })
            }
            (None, None) if constant(name).is_some() => {
                return Err(CompileError::NotCallable {
                    name: name.clone(),
                    span: callee.span,
                })
            }
            (None, None) => {
                return Err(CompileError::UnknownName {
                    name: name.clone(),
                    span: callee.span,
                })
            }
        };

        let arity = builtin.arity();
        if !arity.accepts(args.len()) {
            return Err(CompileError::Arity {
                name: name.clone(),
                expected: arity.to_string(),
                found: args.len(),
                span: call.span,
            });
        }

        let args = args
            .iter()
            .map(|a| self.compile(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Call(builtin, args))
    }
}

// =============================================================================
// TESTS
// =============================================================================

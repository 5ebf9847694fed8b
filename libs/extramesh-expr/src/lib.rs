//! # Extra Mesh: Expressions
//!
//! Sandboxed arithmetic for user-entered surface equations such as
//! `1 - ( x**2 + y**2 )` or `cos(v)*(1+cos(u))*sin(v/8)`.
//!
//! ## Architecture
//!
//! ```text
//! Source → Lexer → Parser → Expr (syntax)
//!                              ↓ compile against Scope + whitelist
//!                           Expression → eval(&[f64]) → f64
//! ```
//!
//! Only the names in a [`Scope`], the constants `e` and `pi` and the
//! whitelisted [`Builtin`] functions resolve. Nothing in the language can
//! reach the filesystem, the environment or any host interpreter.
//!
//! ## Usage
//!
//! ```rust
//! use extramesh_expr::{Expression, Scope};
//!
//! let scope = Scope::new(&["u", "v"]);
//! let expr = Expression::compile("sin(u)*sin(v/8)+cos(v/8)*1.5", &scope)?;
//! let z = expr.eval(&[0.0, 0.0])?;
//! assert_eq!(z, 1.5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod builtins;
mod compile;
pub mod error;
mod eval;
pub mod lexer;
pub mod numeric;
pub mod parser;
mod scope;
pub mod span;
mod value;

pub use builtins::Builtin;
pub use compile::Expression;
pub use error::{CompileError, EvalError, ParseError};
pub use scope::Scope;
pub use value::Value;

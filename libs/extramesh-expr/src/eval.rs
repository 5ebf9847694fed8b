//! # Evaluation
//!
//! Walks a compiled tree against a slice of bound values. Nesting is bounded
//! at parse time but a flat chain of operators is not, so the walk grows the
//! stack with `stacker` the way compilation does.

use crate::ast::{CompareOp, LogicalOp, UnaryOp};
use crate::compile::{Expression, Node};
use crate::error::EvalError;
use crate::numeric;
use crate::value::Value;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

impl Expression {
    /// Evaluate to a number.
    ///
    /// `values[i]` is the value of the scope's slot `i`; extra trailing
    /// values are ignored.
    ///
    /// # Errors
    ///
    /// Any [`EvalError`] raised along the way, or a type error if the
    /// result is a tuple.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use extramesh_expr::{EvalError, Expression, Scope};
    ///
    /// let expr = Expression::compile("1/x", &Scope::new(&["x"])).unwrap();
    /// assert_eq!(expr.eval(&[4.0]), Ok(0.25));
    /// assert!(matches!(expr.eval(&[0.0]), Err(EvalError::ZeroDivision { .. })));
    /// ```
    pub fn eval(&self, values: &[f64]) -> Result<f64, EvalError> {
        match self.eval_value(values)? {
            Value::Number(n) => Ok(n),
            Value::Tuple(_) => Err(EvalError::type_error(
                "expression produced a tuple, expected a number",
            )),
        }
    }

    /// Evaluate to a [`Value`], which may be a tuple.
    pub fn eval_value(&self, values: &[f64]) -> Result<Value, EvalError> {
        if values.len() < self.slot_count() {
            return Err(EvalError::Unbound {
                expected: self.slot_count(),
                found: values.len(),
            });
        }
        evaluate(&self.root, values)
    }
}

fn evaluate(node: &Node, values: &[f64]) -> Result<Value, EvalError> {
    stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        evaluate_node(node, values)
    })
}

fn evaluate_node(node: &Node, values: &[f64]) -> Result<Value, EvalError> {
    match node {
        Node::Constant(n) => Ok(Value::Number(*n)),
        Node::Slot(slot) => Ok(Value::Number(values[*slot])),

        Node::Unary(op, operand) => {
            let value = evaluate(operand, values)?;
            let n = match value {
                Value::Number(n) => n,
                Value::Tuple(_) => {
                    let symbol = if *op == UnaryOp::Neg { "-" } else { "+" };
                    return Err(EvalError::type_error(format!(
                        "bad operand type for unary {symbol}: 'tuple'"
                    )));
                }
            };
            Ok(Value::Number(match op {
                UnaryOp::Neg => -n,
                UnaryOp::Pos => n,
            }))
        }

        Node::Not(operand) => Ok(Value::from_bool(!evaluate(operand, values)?.is_truthy())),

        Node::Binary(op, lhs, rhs) => {
            let l = evaluate(lhs, values)?;
            let r = evaluate(rhs, values)?;
            match (&l, &r) {
                (Value::Number(x), Value::Number(y)) => numeric::binary(*op, *x, *y).map(Value::Number),
                _ => Err(EvalError::type_error(format!(
                    "unsupported operand type(s) for {}: '{}' and '{}'",
                    op.symbol(),
                    l.type_name(),
                    r.type_name()
                ))),
            }
        }

        Node::Logical(op, lhs, rhs) => {
            let l = evaluate(lhs, values)?;
            let decided = match op {
                LogicalOp::And => !l.is_truthy(),
                LogicalOp::Or => l.is_truthy(),
            };
            if decided {
                Ok(l)
            } else {
                evaluate(rhs, values)
            }
        }

        Node::Compare(first, rest) => {
            let mut left = evaluate(first, values)?;
            for (op, operand) in rest {
                let right = evaluate(operand, values)?;
                if !compare(*op, &left, &right)? {
                    return Ok(Value::from_bool(false));
                }
                left = right;
            }
            Ok(Value::from_bool(true))
        }

        Node::Conditional { test, body, orelse } => {
            if evaluate(test, values)?.is_truthy() {
                evaluate(body, values)
            } else {
                evaluate(orelse, values)
            }
        }

        Node::Call(builtin, args) => {
            let args = args
                .iter()
                .map(|a| evaluate(a, values))
                .collect::<Result<Vec<_>, _>>()?;
            builtin.call(&args)
        }

        Node::Subscript(target, index) => {
            let target = evaluate(target, values)?;
            let index = evaluate(index, values)?;
            target.index(&index)
        }
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Number(x), Value::Number(y)) => Ok(match op {
            CompareOp::Lt => x < y,
            CompareOp::LtEq => x <= y,
            CompareOp::Gt => x > y,
            CompareOp::GtEq => x >= y,
            CompareOp::Eq => x == y,
            CompareOp::NotEq => x != y,
        }),
        _ => match op {
            CompareOp::Eq => Ok(left == right),
            CompareOp::NotEq => Ok(left != right),
            _ => Err(EvalError::type_error(format!(
                "'{}' not supported between instances of '{}' and '{}'",
                op.symbol(),
                left.type_name(),
                right.type_name()
            ))),
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

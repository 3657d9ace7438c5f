use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operator applied to a subexpression.
    ///
    /// Negation, logical not, and bitwise complement are pure. The four
    /// increment/decrement forms additionally update the operand, which
    /// must therefore be a variable; the prefix forms yield the updated
    /// value and the postfix forms yield the value from before the update.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: Operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// `TypeError` when the operand has the wrong type or an
    /// increment/decrement is applied to something other than a variable;
    /// `ConstError` when it targets a constant.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                operand: &Expr,
                                line: usize)
                                -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => {
                let value = self.eval(operand)?;
                match value {
                    Value::Integer(n) => {
                        n.checked_neg()
                         .map(Value::Integer)
                         .ok_or(RuntimeError::Overflow { line })
                    },
                    Value::Float(x) => Ok(Value::Float(-x)),
                    _ => Err(RuntimeError::ExpectedNumber { line }),
                }
            },

            UnaryOperator::Not => Ok(Value::Bool(!self.eval(operand)?.as_bool(line)?)),

            UnaryOperator::BitNot => {
                Ok(Value::Integer(!self.eval(operand)?.as_integer(line)?))
            },

            UnaryOperator::PreIncrement => self.step_variable(operand, 1, line, true),
            UnaryOperator::PreDecrement => self.step_variable(operand, -1, line, true),
            UnaryOperator::PostIncrement => self.step_variable(operand, 1, line, false),
            UnaryOperator::PostDecrement => self.step_variable(operand, -1, line, false),
        }
    }

    /// Adds `delta` to a numeric variable in place.
    ///
    /// # Parameters
    /// - `operand`: The operand expression; must be a variable reference.
    /// - `delta`: `1` for increment, `-1` for decrement.
    /// - `line`: Line number for error reporting.
    /// - `prefix`: Whether the caller wants the new value (prefix) or the
    ///   old one (postfix).
    fn step_variable(&mut self,
                     operand: &Expr,
                     delta: i64,
                     line: usize,
                     prefix: bool)
                     -> EvalResult<Value> {
        let Expr::Variable { name, .. } = operand else {
            return Err(RuntimeError::TypeError { details:
                                                     "'++'/'--' can only be applied to a variable"
                                                                                 .to_string(),
                                                 line });
        };

        let binding =
            self.env.get(name)
                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                               line })?;
        if binding.constant {
            return Err(RuntimeError::AssignmentToConstant { name: name.clone(),
                                                            line });
        }

        let old = binding.value.clone();
        let new = match &old {
            Value::Integer(n) => {
                Value::Integer(n.checked_add(delta).ok_or(RuntimeError::Overflow { line })?)
            },
            #[allow(clippy::cast_precision_loss)]
            Value::Float(x) => Value::Float(x + delta as f64),
            _ => return Err(RuntimeError::ExpectedNumber { line }),
        };

        self.env.assign(name, new.clone());
        Ok(if prefix { new } else { old })
    }
}

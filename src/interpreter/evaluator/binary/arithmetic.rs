use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::num::i64_to_u32_checked,
};

impl Interpreter {
    /// Evaluates an arithmetic operation (`+ - * / %`).
    ///
    /// `+` with a string on either side concatenates, stringifying the
    /// other operand with the canonical printer. Numeric operations keep
    /// `Integer` when both operands are integers and promote to `Float`
    /// otherwise, with one exception: an inexact integer division promotes
    /// its result to `Float` so `10 / 2` is `5` but `1 / 2` is `0.5`.
    /// Integer arithmetic is checked; overflow is an error.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `ArithError` on division or modulo by zero and on overflow;
    /// `TypeError` for non-numeric operands.
    ///
    /// # Example
    /// ```
    /// use foxl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let exact = Interpreter::eval_arithmetic(BinaryOperator::Div,
    ///                                          &Value::Integer(10),
    ///                                          &Value::Integer(2),
    ///                                          1);
    /// assert_eq!(exact.unwrap(), Value::Integer(5));
    ///
    /// let inexact = Interpreter::eval_arithmetic(BinaryOperator::Div,
    ///                                            &Value::Integer(1),
    ///                                            &Value::Integer(2),
    ///                                            1);
    /// assert_eq!(inexact.unwrap(), Value::Float(0.5));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        if op == Add && (left.is_str() || right.is_str()) {
            return Ok(Value::Str(format!("{left}{right}")));
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let (a, b) = (*a, *b);
                match op {
                    Add => a.checked_add(b).map(Value::Integer).ok_or(RuntimeError::Overflow { line }),
                    Sub => a.checked_sub(b).map(Value::Integer).ok_or(RuntimeError::Overflow { line }),
                    Mul => a.checked_mul(b).map(Value::Integer).ok_or(RuntimeError::Overflow { line }),
                    Div => {
                        if b == 0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        if a % b == 0 {
                            Ok(Value::Integer(a / b))
                        } else {
                            Ok(Value::Float(left.as_float(line)? / right.as_float(line)?))
                        }
                    },
                    Mod => {
                        if b == 0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        Ok(Value::Integer(a % b))
                    },
                    _ => unreachable!("eval_arithmetic only receives arithmetic operators"),
                }
            },

            _ if left.is_number() && right.is_number() => {
                let a = left.as_float(line)?;
                let b = right.as_float(line)?;
                match op {
                    Add => Ok(Value::Float(a + b)),
                    Sub => Ok(Value::Float(a - b)),
                    Mul => Ok(Value::Float(a * b)),
                    Div => {
                        if b == 0.0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        Ok(Value::Float(a / b))
                    },
                    Mod => {
                        if b == 0.0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        Ok(Value::Float(a % b))
                    },
                    _ => unreachable!("eval_arithmetic only receives arithmetic operators"),
                }
            },

            _ => Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                                left.type_name(),
                                                                right.type_name()),
                                               line }),
        }
    }

    /// Evaluates the power operator `^`.
    ///
    /// Two integers with a non-negative exponent use checked integer
    /// exponentiation; a negative exponent, or any float operand, computes
    /// in floating point.
    ///
    /// # Errors
    /// `ArithError` on overflow, `TypeError` for non-numeric operands.
    pub fn eval_pow(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Integer(base), Value::Integer(exponent)) if *exponent >= 0 => {
                let exponent = i64_to_u32_checked(*exponent, line)?;
                base.checked_pow(exponent)
                    .map(Value::Integer)
                    .ok_or(RuntimeError::Overflow { line })
            },
            _ => Ok(Value::Float(left.as_float(line)?.powf(right.as_float(line)?))),
        }
    }

    /// Evaluates the root operator `^/`: `a ^/ b` is `a` raised to `1/b`.
    ///
    /// The result is always a float; `8 ^/ 3` is `2` only up to floating
    /// point.
    ///
    /// # Errors
    /// `ArithError` when the exponent is zero, `TypeError` for non-numeric
    /// operands.
    pub fn eval_root(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        let base = left.as_float(line)?;
        let exponent = right.as_float(line)?;

        if exponent == 0.0 {
            return Err(RuntimeError::ZeroRoot { line });
        }

        Ok(Value::Float(base.powf(1.0 / exponent)))
    }
}

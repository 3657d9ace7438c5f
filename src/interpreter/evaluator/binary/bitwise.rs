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
    /// Evaluates a bitwise or shift operation.
    ///
    /// All of `^^ & | << >> <<< >>>` require integer operands; floats are
    /// not silently truncated. Shift counts must be non-negative and
    /// smaller than the 64-bit width. `>>` is an arithmetic shift and
    /// `>>>` shifts the two's complement bit pattern, filling with zeros;
    /// `<<<` behaves exactly like `<<`.
    ///
    /// # Parameters
    /// - `op`: The bitwise operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand (the shift count for shifts).
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `TypeError` for non-integer operands or invalid shift counts.
    ///
    /// # Example
    /// ```
    /// use foxl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let shifted = Interpreter::eval_bitwise(BinaryOperator::Shl,
    ///                                         &Value::Integer(1),
    ///                                         &Value::Integer(4),
    ///                                         1);
    /// assert_eq!(shifted.unwrap(), Value::Integer(16));
    ///
    /// let zero_fill = Interpreter::eval_bitwise(BinaryOperator::ShrZero,
    ///                                           &Value::Integer(-1),
    ///                                           &Value::Integer(63),
    ///                                           1);
    /// assert_eq!(zero_fill.unwrap(), Value::Integer(1));
    /// ```
    #[allow(clippy::cast_possible_wrap)]
    #[allow(clippy::cast_sign_loss)]
    pub fn eval_bitwise(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        line: usize)
                        -> EvalResult<Value> {
        let a = left.as_integer(line)?;
        let b = right.as_integer(line)?;

        let result = match op {
            BinaryOperator::BitXor => a ^ b,
            BinaryOperator::BitAnd => a & b,
            BinaryOperator::BitOr => a | b,

            BinaryOperator::Shl | BinaryOperator::ShlZero => {
                let count = i64_to_u32_checked(b, line)?;
                a.checked_shl(count)
                 .ok_or(RuntimeError::TypeError { details: format!("Shift count {b} is out of range"),
                                                  line })?
            },

            BinaryOperator::Shr => {
                let count = i64_to_u32_checked(b, line)?;
                a.checked_shr(count)
                 .ok_or(RuntimeError::TypeError { details: format!("Shift count {b} is out of range"),
                                                  line })?
            },

            BinaryOperator::ShrZero => {
                let count = i64_to_u32_checked(b, line)?;
                if count >= 64 {
                    return Err(RuntimeError::TypeError { details: format!("Shift count {b} is out of range"),
                                                         line });
                }
                ((a as u64) >> count) as i64
            },

            _ => unreachable!("eval_bitwise only receives bitwise operators"),
        };

        Ok(Value::Integer(result))
    }
}

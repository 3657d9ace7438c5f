use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{Value, values_equal},
    },
};

impl Interpreter {
    /// Evaluates a comparison, equality, or membership operation.
    ///
    /// Ordering comparisons require both operands to be numeric; two
    /// integers compare exactly, mixed operands compare as floats.
    /// Equality compares across the whole value union with numeric
    /// promotion, so `3 == 3.0` holds and values of different types are
    /// simply unequal. `in` and `not in` test membership of the left value
    /// in the right array using the same equality.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `TypeError` when ordering non-numbers or testing membership in a
    /// non-array.
    ///
    /// # Example
    /// ```
    /// use foxl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let result = Interpreter::eval_comparison(BinaryOperator::Equal,
    ///                                           &Value::Integer(3),
    ///                                           &Value::Float(3.0),
    ///                                           1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, In, Less, LessEqual, NotEqual, NotIn};

        let result = match op {
            Equal => values_equal(left, right),
            NotEqual => !values_equal(left, right),

            In | NotIn => {
                let elements = right.as_slice(line)?;
                let found = elements.iter().any(|element| values_equal(left, element));
                if op == In { found } else { !found }
            },

            Less | LessEqual | Greater | GreaterEqual => {
                let ordering = Self::compare_numbers(left, right, line)?;
                match op {
                    Less => ordering.is_lt(),
                    LessEqual => ordering.is_le(),
                    Greater => ordering.is_gt(),
                    GreaterEqual => ordering.is_ge(),
                    _ => unreachable!(),
                }
            },

            _ => unreachable!("eval_comparison only receives comparison operators"),
        };

        Ok(Value::Bool(result))
    }

    /// Orders two numeric values.
    ///
    /// Integer pairs compare exactly; anything else compares as floats.
    /// NaN never occurs from comparison inputs that parse as literals, but
    /// a NaN operand compares as unequal-and-not-less, matching float
    /// semantics.
    fn compare_numbers(left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<std::cmp::Ordering> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            return Ok(a.cmp(b));
        }

        let a = left.as_float(line)?;
        let b = right.as_float(line)?;

        Ok(a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Greater))
    }
}

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation between two already-computed values.
    ///
    /// This function routes the operation to specialized handlers depending
    /// on the operator: arithmetic (including string concatenation and
    /// powers), bitwise and shift operations, and comparisons. The logical
    /// and coalescing operators are normally short-circuited before their
    /// operands are both evaluated; when they do arrive here (from compound
    /// assignment plumbing) they combine the given values directly.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use foxl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let result = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                       &Value::Integer(3),
    ///                                       &Value::Integer(4),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Coalesce, Div, Equal, Greater, GreaterEqual, In,
            Less, LessEqual, Mod, Mul, NotEqual, NotIn, Or, Pow, Root, Shl, ShlZero, Shr,
            ShrZero, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, line),

            Pow => Self::eval_pow(left, right, line),
            Root => Self::eval_root(left, right, line),

            BitXor | BitAnd | BitOr | Shl | Shr | ShlZero | ShrZero => {
                Self::eval_bitwise(op, left, right, line)
            },

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual | In | NotIn => {
                Self::eval_comparison(op, left, right, line)
            },

            And => Ok(Value::Bool(left.truthy(line)? && right.truthy(line)?)),
            Or => Ok(Value::Bool(left.truthy(line)? || right.truthy(line)?)),

            Coalesce => Ok(if left.is_null() { right.clone() } else { left.clone() }),
        }
    }
}

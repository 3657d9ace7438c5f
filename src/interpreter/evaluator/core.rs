use std::io::{self, BufRead, Write};

use crate::{
    ast::{BinaryOperator, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        env::Environment,
        loader::{FsLoader, SourceLoader},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control signal produced by executing a statement.
///
/// `Return` is not an error: it unwinds to the nearest enclosing function
/// activation (or ends the current top-level node), carrying the returned
/// value. Every statement walker propagates it outward untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding with this value.
    Return(Value),
}

/// The tree-walking evaluator.
///
/// Owns the environment, the console handles, and the source loader used by
/// `include`. There is no global state: everything the walker touches lives
/// in this struct, so two interpreters never interfere.
///
/// ## Usage
///
/// An `Interpreter` is created once and fed top-level statements in order.
/// [`Interpreter::new`] wires the process console; tests use
/// [`Interpreter::with_parts`] to substitute in-memory I/O and loaders.
pub struct Interpreter {
    /// The current environment. Function calls swap in a snapshot and
    /// restore this field on exit.
    pub(crate) env:       Environment,
    /// Source of `read` lines.
    pub(crate) input:     Box<dyn BufRead>,
    /// Target of `write` output and `read` prompts.
    pub(crate) out:       Box<dyn Write>,
    /// Resolves `include` paths to source text.
    pub(crate) loader:    Box<dyn SourceLoader>,
    /// Paths currently being included, innermost last. Used to detect
    /// include cycles.
    pub(crate) including: Vec<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter wired to the process console and filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Box::new(io::BufReader::new(io::stdin())),
                         Box::new(io::stdout()),
                         Box::new(FsLoader))
    }

    /// Creates an interpreter with explicit I/O handles and source loader.
    ///
    /// This is the seam that makes evaluation deterministic and testable:
    /// given the same input stream, the output stream is a function of the
    /// program alone.
    #[must_use]
    pub fn with_parts(input: Box<dyn BufRead>,
                      out: Box<dyn Write>,
                      loader: Box<dyn SourceLoader>)
                      -> Self {
        Self { env: Environment::new(),
               input,
               out,
               loader,
               including: Vec::new() }
    }

    /// Borrows the current environment.
    #[must_use]
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Looks up the current value of a variable, if bound.
    ///
    /// ## Example
    /// ```
    /// use foxl::interpreter::{evaluator::core::Interpreter, value::Value};
    ///
    /// let mut interpreter = Interpreter::new();
    /// foxl::run_source("let x = 2 + 3;", &mut interpreter).unwrap();
    ///
    /// assert_eq!(interpreter.get("x"), Some(&Value::Integer(5)));
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.get(name).map(|binding| &binding.value)
    }

    /// Executes a sequence of top-level statements in order.
    ///
    /// # Errors
    /// Stops at the first failing statement and returns its error.
    pub fn run(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            self.exec_toplevel(statement)?;
        }
        Ok(())
    }

    /// Executes one top-level statement.
    ///
    /// A `return` at top level ends evaluation of that node and is
    /// otherwise ignored, per the language rules.
    ///
    /// # Errors
    /// Returns the first runtime error raised while executing.
    pub fn exec_toplevel(&mut self, statement: &Statement) -> EvalResult<()> {
        self.exec_statement(statement)?;
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches on the expression variant; the match is
    /// exhaustive, so adding a node forces every walker site to handle it.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    ///
    /// # Errors
    /// Any runtime error raised by the expression or its children.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),

            Expr::Variable { name, line } => self.eval_variable(name, *line),

            Expr::Unary { op, operand, line } => self.eval_unary_op(*op, operand, *line),

            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary_op(left, *op, right, *line),

            Expr::Ternary { condition,
                            then,
                            otherwise,
                            line, } => {
                let selected = if self.eval(condition)?.as_bool(*line)? {
                    then
                } else {
                    otherwise
                };
                self.eval(selected)
            },

            Expr::Call { name,
                         arguments,
                         line, } => {
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.eval(argument)?);
                }
                self.call_function(name, args, *line)
            },

            Expr::Array { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Ok(values.into())
            },

            Expr::Index { array, index, line } => self.eval_index(array, index, *line),

            Expr::Read { prompt, .. } => {
                let prompt = match prompt {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                self.read_value(prompt.as_ref())
            },
        }
    }

    /// Looks up a variable by name.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `NameError` if the variable is not bound.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.env
            .get(name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Evaluates a binary operator applied to two expressions.
    ///
    /// The short-circuit operators are handled here, before the operands
    /// are both evaluated: `&&`, `||`, and `??` never evaluate the side
    /// their result does not depend on. Everything else evaluates both
    /// operands left to right and defers to the value-level
    /// [`eval_binary`].
    ///
    /// [`eval_binary`]: Interpreter::eval_binary
    fn eval_binary_op(&mut self,
                      left: &Expr,
                      op: BinaryOperator,
                      right: &Expr,
                      line: usize)
                      -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                if !self.eval(left)?.truthy(line)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.truthy(line)?))
            },

            BinaryOperator::Or => {
                if self.eval(left)?.truthy(line)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.truthy(line)?))
            },

            BinaryOperator::Coalesce => {
                let value = self.eval(left)?;
                if value.is_null() { self.eval(right) } else { Ok(value) }
            },

            _ => {
                let lval = self.eval(left)?;
                let rval = self.eval(right)?;
                Self::eval_binary(op, &lval, &rval, line)
            },
        }
    }

    /// Evaluates an array indexing expression.
    ///
    /// The array expression must produce an array and the index must be an
    /// integer within `0 <= i < len`.
    ///
    /// # Errors
    /// `TypeError` for non-array or non-integer operands, `BoundsError` for
    /// out-of-range indices.
    fn eval_index(&mut self, array: &Expr, index: &Expr, line: usize) -> EvalResult<Value> {
        let array_value = self.eval(array)?;
        let index_value = self.eval(index)?;

        let elements = array_value.as_slice(line)?;
        let index = index_value.as_integer(line)?;

        usize::try_from(index)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .ok_or(RuntimeError::IndexOutOfBounds { len: elements.len(),
                                                    found: index,
                                                    line })
    }
}

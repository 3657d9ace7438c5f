use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Calls a user-defined function with already-evaluated arguments.
    ///
    /// The call works on a snapshot: the caller's environment is cloned,
    /// parameters are bound in the clone, and the shared body is executed
    /// against it. The caller's environment is restored on every exit path,
    /// so mutations inside the callee never leak back — including when the
    /// body fails. A `return` unwinding out of the body yields its value;
    /// falling off the end yields null.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `args`: Evaluated argument values, left to right.
    /// - `line`: Line number of the call, for error reporting.
    ///
    /// # Returns
    /// The function's result.
    ///
    /// # Errors
    /// `NameError` for an unknown function, `ArityError` on an argument
    /// count mismatch, and whatever the body raises.
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                args: Vec<Value>,
                                line: usize)
                                -> EvalResult<Value> {
        let function =
            self.env
                .function(name)
                .map(Rc::clone)
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                               line })?;

        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: function.params.len(),
                                                             found: args.len(),
                                                             line });
        }

        let snapshot = self.env.clone();
        let caller = std::mem::replace(&mut self.env, snapshot);

        for (param, arg) in function.params.iter().zip(args) {
            self.env.define(param, arg, false);
        }

        let outcome = self.exec_statement(&function.body);

        // Restore before surfacing anything, errors included.
        self.env = caller;

        match outcome? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }
}

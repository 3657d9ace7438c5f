use std::rc::Rc;

use crate::{
    ast::{AssignOp, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        env::Function,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Executes a single statement.
    ///
    /// Handles declarations, reassignments, control flow, function and
    /// class declarations, I/O, includes, and expression statements. The
    /// returned [`Flow`] is `Return(value)` while a `return` is unwinding
    /// and `Normal` otherwise; loops and blocks pass it through without
    /// touching it.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// The control signal produced by the statement.
    ///
    /// # Errors
    /// Any runtime error raised by the statement or its children.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VarDecl { name,
                                 initializer,
                                 constant,
                                 line, } => {
                if self.env.has(name) {
                    return Err(RuntimeError::AlreadyDeclared { name: name.clone(),
                                                               line: *line, });
                }

                let value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };

                self.env.define(name, value, *constant);
                Ok(Flow::Normal)
            },

            Statement::Reassign { name,
                                  op,
                                  value,
                                  line, } => {
                let binding = self.env.get(name).ok_or_else(|| {
                                                     RuntimeError::UnknownVariable {
                        name: name.clone(),
                        line: *line,
                    }
                                                 })?;
                if binding.constant {
                    return Err(RuntimeError::AssignmentToConstant { name: name.clone(),
                                                                    line: *line, });
                }

                let current = binding.value.clone();
                if let Some(new_value) = self.apply_assign(*op, &current, value, *line)? {
                    self.env.assign(name, new_value);
                }
                Ok(Flow::Normal)
            },

            Statement::IndexAssign { name,
                                     index,
                                     op,
                                     value,
                                     line, } => self.exec_index_assign(name, index, *op, value, *line),

            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                if self.eval(condition)?.as_bool(*line)? {
                    self.exec_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_statement(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },

            Statement::While { condition, body, line } => {
                loop {
                    if !self.eval(condition)?.as_bool(*line)? {
                        break;
                    }
                    if let Flow::Return(value) = self.exec_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::For { initializer,
                             condition,
                             step,
                             body,
                             line, } => {
                if let Flow::Return(value) = self.exec_statement(initializer)? {
                    return Ok(Flow::Return(value));
                }

                loop {
                    if !self.eval(condition)?.as_bool(*line)? {
                        break;
                    }
                    if let Flow::Return(value) = self.exec_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                    if let Flow::Return(value) = self.exec_statement(step)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::ForEach { variable,
                                 iterable,
                                 body,
                                 line, } => {
                let iterable = self.eval(iterable)?;
                let elements = iterable.as_slice(*line)?.to_vec();

                if let Some(binding) = self.env.get(variable)
                   && binding.constant
                {
                    return Err(RuntimeError::AssignmentToConstant { name: variable.clone(),
                                                                    line: *line, });
                }

                for element in elements {
                    self.env.define(variable, element, false);
                    if let Flow::Return(value) = self.exec_statement(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::Block { statements, .. } => {
                for statement in statements {
                    if let Flow::Return(value) = self.exec_statement(statement)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },

            Statement::FuncDecl { name,
                                  params,
                                  body,
                                  line, } => {
                // Re-declaration replaces the previous function.
                self.env.define_function(name,
                                         Function { params: params.clone(),
                                                    body:   Rc::clone(body),
                                                    line:   *line, });
                Ok(Flow::Normal)
            },

            Statement::ClassDecl { line, .. } => {
                Err(RuntimeError::NotImplemented { what: "class declarations",
                                                   line: *line, })
            },

            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },

            Statement::Write { expr, .. } => {
                let value = self.eval(expr)?;
                self.write_line(&value);
                Ok(Flow::Normal)
            },

            Statement::Read { target, prompt, line } => {
                let prompt = match prompt {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                let value = self.read_value(prompt.as_ref())?;

                if let Some(name) = target {
                    if let Some(binding) = self.env.get(name)
                       && binding.constant
                    {
                        return Err(RuntimeError::AssignmentToConstant { name: name.clone(),
                                                                        line: *line, });
                    }
                    self.env.define(name, value, false);
                }
                Ok(Flow::Normal)
            },

            Statement::Include { path, line, .. } => {
                self.exec_include(path, *line)?;
                Ok(Flow::Normal)
            },

            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Computes the value stored by an assignment operator.
    ///
    /// Returns `Ok(None)` when nothing should be stored, which happens only
    /// for `??=` on a non-null binding. The short-circuiting operators
    /// (`&&=`, `||=`, `??=`) skip evaluating the right-hand side when the
    /// outcome is already determined by the current value; `~=` evaluates
    /// the right-hand side and requires it to be an integer, but the stored
    /// value is the complement of the current one.
    ///
    /// # Parameters
    /// - `op`: The assignment operator.
    /// - `current`: The binding's current value.
    /// - `value`: The right-hand side expression.
    /// - `line`: Line number for error reporting.
    pub(crate) fn apply_assign(&mut self,
                               op: AssignOp,
                               current: &Value,
                               value: &Expr,
                               line: usize)
                               -> EvalResult<Option<Value>> {
        match op {
            AssignOp::Assign => Ok(Some(self.eval(value)?)),

            AssignOp::And => {
                if !current.truthy(line)? {
                    return Ok(Some(Value::Bool(false)));
                }
                Ok(Some(Value::Bool(self.eval(value)?.truthy(line)?)))
            },

            AssignOp::Or => {
                if current.truthy(line)? {
                    return Ok(Some(Value::Bool(true)));
                }
                Ok(Some(Value::Bool(self.eval(value)?.truthy(line)?)))
            },

            AssignOp::Coalesce => {
                if current.is_null() {
                    Ok(Some(self.eval(value)?))
                } else {
                    Ok(None)
                }
            },

            AssignOp::BitNot => {
                self.eval(value)?.as_integer(line)?;
                Ok(Some(Value::Integer(!current.as_integer(line)?)))
            },

            compound => {
                let rhs = self.eval(value)?;
                match compound.binary_operator() {
                    Some(op) => Ok(Some(Self::eval_binary(op, current, &rhs, line)?)),
                    None => unreachable!("non-compound operators are handled above"),
                }
            },
        }
    }

    /// Executes an indexed assignment such as `xs[i] = v;` or `xs[i] += v;`.
    ///
    /// The binding must exist, be mutable, and currently hold an array; the
    /// index must be an in-bounds integer. The write copies the backing
    /// vector if it is shared with other bindings, so sharers keep their
    /// old contents.
    fn exec_index_assign(&mut self,
                         name: &str,
                         index: &Expr,
                         op: AssignOp,
                         value: &Expr,
                         line: usize)
                         -> EvalResult<Flow> {
        let index = self.eval(index)?.as_integer(line)?;

        let binding = self.env.get(name).ok_or_else(|| {
                                             RuntimeError::UnknownVariable { name:
                                                                                 name.to_string(),
                                                                             line }
                                         })?;
        if binding.constant {
            return Err(RuntimeError::AssignmentToConstant { name: name.to_string(),
                                                            line });
        }

        let elements = binding.value.as_slice(line)?;
        let slot = usize::try_from(index).ok()
                                         .filter(|i| *i < elements.len())
                                         .ok_or(RuntimeError::IndexOutOfBounds { len: elements.len(),
                                                                                 found: index,
                                                                                 line })?;
        let current = elements[slot].clone();

        let Some(new_value) = self.apply_assign(op, &current, value, line)? else {
            return Ok(Flow::Normal);
        };

        if let Some(binding) = self.env.get_mut(name)
           && let Value::Array(elements) = &mut binding.value
        {
            Rc::make_mut(elements)[slot] = new_value;
        }

        Ok(Flow::Normal)
    }
}

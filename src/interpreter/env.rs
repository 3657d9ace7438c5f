use std::{collections::HashMap, rc::Rc};

use crate::{ast::Statement, interpreter::value::Value};

/// A variable binding: a value plus its mutability.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The current value of the binding.
    pub value:    Value,
    /// Whether the binding was declared with `const`.
    pub constant: bool,
}

/// A user-defined function registered in an environment.
///
/// The body is shared: calling the function never clones the subtree, each
/// call walks the same immutable AST.
#[derive(Debug, Clone)]
pub struct Function {
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The function body.
    pub body:   Rc<Statement>,
    /// The line of the declaration, for diagnostics.
    pub line:   usize,
}

/// A mapping from names to variable bindings and from names to functions.
///
/// The interpreter owns exactly one `Environment` at a time. A function call
/// clones it (snapshot semantics), executes the body against the copy, and
/// restores the original, so callee mutations never leak back into the
/// caller. Cloning is cheap for arrays and function bodies, which are
/// reference-counted.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Binding>,
    functions: HashMap<String, Rc<Function>>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.variables.get(name)
    }

    /// Looks up a binding mutably by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.variables.get_mut(name)
    }

    /// Returns `true` when `name` is bound to a variable.
    ///
    /// ## Example
    /// ```
    /// use foxl::interpreter::{env::Environment, value::Value};
    ///
    /// let mut env = Environment::new();
    /// env.define("x", Value::Integer(1), false);
    ///
    /// assert!(env.has("x"));
    /// assert!(!env.has("y"));
    /// ```
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Creates or replaces a binding.
    ///
    /// Callers that must refuse redeclaration or const overwrites check
    /// first; `define` itself is unconditional, which is what parameter
    /// binding and loop variables need.
    pub fn define(&mut self, name: &str, value: Value, constant: bool) {
        self.variables
            .insert(name.to_string(), Binding { value, constant });
    }

    /// Stores a new value into an existing binding.
    ///
    /// The caller is responsible for the existence and const checks; this
    /// keeps the error lines at the call sites where they belong.
    pub fn assign(&mut self, name: &str, value: Value) {
        if let Some(binding) = self.variables.get_mut(name) {
            binding.value = value;
        }
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Rc<Function>> {
        self.functions.get(name)
    }

    /// Registers a function, replacing any previous one with the same name.
    pub fn define_function(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), Rc::new(function));
    }
}

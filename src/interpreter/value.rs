use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. Numeric values
/// keep their integer-vs-float kind; arithmetic preserves `Integer` when both
/// operands are integers and promotes to `Float` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value, produced by `let` without an initializer and by
    /// functions that fall through without `return`.
    Null,
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A string value.
    Str(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An array of `Value` elements. The backing vector is shared until the
    /// first indexed write, which copies it for the written binding only.
    Array(Rc<Vec<Self>>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(n) => (*n).into(),
            LiteralValue::Float(x) => (*x).into(),
            LiteralValue::Str(s) => s.clone().into(),
            LiteralValue::Bool(b) => (*b).into(),
        }
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Float` and `Value::Integer`. For integers, conversion
    /// fails if the value is too large to be represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a float or a safe integer.
    /// - `Err(RuntimeError::ExpectedNumber | LiteralTooLarge)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use foxl::interpreter::value::Value;
    ///
    /// let x = Value::Integer(10);
    /// assert_eq!(x.as_float(1).unwrap(), 10.0);
    /// ```
    pub fn as_float(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Float(x) => Ok(*x),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line }),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub const fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedInteger { line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for the strictly-boolean conditions of `if`, `while`, `for` and
    /// the ternary operator.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Borrows the element vector, or returns an error if not an array.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_slice(&self, line: usize) -> EvalResult<&[Self]> {
        match self {
            Self::Array(v) => Ok(v.as_slice()),
            _ => Err(RuntimeError::ExpectedArray { line }),
        }
    }

    /// Interprets the value as a logical-operator operand.
    ///
    /// Booleans count as themselves; integers and floats count as true when
    /// non-zero. Anything else is a type error, so `&&` and `||` refuse
    /// strings, arrays, and null.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use foxl::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(2).truthy(1).unwrap());
    /// assert!(!Value::Float(0.0).truthy(1).unwrap());
    /// assert!(Value::Str("x".into()).truthy(1).is_err());
    /// ```
    pub fn truthy(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Integer(n) => Ok(*n != 0),
            Self::Float(x) => Ok(*x != 0.0),
            _ => Err(RuntimeError::TypeError { details: format!("Cannot use {} as a condition",
                                                                self.type_name()),
                                               line }),
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is numeric ([`Integer`] or [`Float`]).
    ///
    /// [`Integer`]: Value::Integer
    /// [`Float`]: Value::Float
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`Str`].
    ///
    /// [`Str`]: Value::Str
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(..))
    }

    /// The name of the value's type, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Str(_) => "a string",
            Self::Bool(_) => "a boolean",
            Self::Array(_) => "an array",
        }
    }
}

/// Checks equality between two values, promoting mixed numeric operands.
///
/// Rules:
/// - `Integer` vs `Float` compares numerically, so `3 == 3.0` holds.
/// - Arrays compare element-wise with the same promotion, recursively.
/// - All other combinations compare by same-tag structural equality;
///   differently-tagged values are simply unequal.
///
/// # Example
/// ```
/// use foxl::interpreter::value::{Value, values_equal};
///
/// assert!(values_equal(&Value::Integer(3), &Value::Float(3.0)));
/// assert!(!values_equal(&Value::Integer(3), &Value::Str("3".into())));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
            *a as f64 == *b
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        _ => left == right,
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(elements) => {
                write!(f, "[")?;

                for (index, value) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    // Strings inside arrays print quoted but not re-escaped.
                    match value {
                        Self::Str(s) => write!(f, "\"{s}\"")?,
                        other => write!(f, "{other}")?,
                    }
                }

                write!(f, "]")
            },
        }
    }
}

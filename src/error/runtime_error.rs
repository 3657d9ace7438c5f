#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// Each variant renders as `Error on line {line}: {Kind}: ...` where the kind
/// is one of the language's diagnostic categories (`NameError`, `TypeError`,
/// `ArityError`, `ArithError`, `BoundsError`, `ConstError`,
/// `RedeclareError`, `IncludeError`, `NotImplemented`).
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer value was expected, but not found.
    ExpectedInteger {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array value was expected, but not found.
    ExpectedArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to take a root with exponent zero.
    ZeroRoot {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer was too large to be represented exactly as a float.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the array.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to assign to a `const` binding.
    AssignmentToConstant {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name that is already bound in the current environment.
    AlreadyDeclared {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The source loader could not produce the included file.
    IncludeFailed {
        /// The path handed to the loader.
        path: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An include re-entered a file that is still being loaded.
    IncludeCycle {
        /// The path that closed the cycle.
        path: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An error was raised while running an included file.
    IncludedFile {
        /// The rendered inner error.
        message: String,
        /// The line of the `include` statement.
        line:    usize,
    },
    /// A parsed construct that the evaluator does not execute yet.
    NotImplemented {
        /// The name of the construct.
        what: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => write!(f,
                                                           "Error on line {line}: NameError: Unknown variable '{name}'."),

            Self::UnknownFunction { name, line } => write!(f,
                                                           "Error on line {line}: NameError: Unknown function '{name}'."),

            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: TypeError: {details}.")
            },
            Self::ExpectedBoolean { line } => {
                write!(f, "Error on line {line}: TypeError: Expected a boolean.")
            },
            Self::ExpectedNumber { line } => {
                write!(f, "Error on line {line}: TypeError: Expected a number.")
            },
            Self::ExpectedInteger { line } => {
                write!(f, "Error on line {line}: TypeError: Expected an integer.")
            },
            Self::ExpectedArray { line } => {
                write!(f, "Error on line {line}: TypeError: Expected an array.")
            },

            Self::ArgumentCountMismatch { expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: ArityError: Expected {expected} arguments, but got {found}."),

            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}: ArithError: Division by zero.")
            },
            Self::ZeroRoot { line } => {
                write!(f, "Error on line {line}: ArithError: Root with exponent 0 is undefined.")
            },
            Self::Overflow { line } => {
                write!(f, "Error on line {line}: ArithError: Integer overflow.")
            },
            Self::LiteralTooLarge { line } => write!(f,
                                                     "Error on line {line}: ArithError: Integer is too large to convert exactly."),

            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: BoundsError: Index {found} is out of bounds for length {len}."),

            Self::AssignmentToConstant { name, line } => write!(f,
                                                                "Error on line {line}: ConstError: Cannot assign to constant '{name}'."),

            Self::AlreadyDeclared { name, line } => write!(f,
                                                           "Error on line {line}: RedeclareError: '{name}' is already declared."),

            Self::IncludeFailed { path, line } => write!(f,
                                                         "Error on line {line}: IncludeError: Could not load file '{path}'."),

            Self::IncludeCycle { path, line } => write!(f,
                                                        "Error on line {line}: IncludeError: Include cycle detected through '{path}'."),

            Self::IncludedFile { message, line } => write!(f,
                                                           "Error on line {line}: IncludeError: Error in included file: {message}"),

            Self::NotImplemented { what, line } => write!(f,
                                                          "Error on line {line}: NotImplemented: {what} cannot be executed yet."),
        }
    }
}

impl std::error::Error for RuntimeError {}

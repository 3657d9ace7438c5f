#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer met a byte that starts no token.
    UnknownCharacter {
        /// The offending text.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A string literal was opened but never closed on its line.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric literal could not be represented.
    InvalidNumber {
        /// The raw lexeme.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A specific token was required but not found.
    Expected {
        /// What was expected, e.g. `"';' after expression"`.
        what: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The two-token `?:` shorthand was used instead of `cond ? a : b`.
    TernaryShorthand {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCharacter { found, line } => {
                write!(f, "Error on line {line}: LexError: Unknown character '{found}'.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: LexError: Unterminated string literal.")
            },

            Self::InvalidNumber { literal, line } => write!(f,
                                                            "Error on line {line}: LexError: Numeric literal '{literal}' is out of range."),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: ParseError: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: ParseError: Unexpected end of input.")
            },

            Self::Expected { what, line } => {
                write!(f, "Error on line {line}: ParseError: Expected {what}.")
            },

            Self::TernaryShorthand { line } => write!(f,
                                                      "Error on line {line}: ParseError: The '?:' shorthand is not supported; write 'cond ? a : b'."),
        }
    }
}

impl std::error::Error for ParseError {}

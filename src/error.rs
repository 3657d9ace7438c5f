/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include unknown characters, unterminated strings,
/// unexpected tokens, and missing delimiters, and are always fatal to the
/// whole run.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: unknown
/// names, type mismatches, arity mismatches, arithmetic failures, bounds
/// violations, const and redeclaration violations, and include failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

//! # foxl
//!
//! foxl is a tree-walking interpreter for the FoxL scripting language,
//! a small dynamically-typed language with variables, constants, arrays,
//! user-defined functions, console I/O, and file inclusion. Source text is
//! lexed into tokens, parsed into an AST, and walked directly; there is no
//! bytecode stage.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{evaluator::core::Interpreter, parser::core::parse_source};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Keeps function bodies behind shared references so repeated calls never
///   clone subtrees.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. It standardizes error reporting and carries
/// detailed information about failures, including error kinds, messages,
/// and source lines.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, the environment, and the include loader to provide a
/// complete runtime for FoxL programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, and `f64` without silent data
///   loss.
pub mod util;

/// Parses and executes a whole source string against an interpreter.
///
/// The statements run in order against the interpreter's environment, so
/// successive calls with the same interpreter accumulate state. Execution
/// stops at the first failing statement.
///
/// # Errors
/// Returns the first lexing, parsing, or runtime error.
///
/// # Examples
/// ```
/// use foxl::{interpreter::evaluator::core::Interpreter, run_source};
///
/// let mut interpreter = Interpreter::new();
///
/// // Declarations persist across calls on the same interpreter.
/// run_source("let doubled = 2 * 21;", &mut interpreter).unwrap();
/// assert_eq!(interpreter.get("doubled").unwrap().to_string(), "42");
///
/// // Using an undefined variable is an error.
/// let result = run_source("let y = x + 1;", &mut interpreter);
/// assert!(result.is_err());
/// ```
pub fn run_source(source: &str,
                  interpreter: &mut Interpreter)
                  -> Result<(), Box<dyn std::error::Error>> {
    let statements = parse_source(source)?;

    for statement in &statements {
        interpreter.exec_toplevel(statement)?;
    }

    Ok(())
}

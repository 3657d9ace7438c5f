/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` struct, the `Flow` control signal, and the
/// expression dispatcher.
pub mod core;

/// Statement execution.
///
/// Implements declarations, reassignment in all its forms, control flow,
/// blocks, and the statement-level I/O forms.
pub mod statement;

/// Binary operator evaluation.
///
/// Arithmetic, bitwise, shift, comparison, and membership operations on
/// runtime values.
pub mod binary;

/// Unary operator evaluation.
///
/// Negation, logical not, bitwise complement, and the four
/// increment/decrement forms.
pub mod unary;

/// Function call mechanics.
///
/// Environment snapshots, parameter binding, and return unwinding.
pub mod function;

/// Console input and output.
///
/// The canonical printer behind `write` and the line reader behind `read`.
pub mod io;

/// Include execution.
///
/// Re-enters the lex-parse-evaluate pipeline on a loaded file, with cycle
/// detection.
pub mod include;

/// Binary operator dispatch.
///
/// Routes each operator to its arithmetic, bitwise, or comparison handler.
pub mod core;

/// Arithmetic evaluation.
///
/// Addition (including string concatenation), subtraction, multiplication,
/// division, modulo, powers, and roots, with integer preservation and
/// promotion rules.
pub mod arithmetic;

/// Bitwise and shift evaluation.
///
/// Exclusive or, and, or, and the four shift operators, all on integers.
pub mod bitwise;

/// Comparison and membership evaluation.
///
/// Ordering, equality across the value union, and `in` / `not in`.
pub mod comparison;

/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// Use these helpers whenever the interpreter needs to promote an `i64` to
/// `f64` or narrow a shift count or exponent to `u32`.
///
/// All functions return a `Result`, which is `Ok` if the conversion is
/// lossless and valid, or an error if the value is out of range.
pub mod num;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_INT`] in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use foxl::util::num::{MAX_SAFE_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside the safe range
/// let big = MAX_SAFE_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `i64` to `u32`.
///
/// Used for shift counts and integer exponents, which must be small and
/// non-negative.
///
/// ## Errors
/// Returns an error for negative or out-of-range values.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use foxl::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(3, 1).unwrap(), 3);
/// assert!(i64_to_u32_checked(-1, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn i64_to_u32_checked(value: i64, line: usize) -> EvalResult<u32> {
    if value < 0 || value > u32::MAX as i64 {
        return Err(RuntimeError::ExpectedInteger { line });
    }
    Ok(value as u32)
}

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Bit width of the integers used by the integer and bitwise modes.
pub const INTEGER_BITS: u32 = i64::BITS;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `RuntimeError::LiteralTooLarge` if the value exceeds
/// `MAX_SAFE_U64_INT` in absolute value.
///
/// ## Example
/// ```
/// use notation::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42).unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked(value: i64) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(RuntimeError::LiteralTooLarge { value: value.to_string() });
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// Returns `LiteralTooLarge` for non-finite or out-of-range values and
/// `RealIsFractional` when the value has a fractional part.
///
/// ## Example
/// ```
/// use notation::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { .. }));
///
/// let err = f64_to_i64_checked(1e20).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> EvalResult<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(RuntimeError::LiteralTooLarge { value: value.to_string() });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { value: value.to_string() });
    }
    Ok(value as i64)
}

/// Reduces a shift operand to a shift count.
///
/// The count is taken modulo the integer width using the two's-complement
/// mask, so `1 << 64 == 1` and `1 << -1 == 1 << 63` on every platform.
///
/// ## Example
/// ```
/// use notation::util::num::shift_count;
///
/// assert_eq!(shift_count(3), 3);
/// assert_eq!(shift_count(64), 0);
/// assert_eq!(shift_count(-1), 63);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn shift_count(value: i64) -> u32 {
    (value & (INTEGER_BITS as i64 - 1)) as u32
}

/// Converts a non-negative exponent to the `u32` taken by `i64::checked_pow`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` when the exponent does not fit, since any
/// base other than `-1`, `0` and `1` would overflow long before that.
pub fn exponent_to_u32(base: i64, exponent: u64) -> EvalResult<u32> {
    u32::try_from(exponent).map_err(|_| RuntimeError::Overflow { details: format!("{base} ^ {exponent}") })
}

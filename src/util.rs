/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the fixed
/// rules used to turn operands into shift counts and exponents.
///
/// Conversions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or an error if the value is out of range or not an integer.
pub mod num;

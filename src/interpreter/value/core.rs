use std::{fmt, str::FromStr};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{EvalMode, EvalResult},
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

/// Represents the result of an evaluation or the value of a binding.
///
/// Reals are wrapped in [`OrderedFloat`] so numbers can be compared, hashed
/// and stored in trace snapshots like any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Number {
    /// A 64-bit two's-complement integer.
    Integer(i64),
    /// A double precision floating-point value.
    Real(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(OrderedFloat(v))
    }
}

impl Number {
    /// Returns the value as an `f64`.
    ///
    /// # Errors
    /// Fails with `LiteralTooLarge` for integers that `f64` cannot hold
    /// exactly.
    ///
    /// # Example
    /// ```
    /// use notation::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::Integer(10).as_real().unwrap(), 10.0);
    /// ```
    pub fn as_real(self) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(r.into_inner()),
            Self::Integer(n) => i64_to_f64_checked(n),
        }
    }

    /// Returns the value as an `i64`.
    ///
    /// # Errors
    /// Fails with `RealIsFractional` or `LiteralTooLarge` for reals that are
    /// not whole numbers in the `i64` range.
    pub fn as_integer(self) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(n),
            Self::Real(r) => f64_to_i64_checked(r.into_inner()),
        }
    }

    /// Converts the number to the representation used by `mode`.
    ///
    /// Integer and bitwise modes work on `Integer`, the real mode on `Real`.
    ///
    /// # Example
    /// ```
    /// use notation::interpreter::{evaluator::core::EvalMode, value::core::Number};
    ///
    /// let n = Number::from(4.0).for_mode(EvalMode::Integer).unwrap();
    /// assert_eq!(n, Number::Integer(4));
    ///
    /// assert!(Number::from(4.5).for_mode(EvalMode::Bitwise).is_err());
    /// ```
    pub fn for_mode(self, mode: EvalMode) -> EvalResult<Self> {
        match mode {
            EvalMode::Integer | EvalMode::Bitwise => self.as_integer().map(Self::Integer),
            EvalMode::Real => self.as_real().map(Self::from),
        }
    }

    /// Parses a numeric literal as written in an expression.
    ///
    /// # Errors
    /// - `RealIsFractional` if the literal has a fractional part and the mode
    ///   works on integers.
    /// - `LiteralTooLarge` if the literal does not fit the mode's type.
    pub fn parse_literal(text: &str, mode: EvalMode) -> EvalResult<Self> {
        let too_large = || RuntimeError::LiteralTooLarge { value: text.to_string() };

        match mode {
            EvalMode::Real => match text.parse::<f64>() {
                Ok(r) if r.is_finite() => Ok(Self::from(r)),
                _ => Err(too_large()),
            },
            EvalMode::Integer | EvalMode::Bitwise => {
                if let Some((_, fraction)) = text.split_once('.') {
                    if fraction.bytes().any(|b| b != b'0') {
                        return Err(RuntimeError::RealIsFractional { value: text.to_string() });
                    }
                    let whole = &text[..text.len() - fraction.len() - 1];
                    return whole.parse::<i64>().map(Self::Integer).map_err(|_| too_large());
                }
                text.parse::<i64>().map(Self::Integer).map_err(|_| too_large())
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", r.into_inner()),
        }
    }
}

impl FromStr for Number {
    type Err = String;

    /// Reads an integer such as `-12`, or a finite real such as `2.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Integer(n));
        }
        match s.parse::<f64>() {
            Ok(r) if r.is_finite() => Ok(Self::from(r)),
            _ => Err(format!("'{s}' is not a number")),
        }
    }
}

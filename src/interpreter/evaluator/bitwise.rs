use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::OperatorSet, value::core::Number},
    util::num::shift_count,
};

/// Evaluates a binary bitwise operation on two's-complement integers.
///
/// The shift count of `<<` and `>>` is the right operand reduced modulo 64.
/// `<<` discards bits shifted past the top and `>>` copies the sign bit.
///
/// # Errors
/// - `RealIsFractional` or `LiteralTooLarge` if an operand is a real that is
///   not a whole number in the `i64` range.
/// - `UnsupportedOperator` for an operator other than `& | ^ << >>`.
///
/// # Example
/// ```
/// use notation::{
///     ast::Operator,
///     interpreter::{evaluator::bitwise::apply, value::core::Number},
/// };
///
/// let v = apply(Operator::Shl, Number::Integer(1), Number::Integer(2)).unwrap();
/// assert_eq!(v, Number::Integer(4));
///
/// let v = apply(Operator::Shr, Number::Integer(-8), Number::Integer(1)).unwrap();
/// assert_eq!(v, Number::Integer(-4));
/// ```
pub fn apply(operator: Operator, left: Number, right: Number) -> EvalResult<Number> {
    let unsupported = || RuntimeError::UnsupportedOperator { operator,
                                                             operators: OperatorSet::Bitwise };
    let a = left.as_integer()?;
    let b = right.as_integer()?;

    Ok(Number::Integer(match operator {
                           Operator::And => a & b,
                           Operator::Or => a | b,
                           Operator::Xor => a ^ b,
                           Operator::Shl => a << shift_count(b),
                           Operator::Shr => a >> shift_count(b),
                           _ => return Err(unsupported()),
                       }))
}

/// Flips every bit of an integer.
///
/// # Errors
/// Same conversions as [`apply`].
///
/// # Example
/// ```
/// use notation::interpreter::{evaluator::bitwise::complement, value::core::Number};
///
/// assert_eq!(complement(Number::Integer(6)).unwrap(), Number::Integer(-7));
/// ```
pub fn complement(value: Number) -> EvalResult<Number> {
    value.as_integer().map(|n| Number::Integer(!n))
}

use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::OperatorSet, value::core::Number},
    util::num::exponent_to_u32,
};

/// Evaluates a binary arithmetic operation.
///
/// Two integers are combined with checked 64-bit arithmetic; division
/// truncates toward zero. As soon as one operand is real both are treated as
/// reals.
///
/// # Parameters
/// - `operator`: The arithmetic operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// An `EvalResult<Number>` containing the computed value.
///
/// # Errors
/// - `DivisionByZero` for a zero divisor, integer or real.
/// - `Overflow` when an integer result leaves the 64-bit range.
/// - `UnsupportedOperator` for an operator other than `+ - * / ^`.
///
/// # Example
/// ```
/// use notation::{
///     ast::Operator,
///     interpreter::{evaluator::arithmetic::apply, value::core::Number},
/// };
///
/// let q = apply(Operator::Div, Number::Integer(-7), Number::Integer(2)).unwrap();
/// assert_eq!(q, Number::Integer(-3));
///
/// let q = apply(Operator::Div, Number::from(7.0), Number::from(2.0)).unwrap();
/// assert_eq!(q, Number::from(3.5));
/// ```
pub fn apply(operator: Operator, left: Number, right: Number) -> EvalResult<Number> {
    use Operator::{Add, Div, Mul, Pow, Sub};

    let unsupported = || RuntimeError::UnsupportedOperator { operator,
                                                             operators: OperatorSet::Arithmetic };

    match (left, right) {
        (Number::Integer(a), Number::Integer(b)) => {
            let overflow = || RuntimeError::Overflow { details: format!("{a} {operator} {b}") };
            match operator {
                Add => a.checked_add(b).map(Number::Integer).ok_or_else(overflow),
                Sub => a.checked_sub(b).map(Number::Integer).ok_or_else(overflow),
                Mul => a.checked_mul(b).map(Number::Integer).ok_or_else(overflow),
                Div => {
                    if b == 0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    a.checked_div(b).map(Number::Integer).ok_or_else(overflow)
                },
                Pow => integer_pow(a, b).map(Number::Integer),
                _ => Err(unsupported()),
            }
        },
        _ => {
            let a = left.as_real()?;
            let b = right.as_real()?;
            Ok(Number::from(match operator {
                                Add => a + b,
                                Sub => a - b,
                                Mul => a * b,
                                Div => {
                                    if b == 0.0 {
                                        return Err(RuntimeError::DivisionByZero);
                                    }
                                    a / b
                                },
                                Pow => a.powf(b),
                                _ => return Err(unsupported()),
                            }))
        },
    }
}

/// Raises an integer to an integer power.
///
/// A negative exponent yields `1 / base^|exponent|` truncated toward zero,
/// which is `0` for every base other than `-1` and `1`.
///
/// # Errors
/// - `DivisionByZero` for `0` raised to a negative exponent.
/// - `Overflow` when the result does not fit an `i64`.
///
/// # Example
/// ```
/// use notation::interpreter::evaluator::arithmetic::integer_pow;
///
/// assert_eq!(integer_pow(2, 10).unwrap(), 1024);
/// assert_eq!(integer_pow(-1, -3).unwrap(), -1);
/// assert_eq!(integer_pow(2, -1).unwrap(), 0);
/// assert!(integer_pow(2, 64).is_err());
/// ```
pub fn integer_pow(base: i64, exponent: i64) -> EvalResult<i64> {
    let odd = exponent % 2 != 0;

    match base {
        0 if exponent < 0 => Err(RuntimeError::DivisionByZero),
        0 => Ok(i64::from(exponent == 0)),
        1 => Ok(1),
        -1 => Ok(if odd { -1 } else { 1 }),
        _ if exponent < 0 => Ok(0),
        _ => base.checked_pow(exponent_to_u32(base, exponent.unsigned_abs())?)
                 .ok_or_else(|| RuntimeError::Overflow { details: format!("{base} ^ {exponent}") }),
    }
}

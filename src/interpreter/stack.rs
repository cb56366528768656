use std::fmt;

use crate::{
    ast::{Operand, Operator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        trace::{TraceEvent, Tracer, snapshot},
    },
};

/// Direction in which a linear notation is consumed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Scan {
    /// Postfix input, read left to right.
    Postfix,
    /// Prefix input, read right to left.
    Prefix,
}

/// The operands handed to an operator, already in left to right order.
pub(crate) enum Operands<T> {
    /// Operand of the unary complement.
    One(T),
    /// Left and right operand of a binary operator.
    Two(T, T),
}

impl<T: fmt::Display> Operands<T> {
    /// The operands as text, leftmost first.
    pub(crate) fn describe(&self) -> Vec<String> {
        match self {
            Self::One(only) => vec![only.to_string()],
            Self::Two(left, right) => vec![left.to_string(), right.to_string()],
        }
    }
}

/// Yields `tokens` in the order `scan` consumes them.
fn in_scan_order(tokens: &[Token], scan: Scan) -> impl Iterator<Item = &Token> {
    (0..tokens.len()).map(move |index| match scan {
                         Scan::Postfix => &tokens[index],
                         Scan::Prefix => &tokens[tokens.len() - 1 - index],
                     })
}

/// Pops the operands of `operator` from `stack`.
///
/// In a postfix scan the left operand was pushed first. In a prefix scan the
/// input is read backwards, so the left operand was pushed last and is the
/// first one popped.
pub(crate) fn pop_operands<T>(stack: &mut Vec<T>, operator: Operator, scan: Scan) -> Result<Operands<T>, ParseError> {
    let required = operator.arity();
    if stack.len() < required {
        return Err(ParseError::InsufficientOperands { operator,
                                                      required,
                                                      available: stack.len() });
    }

    let popped = stack.split_off(stack.len() - required);
    let insufficient = |available| ParseError::InsufficientOperands { operator,
                                                                      required,
                                                                      available };
    if operator.is_unary() {
        let [only]: [T; 1] = popped.try_into().map_err(|rest: Vec<T>| insufficient(rest.len()))?;
        return Ok(Operands::One(only));
    }

    let [below, top]: [T; 2] = popped.try_into().map_err(|rest: Vec<T>| insufficient(rest.len()))?;
    Ok(match scan {
           Scan::Postfix => Operands::Two(below, top),
           Scan::Prefix => Operands::Two(top, below),
       })
}

/// Reduces a prefix or postfix token sequence with an operand stack.
///
/// `operand` turns each operand into a stack value and `apply` combines the
/// operands of each operator. Every push and every application is reported to
/// `tracer`.
///
/// # Errors
/// - `InsufficientOperands` when an operator finds too few values.
/// - `MismatchedParentheses` for any parenthesis, which has no meaning
///   outside infix.
/// - `InvalidExpression` unless exactly one value remains.
/// - Anything `operand` or `apply` return.
pub(crate) fn reduce<T, E>(tokens: &[Token],
                           scan: Scan,
                           tracer: &mut Tracer<'_>,
                           mut operand: impl FnMut(&Operand) -> Result<T, E>,
                           mut apply: impl FnMut(Operator, Operands<T>) -> Result<T, E>)
                           -> Result<T, E>
    where T: fmt::Display,
          E: From<ParseError>
{
    let mut stack: Vec<T> = Vec::new();

    for token in in_scan_order(tokens, scan) {
        match token {
            Token::Operand(value) => {
                stack.push(operand(value)?);
                tracer.emit(|| {
                          let top = stack.last().map(ToString::to_string).unwrap_or_default();
                          TraceEvent::push(top, snapshot(&stack))
                      });
            },
            Token::Operator(operator) => {
                let operands = pop_operands(&mut stack, *operator, scan)?;
                let consumed = if tracer.enabled() {
                    operands.describe()
                } else {
                    Vec::new()
                };
                let result = apply(*operator, operands)?;
                stack.push(result);
                tracer.emit(|| {
                          let top = stack.last().map(ToString::to_string).unwrap_or_default();
                          TraceEvent::apply(*operator, consumed, top, snapshot(&stack))
                      });
            },
            Token::LeftParen => return Err(ParseError::MismatchedParentheses { found: '(' }.into()),
            Token::RightParen => return Err(ParseError::MismatchedParentheses { found: ')' }.into()),
        }
    }

    if stack.len() != 1 {
        return Err(ParseError::InvalidExpression { depth: stack.len() }.into());
    }
    stack.pop().ok_or_else(|| ParseError::InvalidExpression { depth: 0 }.into())
}

/// Checks that a prefix or postfix sequence reduces to exactly one value
/// without building anything.
///
/// Reports the same errors, in the same order, as [`reduce`].
pub(crate) fn measure(tokens: &[Token], scan: Scan) -> Result<(), ParseError> {
    let mut depth = 0usize;

    for token in in_scan_order(tokens, scan) {
        match token {
            Token::Operand(_) => depth += 1,
            Token::Operator(operator) => {
                let required = operator.arity();
                if depth < required {
                    return Err(ParseError::InsufficientOperands { operator: *operator,
                                                                  required,
                                                                  available: depth });
                }
                depth = depth - required + 1;
            },
            Token::LeftParen => return Err(ParseError::MismatchedParentheses { found: '(' }),
            Token::RightParen => return Err(ParseError::MismatchedParentheses { found: ')' }),
        }
    }

    if depth == 1 { Ok(()) } else { Err(ParseError::InvalidExpression { depth }) }
}

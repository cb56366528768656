use std::fmt;

use crate::{
    ast::{Notation, Operator},
    error::ParseError,
    interpreter::{
        lexer::{Token, to_text},
        parser::core::ParseResult,
        stack::{Operands, Scan, reduce},
        trace::Tracer,
    },
};

/// A partially rebuilt infix expression.
struct Fragment(Vec<Token>);

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_text(&self.0, Notation::Infix))
    }
}

/// Writes one operator application in infix.
fn wrap(operator: Operator, operands: Operands<Fragment>) -> Fragment {
    match operands {
        Operands::One(Fragment(only)) => {
            let mut out = Vec::with_capacity(only.len() + 1);
            out.push(Token::Operator(operator));
            out.extend(only);
            Fragment(out)
        },
        Operands::Two(Fragment(left), Fragment(right)) => {
            let mut out = Vec::with_capacity(left.len() + right.len() + 3);
            out.push(Token::LeftParen);
            out.extend(left);
            out.push(Token::Operator(operator));
            out.extend(right);
            out.push(Token::RightParen);
            Fragment(out)
        },
    }
}

/// Rebuilds the infix form of a prefix or postfix sequence.
///
/// Each binary application is wrapped in parentheses, `(a+b)`, and the unary
/// complement is written in front of its operand, `~a`. The pair around the
/// whole result is removed at the end.
///
/// # Errors
/// - `InsufficientOperands` when an operator finds too few operands.
/// - `InvalidExpression` unless the sequence reduces to one expression.
/// - `MismatchedParentheses` if the input contains any parenthesis.
pub(crate) fn to_infix(tokens: &[Token], scan: Scan, tracer: &mut Tracer<'_>) -> ParseResult<Vec<Token>> {
    let Fragment(tokens) = reduce::<_, ParseError>(tokens,
                                                   scan,
                                                   tracer,
                                                   |operand| Ok(Fragment(vec![operand.clone().into()])),
                                                   |operator, operands| Ok(wrap(operator, operands)))?;

    Ok(strip_outer_parens(tokens))
}

/// Removes one pair of parentheses around the whole sequence.
///
/// The pair is only removed when the opening parenthesis is closed by the very
/// last token, so `(a+b)*(c+d)` is left alone.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::{
///         converter::infix::strip_outer_parens,
///         lexer::{OperatorSet, to_text, tokenize},
///     },
/// };
///
/// let strip = |text: &str| {
///     let tokens = tokenize(text, OperatorSet::Arithmetic).unwrap();
///     to_text(&strip_outer_parens(tokens), Notation::Infix)
/// };
///
/// assert_eq!(strip("((a+b)*c)"), "(a+b)*c");
/// assert_eq!(strip("(a+b)*(c+d)"), "(a+b)*(c+d)");
/// ```
#[must_use]
pub fn strip_outer_parens(mut tokens: Vec<Token>) -> Vec<Token> {
    if tokens.first() != Some(&Token::LeftParen) || closing_paren(&tokens) != Some(tokens.len() - 1) {
        return tokens;
    }

    tokens.pop();
    tokens.remove(0);
    tokens
}

/// Index of the parenthesis closing the one at the start of `tokens`.
fn closing_paren(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            },
            _ => {},
        }
    }
    None
}

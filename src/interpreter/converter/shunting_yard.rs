use crate::{
    ast::Operator,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::ParseResult,
        trace::{TraceEvent, Tracer, snapshot},
    },
};

/// Returns `true` if `token` can start an operand: a value, a group or the
/// unary complement.
fn starts_operand(token: Option<&Token>) -> bool {
    matches!(token,
             Some(Token::Operand(_) | Token::LeftParen | Token::Operator(Operator::Not)))
}

/// Checks that an infix sequence alternates operands and operators and that
/// its parentheses balance.
///
/// The shunting-yard on its own accepts inputs such as `a b +` and silently
/// produces nonsense, so every infix sequence goes through this check before
/// it is converted or evaluated.
///
/// # Errors
/// - `MismatchedParentheses` for a `)` without an open group or a `(` that is
///   never closed.
/// - `InsufficientOperands` for an operator missing an operand on either
///   side.
/// - `InvalidExpression` for empty input or an empty group `()`.
/// - `MissingOperator` for an operand, group or `~` right after a complete
///   operand.
///
/// # Example
/// ```
/// use notation::{
///     error::ErrorKind,
///     interpreter::{
///         converter::shunting_yard::check_infix,
///         lexer::{OperatorSet, tokenize},
///     },
/// };
///
/// let tokens = tokenize("(a+b", OperatorSet::Arithmetic).unwrap();
/// assert_eq!(check_infix(&tokens).unwrap_err().kind(), ErrorKind::MismatchedParentheses);
///
/// let tokens = tokenize("a+", OperatorSet::Arithmetic).unwrap();
/// assert_eq!(check_infix(&tokens).unwrap_err().kind(), ErrorKind::InsufficientOperands);
/// ```
pub fn check_infix(tokens: &[Token]) -> ParseResult<()> {
    if tokens.is_empty() {
        return Err(ParseError::InvalidExpression { depth: 0 });
    }

    let mut expect_operand = true;
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate() {
        let next = tokens.get(index + 1);

        match token {
            Token::Operand(_) | Token::LeftParen if !expect_operand => {
                return Err(ParseError::MissingOperator { token: token.to_string() });
            },
            Token::Operand(_) => expect_operand = false,
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                if depth == 0 {
                    return Err(ParseError::MismatchedParentheses { found: ')' });
                }
                if expect_operand {
                    return Err(ParseError::InvalidExpression { depth: 0 });
                }
                depth -= 1;
            },
            Token::Operator(operator) if operator.is_unary() => {
                if !expect_operand {
                    return Err(ParseError::MissingOperator { token: token.to_string() });
                }
                if !starts_operand(next) {
                    return Err(ParseError::InsufficientOperands { operator:  *operator,
                                                                  required:  1,
                                                                  available: 0, });
                }
            },
            Token::Operator(operator) => {
                let left = !expect_operand;
                let right = starts_operand(next);
                if !(left && right) {
                    return Err(ParseError::InsufficientOperands { operator:  *operator,
                                                                  required:  2,
                                                                  available: usize::from(left)
                                                                             + usize::from(right), });
                }
                expect_operand = true;
            },
        }
    }

    if depth > 0 {
        return Err(ParseError::MismatchedParentheses { found: '(' });
    }
    Ok(())
}

/// Appends `token` to the output.
fn emit(output: &mut Vec<Token>, token: Token, tracer: &mut Tracer<'_>) {
    output.push(token);
    tracer.emit(|| {
              let last = output.last().map(ToString::to_string).unwrap_or_default();
              TraceEvent::output(last, snapshot(output))
          });
}

/// Pushes `token` onto the operator stack.
fn push(operators: &mut Vec<Token>, token: Token, tracer: &mut Tracer<'_>) {
    operators.push(token);
    tracer.emit(|| {
              let top = operators.last().map(ToString::to_string).unwrap_or_default();
              TraceEvent::push(top, snapshot(operators))
          });
}

/// Converts an infix sequence to postfix with Dijkstra's shunting-yard.
///
/// Operands go straight to the output. An incoming operator first moves every
/// operator to the output that [yields to it](crate::ast::Operator::yields_to),
/// stopping at an open parenthesis. A closing parenthesis flushes its group.
///
/// The input is expected to have passed [`check_infix`]. With `pop_on_equal`
/// cleared, operators of equal precedence are left on the stack, which is what
/// the reversed pass of the infix to prefix conversion needs.
///
/// Every operator push and every output append is reported to `tracer`.
///
/// # Errors
/// `MismatchedParentheses` if a group is never opened or never closed.
pub(crate) fn shunting_yard(tokens: &[Token],
                            pop_on_equal: bool,
                            tracer: &mut Tracer<'_>)
                            -> ParseResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Operand(_) => emit(&mut output, token.clone(), tracer),
            Token::LeftParen => push(&mut operators, Token::LeftParen, tracer),
            Token::RightParen => loop {
                match operators.pop() {
                    Some(Token::LeftParen) => break,
                    Some(top) => emit(&mut output, top, tracer),
                    None => return Err(ParseError::MismatchedParentheses { found: ')' }),
                }
            },
            Token::Operator(incoming) => {
                while let Some(Token::Operator(top)) = operators.last()
                      && top.yields_to(*incoming, pop_on_equal)
                {
                    let top = *top;
                    operators.pop();
                    emit(&mut output, Token::Operator(top), tracer);
                }
                push(&mut operators, token.clone(), tracer);
            },
        }
    }

    while let Some(top) = operators.pop() {
        if top == Token::LeftParen {
            return Err(ParseError::MismatchedParentheses { found: '(' });
        }
        emit(&mut output, top, tracer);
    }

    Ok(output)
}

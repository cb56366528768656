use log::debug;

use crate::{
    ast::Notation,
    error::ParseError,
    interpreter::{
        converter::{
            infix::to_infix,
            shunting_yard::{check_infix, shunting_yard},
        },
        lexer::Token,
        parser::core::ParseResult,
        stack::{Scan, measure},
        trace::{TraceSink, Tracer},
    },
};

/// Converts a token sequence from one notation to another.
///
/// Infix to postfix runs the shunting-yard. Prefix and postfix are turned into
/// infix with an operand stack. Infix to prefix reverses the sequence, runs the
/// shunting-yard and reverses the result. Prefix and postfix are converted into
/// each other by going through infix.
///
/// Converting a notation to itself validates the sequence. Infix input comes
/// back fully parenthesised, prefix and postfix input comes back unchanged.
///
/// # Parameters
/// - `tokens`: The expression in the `from` notation.
/// - `from`: Notation of `tokens`.
/// - `to`: Requested notation.
///
/// # Returns
/// The same expression as a token sequence in the `to` notation.
///
/// # Errors
/// - `MismatchedParentheses` for unbalanced infix groups, or for any
///   parenthesis in prefix or postfix input.
/// - `InsufficientOperands` when an operator lacks operands.
/// - `InvalidExpression` when the input is not exactly one expression.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::{
///         converter::core::convert,
///         lexer::{OperatorSet, to_text, tokenize},
///     },
/// };
///
/// let tokens = tokenize("a+b*c", OperatorSet::Arithmetic).unwrap();
/// let postfix = convert(&tokens, Notation::Infix, Notation::Postfix).unwrap();
/// assert_eq!(to_text(&postfix, Notation::Postfix), "abc*+");
///
/// let prefix = convert(&postfix, Notation::Postfix, Notation::Prefix).unwrap();
/// assert_eq!(to_text(&prefix, Notation::Prefix), "+a*bc");
/// ```
pub fn convert(tokens: &[Token], from: Notation, to: Notation) -> ParseResult<Vec<Token>> {
    convert_with(tokens, from, to, &mut Tracer::disabled())
}

/// Converts like [`convert`] and reports every stack operation to `sink`.
///
/// The shunting-yard reports operator pushes and output appends, the operand
/// stack reports pushes and applications. When the conversion fails `sink`
/// receives nothing.
///
/// # Errors
/// Same as [`convert`].
pub fn convert_traced(tokens: &[Token],
                      from: Notation,
                      to: Notation,
                      sink: &mut dyn TraceSink)
                      -> ParseResult<Vec<Token>> {
    let mut tracer = Tracer::new(sink);
    let converted = convert_with(tokens, from, to, &mut tracer)?;
    tracer.commit();
    Ok(converted)
}

/// Checks that `tokens` form exactly one well-formed expression in
/// `notation`.
///
/// # Errors
/// The errors [`convert`] would report for the same input.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     error::ErrorKind,
///     interpreter::{
///         converter::core::validate,
///         lexer::{OperatorSet, tokenize},
///     },
/// };
///
/// let tokens = tokenize("ab", OperatorSet::Arithmetic).unwrap();
/// let err = validate(&tokens, Notation::Postfix).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidExpression);
/// ```
pub fn validate(tokens: &[Token], notation: Notation) -> ParseResult<()> {
    match notation {
        Notation::Infix => check_infix(tokens),
        Notation::Postfix => measure(tokens, Scan::Postfix),
        Notation::Prefix => measure(tokens, Scan::Prefix),
    }
}

fn convert_with(tokens: &[Token],
                from: Notation,
                to: Notation,
                tracer: &mut Tracer<'_>)
                -> ParseResult<Vec<Token>> {
    debug!("converting {} tokens from {from} to {to}", tokens.len());

    match (from, to) {
        (Notation::Infix, Notation::Postfix) => infix_to_postfix(tokens, tracer),
        (Notation::Infix, Notation::Prefix) => infix_to_prefix(tokens, tracer),
        (Notation::Infix, Notation::Infix) => {
            let postfix = infix_to_postfix(tokens, tracer)?;
            to_infix(&postfix, Scan::Postfix, tracer)
        },
        (Notation::Postfix, Notation::Infix) => to_infix(tokens, Scan::Postfix, tracer),
        (Notation::Prefix, Notation::Infix) => to_infix(tokens, Scan::Prefix, tracer),
        (Notation::Postfix, Notation::Prefix) => {
            let infix = to_infix(tokens, Scan::Postfix, tracer)?;
            infix_to_prefix(&infix, tracer)
        },
        (Notation::Prefix, Notation::Postfix) => {
            let infix = to_infix(tokens, Scan::Prefix, tracer)?;
            infix_to_postfix(&infix, tracer)
        },
        (Notation::Postfix, Notation::Postfix) => {
            measure(tokens, Scan::Postfix)?;
            Ok(tokens.to_vec())
        },
        (Notation::Prefix, Notation::Prefix) => {
            measure(tokens, Scan::Prefix)?;
            Ok(tokens.to_vec())
        },
    }
}

/// Runs the shunting-yard over a checked infix sequence and verifies that the
/// result is a single postfix expression.
fn infix_to_postfix(tokens: &[Token], tracer: &mut Tracer<'_>) -> ParseResult<Vec<Token>> {
    check_infix(tokens)?;
    let postfix = shunting_yard(tokens, true, tracer)?;
    measure(&postfix, Scan::Postfix)?;
    Ok(postfix)
}

/// Converts infix to prefix by reversal.
///
/// The sequence is reversed with every parenthesis mirrored, converted to
/// postfix and reversed again. Equal precedence does not pop in the reversed
/// pass, so `a-b-c` becomes `--abc` and not `-a-bc`.
fn infix_to_prefix(tokens: &[Token], tracer: &mut Tracer<'_>) -> ParseResult<Vec<Token>> {
    check_infix(tokens)?;

    let reversed: Vec<Token> = tokens.iter().rev().map(Token::mirrored).collect();
    let mut prefix = shunting_yard(&reversed, false, tracer).map_err(ParseError::unreversed)?;
    prefix.reverse();

    measure(&prefix, Scan::Prefix)?;
    Ok(prefix)
}

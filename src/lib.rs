//! # notation
//!
//! notation is an expression engine for infix, prefix and postfix notation
//! written in Rust. It converts arithmetic and bitwise expressions between the
//! three notations, evaluates them against variable bindings, and builds and
//! draws their expression trees, optionally tracing every stack operation.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Notation,
    error::{ParseError, RuntimeError},
    interpreter::{
        converter::core::convert,
        evaluator::core::{Bindings, EvalMode, evaluate},
        lexer::{OperatorSet, to_text, tokenize},
        parser::core::build,
        render::render,
        value::core::Number,
    },
};

/// Defines the structure of expressions.
///
/// This module declares the notations, the operators of both operator
/// families, operands, and the `ExpressionTree` built from a token sequence.
///
/// # Responsibilities
/// - Defines precedence, arity and symbols of every operator.
/// - Defines the expression tree and its traversals.
pub mod ast;
/// Provides unified error types for tokenizing, restructuring and evaluating.
///
/// This module defines all errors that can be raised while working with an
/// expression. Every error maps to an `ErrorKind`, a machine-readable code
/// that stays stable while messages change.
///
/// # Responsibilities
/// - Defines error enums for structural and evaluation failures.
/// - Attaches the offending character, symbol or operator for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the processing of expressions.
///
/// This module ties together the tokenizer, the converter, the evaluator, the
/// tree builder and renderer and the step tracer.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for converting, evaluating and drawing token
///   sequences.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
/// - Define the shift count and exponent rules of the integer modes.
pub mod util;

/// Converts expression text from one notation to another.
///
/// The text is tokenized with `operators`, converted and written back.
///
/// # Errors
/// Any tokenizer or structural error, see
/// [`convert`](crate::interpreter::converter::core::convert).
///
/// # Examples
/// ```
/// use notation::{ast::Notation, convert_expression, interpreter::lexer::OperatorSet};
///
/// let postfix = convert_expression("a+b*c", Notation::Infix, Notation::Postfix, OperatorSet::Arithmetic);
/// assert_eq!(postfix.unwrap(), "abc*+");
///
/// let infix = convert_expression("3 4 + 5 *", Notation::Postfix, Notation::Infix, OperatorSet::Arithmetic);
/// assert_eq!(infix.unwrap(), "(3+4)*5");
///
/// // unbalanced input
/// let err = convert_expression("(a+b", Notation::Infix, Notation::Postfix, OperatorSet::Arithmetic);
/// assert!(err.is_err());
/// ```
pub fn convert_expression(source: &str,
                          from: Notation,
                          to: Notation,
                          operators: OperatorSet)
                          -> Result<String, ParseError> {
    let tokens = tokenize(source, operators)?;
    let converted = convert(&tokens, from, to)?;
    Ok(to_text(&converted, to))
}

/// Evaluates expression text.
///
/// The text is tokenized with the operator family of `mode`.
///
/// # Errors
/// Any tokenizer, structural or evaluation error, see
/// [`evaluate`](crate::interpreter::evaluator::core::evaluate).
///
/// # Examples
/// ```
/// use notation::{
///     ast::Notation,
///     error::ErrorKind,
///     evaluate_expression,
///     interpreter::{
///         evaluator::core::{Bindings, EvalMode},
///         value::core::Number,
///     },
/// };
///
/// let bindings = Bindings::from_pairs([('a', 3), ('b', 1), ('c', 2)]).unwrap();
/// let value = evaluate_expression("~a & (b << c)", Notation::Infix, &bindings, EvalMode::Bitwise);
/// assert_eq!(value.unwrap(), Number::Integer(4));
///
/// let bindings = Bindings::from_pairs([('a', 5), ('b', 0)]).unwrap();
/// let err = evaluate_expression("a/b", Notation::Infix, &bindings, EvalMode::Integer).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DivisionByZero);
/// ```
pub fn evaluate_expression(source: &str,
                           notation: Notation,
                           bindings: &Bindings,
                           mode: EvalMode)
                           -> Result<Number, RuntimeError> {
    let tokens = tokenize(source, mode.operators())?;
    evaluate(&tokens, notation, bindings, mode)
}

/// Builds the expression tree of `source` and draws it.
///
/// # Errors
/// Any tokenizer or structural error, and `TreeTooTall` for trees that
/// cannot be drawn.
///
/// # Examples
/// ```
/// use notation::{ast::Notation, draw_expression, interpreter::lexer::OperatorSet};
///
/// let lines = draw_expression("3 4 + 5 *", Notation::Postfix, OperatorSet::Arithmetic).unwrap();
/// assert_eq!(lines[0], "       *");
/// assert_eq!(lines[2], "   +       5");
/// ```
pub fn draw_expression(source: &str,
                       notation: Notation,
                       operators: OperatorSet)
                       -> Result<Vec<String>, ParseError> {
    let tokens = tokenize(source, operators)?;
    let tree = build(&tokens, notation)?;
    render(&tree)
}

/// The converter module rewrites expressions between notations.
///
/// The converter turns a token sequence in infix, prefix or postfix notation
/// into the same expression in any other notation. It is built from three
/// primitives: the shunting-yard for infix to postfix, an operand stack for
/// prefix and postfix to infix, and the reversal trick for infix to prefix.
///
/// # Responsibilities
/// - Checks the shape of infix sequences before they are restructured.
/// - Converts between every pair of notations, composing through infix where
///   no direct route exists.
/// - Reports every stack operation to an optional trace sink.
pub mod converter;
/// The evaluator module computes the value of an expression.
///
/// The evaluator reads a token sequence in any notation, looks up variables
/// in a binding table and applies the operators with the semantics of the
/// chosen mode: checked integer arithmetic, real arithmetic or bitwise
/// operations on two's-complement integers.
///
/// # Responsibilities
/// - Evaluates prefix and postfix with a value stack, infix with a value stack
///   and an operator stack.
/// - Reports runtime errors such as division by zero or undefined variables.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads the raw text and produces the operands, operators and
/// parentheses of an expression. Which operator symbols are accepted depends
/// on the active operator family.
///
/// # Responsibilities
/// - Converts the input characters into tokens.
/// - Reports stray characters and operators of the wrong family with their
///   position.
/// - Writes token sequences back as text.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// # Responsibilities
/// - Builds an `ExpressionTree` from any notation.
/// - Rejects trees nested too deeply to traverse safely.
pub mod parser;
/// Draws expression trees as text.
pub mod render;
/// Shared reduction over prefix and postfix sequences.
mod stack;
/// The trace module records the steps of conversions and evaluations.
///
/// Callers that want to show how a result came about pass a sink; every push,
/// output and operator application is delivered to it once the call has
/// succeeded.
pub mod trace;
/// The value module defines the numbers produced by evaluation.
pub mod value;

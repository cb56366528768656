/// Core evaluation logic.
///
/// Contains the evaluation entry points, the evaluation modes and the variable
/// bindings, and dispatches operator applications to the arithmetic and
/// bitwise routines.
pub mod core;

/// Arithmetic operator evaluation.
///
/// Implements `+ - * / ^` on integers (checked) and reals.
pub mod arithmetic;

/// Bitwise operator evaluation.
///
/// Implements `~ & | ^ << >>` on 64-bit two's-complement integers.
pub mod bitwise;

/// Evaluation of infix sequences.
///
/// Applies operators directly with a value stack and an operator stack.
pub mod infix;

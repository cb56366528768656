/// Public conversion entry points.
///
/// Dispatches every pair of notations to one of three primitives (the
/// shunting-yard, the infix reconstruction and the reversal trick) and
/// composes them where no direct route exists.
pub mod core;

/// Infix to postfix conversion.
///
/// Checks the shape of an infix sequence and runs the shunting-yard over it.
pub mod shunting_yard;

/// Prefix and postfix to infix conversion.
pub mod infix;

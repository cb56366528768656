/// Expression tree construction.
///
/// Builds an [`ExpressionTree`](crate::ast::ExpressionTree) from a token
/// sequence in any notation and defines the result type shared by every
/// structural check of the crate.
pub mod core;

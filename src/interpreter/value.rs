/// Numeric values produced by evaluation.
///
/// Defines the `Number` type, its textual form and the coercions between the
/// integer and real representations used by the evaluation modes.
pub mod core;

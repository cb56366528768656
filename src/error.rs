/// Structural errors.
///
/// Defines the errors raised while tokenizing text and while checking the
/// shape of a token sequence: stray characters, operators from the wrong
/// family, unbalanced parentheses, operators without enough operands and
/// sequences that do not reduce to a single expression.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the errors that can only surface once values are involved, such
/// as unbound variables, division by zero or integer overflow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Machine-readable classification shared by every error of the crate.
///
/// Callers that need a stable code (exit statuses, logs) match on the kind
/// instead of the message text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character outside the operand, operator and parenthesis set.
    InvalidCharacter,
    /// A known operator symbol that does not belong to the active family.
    UnknownOperator,
    /// Unbalanced or crossed parentheses.
    MismatchedParentheses,
    /// An operator applied with fewer operands than its arity.
    InsufficientOperands,
    /// The sequence did not reduce to exactly one expression.
    InvalidExpression,
    /// The expression nests deeper than the supported limit.
    NestingTooDeep,
    /// The tree is too tall to be drawn.
    TreeTooTall,
    /// An operand has no binding.
    UndefinedVariable,
    /// Integer or real division by zero.
    DivisionByZero,
    /// Integer arithmetic left the 64-bit range.
    Overflow,
    /// A binding was attempted for something that is not a letter.
    InvalidBinding,
    /// A fractional value was used where an integer is required.
    RealIsFractional,
    /// A value does not fit the numeric type of the mode.
    LiteralTooLarge,
}

impl ErrorKind {
    /// Stable snake case name of the kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid_character",
            Self::UnknownOperator => "unknown_operator",
            Self::MismatchedParentheses => "mismatched_parentheses",
            Self::InsufficientOperands => "insufficient_operands",
            Self::InvalidExpression => "invalid_expression",
            Self::NestingTooDeep => "nesting_too_deep",
            Self::TreeTooTall => "tree_too_tall",
            Self::UndefinedVariable => "undefined_variable",
            Self::DivisionByZero => "division_by_zero",
            Self::Overflow => "overflow",
            Self::InvalidBinding => "invalid_binding",
            Self::RealIsFractional => "real_is_fractional",
            Self::LiteralTooLarge => "literal_too_large",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

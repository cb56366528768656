use crate::{
    ast::Operator,
    error::{ErrorKind, ParseError},
    interpreter::lexer::OperatorSet,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// The token sequence itself is malformed.
    Parse(ParseError),
    /// An operand has no entry in the bindings.
    UndefinedVariable {
        /// The name of the variable.
        name: char,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Integer arithmetic overflowed.
    Overflow {
        /// The operation that overflowed, for example `9223372036854775807 + 1`.
        details: String,
    },
    /// Tried to bind a name that is not a letter.
    InvalidBinding {
        /// The rejected name.
        name: char,
    },
    /// A real with a fractional part was used in an integer mode.
    RealIsFractional {
        /// The value as written or bound.
        value: String,
    },
    /// A literal or binding does not fit the numeric type of the mode.
    LiteralTooLarge {
        /// The value as written or bound.
        value: String,
    },
    /// An operator applied outside the operator set that handles it, such as
    /// `&` on reals.
    UnsupportedOperator {
        /// The rejected operator.
        operator:  Operator,
        /// The operator set that was asked to apply it.
        operators: OperatorSet,
    },
}

impl RuntimeError {
    /// Returns the machine-readable kind of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(error) => error.kind(),
            Self::UndefinedVariable { .. } => ErrorKind::UndefinedVariable,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::InvalidBinding { .. } => ErrorKind::InvalidBinding,
            Self::RealIsFractional { .. } => ErrorKind::RealIsFractional,
            Self::LiteralTooLarge { .. } => ErrorKind::LiteralTooLarge,
            Self::UnsupportedOperator { .. } => ErrorKind::UnknownOperator,
        }
    }
}

impl From<ParseError> for RuntimeError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "{error}"),
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::Overflow { details } => {
                write!(f, "Integer overflow while computing {details}.")
            },
            Self::InvalidBinding { name } => {
                write!(f, "Cannot bind '{name}': variable names are single letters.")
            },
            Self::RealIsFractional { value } => write!(f,
                                                       "Value {value} is fractional and cannot be used as an integer."),
            Self::LiteralTooLarge { value } => {
                write!(f, "Value {value} is too large for this mode.")
            },
            Self::UnsupportedOperator { operator, operators } => {
                write!(f, "Operator '{operator}' is not one of the {operators} operators.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            _ => None,
        }
    }
}

use crate::{ast::Operator, error::ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing or restructuring an
/// expression.
pub enum ParseError {
    /// A character that is neither an operand, an operator nor a parenthesis.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the source text.
        position:  usize,
    },
    /// An operator symbol outside the active operator family.
    UnknownOperator {
        /// The symbol as written.
        symbol:   String,
        /// Byte offset of the symbol in the source text.
        position: usize,
    },
    /// A parenthesis without a partner.
    MismatchedParentheses {
        /// The parenthesis that could not be matched, `(` or `)`.
        found: char,
    },
    /// An operator was reached with fewer operands available than its arity.
    InsufficientOperands {
        /// The operator that could not be applied.
        operator:  Operator,
        /// Operands required by the operator.
        required:  usize,
        /// Operands that were available.
        available: usize,
    },
    /// The operand stack held something other than exactly one entry at the
    /// end.
    InvalidExpression {
        /// Number of entries left on the stack.
        depth: usize,
    },
    /// An operand, group or complement directly follows a complete operand,
    /// as in `a b` or `a~b`.
    MissingOperator {
        /// The token that needed an operator in front of it.
        token: String,
    },
    /// The expression nests deeper than `limit` levels.
    NestingTooDeep {
        /// The maximum supported depth.
        limit: usize,
    },
    /// The tree is too tall for the character grid.
    TreeTooTall {
        /// Number of node levels in the tree.
        height: usize,
        /// The maximum number of levels that can be drawn.
        limit:  usize,
    },
}

impl ParseError {
    /// Returns the machine-readable kind of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            Self::MismatchedParentheses { .. } => ErrorKind::MismatchedParentheses,
            Self::InsufficientOperands { .. } => ErrorKind::InsufficientOperands,
            Self::InvalidExpression { .. } | Self::MissingOperator { .. } => ErrorKind::InvalidExpression,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Self::TreeTooTall { .. } => ErrorKind::TreeTooTall,
        }
    }

    /// Maps an error found in a reversed token sequence back to the original
    /// orientation, where every parenthesis faces the other way.
    #[must_use]
    pub(crate) fn unreversed(self) -> Self {
        match self {
            Self::MismatchedParentheses { found: '(' } => Self::MismatchedParentheses { found: ')' },
            Self::MismatchedParentheses { found: ')' } => Self::MismatchedParentheses { found: '(' },
            other => other,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character, position } => {
                write!(f, "Invalid character '{character}' at position {position}.")
            },

            Self::UnknownOperator { symbol, position } => {
                write!(f, "Unknown operator '{symbol}' at position {position}.")
            },

            Self::MismatchedParentheses { found } => {
                write!(f, "Mismatched parentheses: '{found}' has no partner.")
            },

            Self::InsufficientOperands { operator,
                                         required,
                                         available, } => write!(f,
                                                                "Insufficient operands for '{operator}': needs {required}, found {available}."),

            Self::InvalidExpression { depth } => write!(f,
                                                        "Invalid expression: {depth} values left where exactly one was expected."),

            Self::MissingOperator { token } => write!(f, "Missing operator before '{token}'."),

            Self::NestingTooDeep { limit } => {
                write!(f, "Expression nests deeper than {limit} levels.")
            },

            Self::TreeTooTall { height, limit } => {
                write!(f, "Tree with {height} levels is too tall to draw, the limit is {limit}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}

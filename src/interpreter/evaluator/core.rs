use std::{collections::HashMap, fmt, str::FromStr};

use log::{debug, trace};

use crate::{
    ast::{Notation, Operand, Operator},
    error::RuntimeError,
    interpreter::{
        evaluator::{arithmetic, bitwise, infix::evaluate_infix},
        lexer::{OperatorSet, Token},
        stack::{Operands, Scan, reduce},
        trace::{TraceSink, Tracer},
        value::core::Number,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Selects the number type and operator family of an evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EvalMode {
    /// Arithmetic on 64-bit integers; division truncates toward zero.
    #[default]
    Integer,
    /// Arithmetic on double precision reals.
    Real,
    /// Bitwise operators on 64-bit two's-complement integers.
    Bitwise,
}

impl EvalMode {
    /// The operator family expressions of this mode are written in.
    ///
    /// # Example
    /// ```
    /// use notation::interpreter::{evaluator::core::EvalMode, lexer::OperatorSet};
    ///
    /// assert_eq!(EvalMode::Real.operators(), OperatorSet::Arithmetic);
    /// assert_eq!(EvalMode::Bitwise.operators(), OperatorSet::Bitwise);
    /// ```
    #[must_use]
    pub const fn operators(self) -> OperatorSet {
        match self {
            Self::Integer | Self::Real => OperatorSet::Arithmetic,
            Self::Bitwise => OperatorSet::Bitwise,
        }
    }
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Bitwise => "bitwise",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EvalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Integer),
            "real" | "float" => Ok(Self::Real),
            "bit" | "bitwise" => Ok(Self::Bitwise),
            other => Err(format!("unknown mode '{other}', expected int, real or bitwise")),
        }
    }
}

/// Values of the variables of an expression.
///
/// Names are single letters and case-sensitive. Looking up a name that was
/// never bound is an error at evaluation time, there is no default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<char, Number>,
}

impl Bindings {
    /// Creates an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, value)` pairs. Later pairs overwrite earlier
    /// ones.
    ///
    /// # Errors
    /// `InvalidBinding` if a name is not a letter.
    ///
    /// # Example
    /// ```
    /// use notation::interpreter::{evaluator::core::Bindings, value::core::Number};
    ///
    /// let bindings = Bindings::from_pairs([('a', 2), ('b', 3)]).unwrap();
    /// assert_eq!(bindings.get('b'), Some(Number::Integer(3)));
    /// assert_eq!(bindings.get('c'), None);
    ///
    /// assert!(Bindings::from_pairs([('1', 2)]).is_err());
    /// ```
    pub fn from_pairs<I, V>(pairs: I) -> EvalResult<Self>
        where I: IntoIterator<Item = (char, V)>,
              V: Into<Number>
    {
        let mut bindings = Self::new();
        for (name, value) in pairs {
            bindings.bind(name, value)?;
        }
        Ok(bindings)
    }

    /// Binds `name` to `value`, replacing any previous value.
    ///
    /// # Errors
    /// `InvalidBinding` if `name` is not an ASCII letter.
    pub fn bind(&mut self, name: char, value: impl Into<Number>) -> EvalResult<()> {
        if !name.is_ascii_alphabetic() {
            return Err(RuntimeError::InvalidBinding { name });
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: char) -> Option<Number> {
        self.values.get(&name).copied()
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluates a token sequence to a number.
///
/// Postfix is scanned left to right and prefix right to left with a single
/// value stack. Infix is evaluated directly with a value stack and an operator
/// stack, using the same precedence rules as the conversion to postfix.
///
/// Every operand is converted to the number type of `mode` before use.
///
/// # Parameters
/// - `tokens`: The expression.
/// - `notation`: Notation of `tokens`.
/// - `bindings`: Values of the variables in the expression.
/// - `mode`: Number type and operator semantics.
///
/// # Returns
/// The value of the expression.
///
/// # Errors
/// - `Parse` for malformed sequences, see
///   [`convert`](crate::interpreter::converter::core::convert).
/// - `UndefinedVariable` for a variable missing from `bindings`.
/// - `DivisionByZero` for `/` by zero, and for integer `0 ^ n` with `n < 0`.
/// - `Overflow` when integer arithmetic leaves the 64-bit range.
/// - `RealIsFractional` or `LiteralTooLarge` for operands that do not fit the
///   mode.
/// - `UnsupportedOperator` for bitwise operators in real mode.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::{
///         evaluator::core::{Bindings, EvalMode, evaluate},
///         lexer::{OperatorSet, tokenize},
///         value::core::Number,
///     },
/// };
///
/// let bindings = Bindings::from_pairs([('a', 2), ('b', 3), ('c', 4)]).unwrap();
/// let tokens = tokenize("a+b*c", OperatorSet::Arithmetic).unwrap();
///
/// let value = evaluate(&tokens, Notation::Infix, &bindings, EvalMode::Integer).unwrap();
/// assert_eq!(value, Number::Integer(14));
/// ```
pub fn evaluate(tokens: &[Token],
                notation: Notation,
                bindings: &Bindings,
                mode: EvalMode)
                -> EvalResult<Number> {
    evaluate_with(tokens, notation, bindings, mode, &mut Tracer::disabled())
}

/// Evaluates like [`evaluate`] and reports every push and operator
/// application to `sink`.
///
/// When the evaluation fails `sink` receives nothing.
///
/// # Errors
/// Same as [`evaluate`].
pub fn evaluate_traced(tokens: &[Token],
                       notation: Notation,
                       bindings: &Bindings,
                       mode: EvalMode,
                       sink: &mut dyn TraceSink)
                       -> EvalResult<Number> {
    let mut tracer = Tracer::new(sink);
    let value = evaluate_with(tokens, notation, bindings, mode, &mut tracer)?;
    tracer.commit();
    Ok(value)
}

fn evaluate_with(tokens: &[Token],
                 notation: Notation,
                 bindings: &Bindings,
                 mode: EvalMode,
                 tracer: &mut Tracer<'_>)
                 -> EvalResult<Number> {
    debug!("evaluating {} {notation} tokens in {mode} mode", tokens.len());

    let value = match notation {
        Notation::Infix => evaluate_infix(tokens, bindings, mode, tracer),
        Notation::Postfix => evaluate_linear(tokens, Scan::Postfix, bindings, mode, tracer),
        Notation::Prefix => evaluate_linear(tokens, Scan::Prefix, bindings, mode, tracer),
    }?;

    trace!("evaluated to {value}");
    Ok(value)
}

fn evaluate_linear(tokens: &[Token],
                   scan: Scan,
                   bindings: &Bindings,
                   mode: EvalMode,
                   tracer: &mut Tracer<'_>)
                   -> EvalResult<Number> {
    reduce(tokens,
           scan,
           tracer,
           |operand| resolve(operand, bindings, mode),
           |operator, operands| apply(operator, operands, mode))
}

/// Looks up a variable or parses a literal in the number type of `mode`.
pub(crate) fn resolve(operand: &Operand, bindings: &Bindings, mode: EvalMode) -> EvalResult<Number> {
    match operand {
        Operand::Variable(name) => {
            bindings.get(*name)
                    .ok_or(RuntimeError::UndefinedVariable { name: *name })?
                    .for_mode(mode)
        },
        Operand::Literal(text) => Number::parse_literal(text, mode),
    }
}

/// Applies `operator` to its operands.
///
/// Arithmetic operators are available in every mode and follow the number
/// type of their operands. Bitwise operators need integers and are rejected in
/// real mode.
pub(crate) fn apply(operator: Operator, operands: Operands<Number>, mode: EvalMode) -> EvalResult<Number> {
    let bitwise_only = !OperatorSet::Arithmetic.contains(operator);
    if bitwise_only && mode == EvalMode::Real {
        return Err(RuntimeError::UnsupportedOperator { operator,
                                                       operators: OperatorSet::Arithmetic });
    }

    match operands {
        Operands::One(value) => bitwise::complement(value),
        Operands::Two(left, right) if bitwise_only => bitwise::apply(operator, left, right),
        Operands::Two(left, right) => arithmetic::apply(operator, left, right),
    }
}

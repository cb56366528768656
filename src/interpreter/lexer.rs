use std::{fmt, str::FromStr};

use log::trace;
use logos::Logos;

use crate::{
    ast::{Notation, Operand, Operator},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// Raw lexical unit recognised in the source text.
///
/// The lexeme set is the union of both operator families. Deciding whether a
/// symbol is acceptable happens afterwards, in [`tokenize`], against the
/// active [`OperatorSet`].
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Lexeme {
    /// Numeric literal such as `42` or `3.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    /// A single letter; `ab` is two operands.
    #[regex(r"[a-zA-Z]", |lex| lex.slice().chars().next())]
    Letter(char),
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Spaces, tabs and line breaks.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// The operator family an expression is written in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum OperatorSet {
    /// `+ - * / ^`, where `^` is exponentiation.
    #[default]
    Arithmetic,
    /// `~ & | ^ << >>`, where `^` is exclusive or.
    Bitwise,
}

impl OperatorSet {
    /// Maps a symbol lexeme to an operator of this family.
    ///
    /// Returns `None` for lexemes that are not operators of the family.
    #[must_use]
    pub fn resolve(self, lexeme: &Lexeme) -> Option<Operator> {
        match (self, lexeme) {
            (Self::Arithmetic, Lexeme::Plus) => Some(Operator::Add),
            (Self::Arithmetic, Lexeme::Minus) => Some(Operator::Sub),
            (Self::Arithmetic, Lexeme::Star) => Some(Operator::Mul),
            (Self::Arithmetic, Lexeme::Slash) => Some(Operator::Div),
            (Self::Arithmetic, Lexeme::Caret) => Some(Operator::Pow),
            (Self::Bitwise, Lexeme::Tilde) => Some(Operator::Not),
            (Self::Bitwise, Lexeme::Ampersand) => Some(Operator::And),
            (Self::Bitwise, Lexeme::Pipe) => Some(Operator::Or),
            (Self::Bitwise, Lexeme::Caret) => Some(Operator::Xor),
            (Self::Bitwise, Lexeme::ShiftLeft) => Some(Operator::Shl),
            (Self::Bitwise, Lexeme::ShiftRight) => Some(Operator::Shr),
            _ => None,
        }
    }

    /// Returns `true` if `operator` belongs to this family.
    #[must_use]
    pub const fn contains(self, operator: Operator) -> bool {
        match operator {
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow => {
                matches!(self, Self::Arithmetic)
            },
            Operator::Not
            | Operator::And
            | Operator::Or
            | Operator::Xor
            | Operator::Shl
            | Operator::Shr => matches!(self, Self::Bitwise),
        }
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Bitwise => write!(f, "bitwise"),
        }
    }
}

impl FromStr for OperatorSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arithmetic" | "arith" => Ok(Self::Arithmetic),
            "bitwise" | "bit" => Ok(Self::Bitwise),
            other => Err(format!("unknown operator set '{other}', expected arithmetic or bitwise")),
        }
    }
}

/// A token of an expression in any notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A variable or numeric literal.
    Operand(Operand),
    /// An operator of the active family.
    Operator(Operator),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl Token {
    /// Returns the token as seen in a mirror: parentheses face the other way.
    ///
    /// Used when an infix sequence is reversed.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        match self {
            Self::LeftParen => Self::RightParen,
            Self::RightParen => Self::LeftParen,
            other => other.clone(),
        }
    }

    /// Returns `true` for operands that take more than one character to write.
    fn is_wide(&self) -> bool {
        matches!(self, Self::Operand(Operand::Literal(text)) if text.len() > 1)
    }
}

impl From<Operator> for Token {
    fn from(operator: Operator) -> Self {
        Self::Operator(operator)
    }
}

impl From<Operand> for Token {
    fn from(operand: Operand) -> Self {
        Self::Operand(operand)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(operand) => write!(f, "{operand}"),
            Self::Operator(operator) => write!(f, "{operator}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
        }
    }
}

/// Splits `source` into tokens using the operators of `operators`.
///
/// Whitespace separates tokens and is otherwise ignored. Every letter is an
/// operand of its own, while a run of digits (with an optional fractional
/// part) forms a single literal. `<<` and `>>` are recognised before `<` and
/// `>`.
///
/// # Errors
/// - `InvalidCharacter` for characters no rule accepts.
/// - `UnknownOperator` for operator symbols outside `operators`.
///
/// # Example
/// ```
/// use notation::{
///     ast::{Operand, Operator},
///     interpreter::lexer::{OperatorSet, Token, tokenize},
/// };
///
/// let tokens = tokenize("~a & (b << 2)", OperatorSet::Bitwise).unwrap();
/// assert_eq!(tokens.len(), 8);
/// assert_eq!(tokens[0], Token::Operator(Operator::Not));
/// assert_eq!(tokens[6], Token::Operand(Operand::Literal("2".to_string())));
///
/// assert!(tokenize("a & b", OperatorSet::Arithmetic).is_err());
/// ```
pub fn tokenize(source: &str, operators: OperatorSet) -> ParseResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let position = lexer.span().start;
        let Ok(lexeme) = lexeme else {
            let character = source[position..].chars().next().unwrap_or_default();
            return Err(ParseError::InvalidCharacter { character, position });
        };

        let token = match lexeme {
            Lexeme::Number(text) => Token::Operand(Operand::Literal(text)),
            Lexeme::Letter(name) => Token::Operand(Operand::Variable(name)),
            Lexeme::LParen => Token::LeftParen,
            Lexeme::RParen => Token::RightParen,
            symbol => match operators.resolve(&symbol) {
                Some(operator) => Token::Operator(operator),
                None => {
                    return Err(ParseError::UnknownOperator { symbol: lexer.slice().to_string(),
                                                             position });
                },
            },
        };
        tokens.push(token);
    }

    trace!("tokenized {source:?} into {} {operators} tokens", tokens.len());
    Ok(tokens)
}

/// Writes a token sequence back as text.
///
/// Infix sequences are always written without spaces. Prefix and postfix
/// sequences are compact (`abc*+`) while every operand is a single
/// character, and space separated (`3 14 + 5 *`) otherwise, since adjacent
/// literals would run together.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::lexer::{OperatorSet, to_text, tokenize},
/// };
///
/// let tokens = tokenize("3 14 + 5 *", OperatorSet::Arithmetic).unwrap();
/// assert_eq!(to_text(&tokens, Notation::Postfix), "3 14 + 5 *");
///
/// let tokens = tokenize("a b c * +", OperatorSet::Arithmetic).unwrap();
/// assert_eq!(to_text(&tokens, Notation::Postfix), "abc*+");
/// ```
#[must_use]
pub fn to_text(tokens: &[Token], notation: Notation) -> String {
    let separator = match notation {
        Notation::Infix => "",
        Notation::Prefix | Notation::Postfix => {
            if tokens.iter().any(Token::is_wide) {
                " "
            } else {
                ""
            }
        },
    };

    tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(separator)
}

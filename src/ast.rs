use std::{fmt, str::FromStr};

use crate::interpreter::lexer::{Token, to_text};

/// The position of operators relative to their operands.
///
/// `Notation` governs token order and whether parentheses may appear in a
/// token sequence. Only infix sequences carry parentheses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Operators between their operands (`a+b*c`).
    Infix,
    /// Operators before their operands (`+a*bc`).
    Prefix,
    /// Operators after their operands (`abc*+`).
    Postfix,
}

impl Notation {
    /// All notations, in the order they are usually listed.
    pub const ALL: [Self; 3] = [Self::Infix, Self::Prefix, Self::Postfix];
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Infix => "infix",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "infix" | "in" => Ok(Self::Infix),
            "prefix" | "pre" => Ok(Self::Prefix),
            "postfix" | "post" => Ok(Self::Postfix),
            other => Err(format!("unknown notation '{other}', expected infix, prefix or postfix")),
        }
    }
}

/// Represents an operator of either operator family.
///
/// The arithmetic family is `+ - * / ^` and the bitwise family is
/// `~ & | ^ << >>`. The caret is shared between the two families: it is
/// [`Operator::Pow`] in arithmetic expressions and [`Operator::Xor`] in bitwise
/// ones. The two families never appear in the same expression.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`, arithmetic)
    Pow,
    /// Bitwise complement (`~`), the only unary operator.
    Not,
    /// Bitwise and (`&`)
    And,
    /// Bitwise or (`|`)
    Or,
    /// Bitwise exclusive or (`^`, bitwise)
    Xor,
    /// Left shift (`<<`)
    Shl,
    /// Arithmetic right shift (`>>`)
    Shr,
}

impl Operator {
    /// Returns the textual symbol of the operator.
    ///
    /// ## Example
    /// ```
    /// use notation::ast::Operator;
    ///
    /// assert_eq!(Operator::Shl.symbol(), "<<");
    /// assert_eq!(Operator::Pow.symbol(), Operator::Xor.symbol());
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow | Self::Xor => "^",
            Self::Not => "~",
            Self::And => "&",
            Self::Or => "|",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }

    /// Number of operands the operator consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    /// Returns `true` for the unary complement.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Binding strength of the operator; higher binds tighter.
    ///
    /// Arithmetic: `^` = 3, `*` `/` = 2, `+` `-` = 1.
    /// Bitwise: `~` = 4, `<<` `>>` = 3, `&` = 2, `^` = 1, `|` = 0.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => 4,
            Self::Pow | Self::Shl | Self::Shr => 3,
            Self::Mul | Self::Div | Self::And => 2,
            Self::Add | Self::Sub | Self::Xor => 1,
            Self::Or => 0,
        }
    }

    /// Decides whether `self`, sitting on top of an operator stack, has to be
    /// applied before `incoming` is pushed.
    ///
    /// Binary operators are treated as left-associative, so an equal
    /// precedence pops. The unary complement is only displaced by something
    /// strictly tighter, which nothing is.
    ///
    /// `pop_on_equal` is cleared by the reversed pass of the infix to prefix
    /// conversion, where equal precedence must stay on the stack.
    #[must_use]
    pub const fn yields_to(self, incoming: Self, pop_on_equal: bool) -> bool {
        if incoming.is_unary() || !pop_on_equal {
            self.precedence() > incoming.precedence()
        } else {
            self.precedence() >= incoming.precedence()
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An operand: a single-letter variable or a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A variable such as `a`; names are case-sensitive single letters.
    Variable(char),
    /// A numeric literal kept as written (`42`, `3.5`). The literal is
    /// interpreted when an evaluation mode is known.
    Literal(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "{name}"),
            Self::Literal(text) => write!(f, "{text}"),
        }
    }
}

/// A binary expression tree.
///
/// Every subtree is exclusively owned by its parent. Trees are built bottom
/// up by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionTree {
    /// An operand at the bottom of the tree.
    Leaf(Operand),
    /// The unary complement and its single operand.
    Unary {
        /// Always a unary operator.
        operator: Operator,
        /// The complemented subtree.
        operand:  Box<Self>,
    },
    /// A binary operator applied to two subtrees.
    Binary {
        /// Always a binary operator.
        operator: Operator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
    },
}

impl ExpressionTree {
    /// Text shown for this node.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Leaf(operand) => operand.to_string(),
            Self::Unary { operator, .. } | Self::Binary { operator, .. } => {
                operator.symbol().to_string()
            },
        }
    }

    /// Number of edges on the longest path from this node to a leaf.
    ///
    /// ## Example
    /// ```
    /// use notation::ast::{ExpressionTree, Operand};
    ///
    /// let leaf = ExpressionTree::Leaf(Operand::Variable('a'));
    /// assert_eq!(leaf.height(), 0);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Unary { operand, .. } => 1 + operand.height(),
            Self::Binary { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    /// Total number of nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Unary { operand, .. } => 1 + operand.size(),
            Self::Binary { left, right, .. } => 1 + left.size() + right.size(),
        }
    }

    /// Flattens the tree into a token sequence in the requested notation.
    ///
    /// Prefix and postfix come from preorder and postorder traversals. The
    /// infix form is the inorder traversal with every binary application
    /// wrapped in parentheses, except the outermost one.
    ///
    /// ## Example
    /// ```
    /// use notation::{
    ///     ast::{ExpressionTree, Notation, Operand, Operator},
    ///     interpreter::lexer::to_text,
    /// };
    ///
    /// let leaf = |c| Box::new(ExpressionTree::Leaf(Operand::Variable(c)));
    /// let tree = ExpressionTree::Binary { operator: Operator::Add,
    ///                                     left:     leaf('a'),
    ///                                     right:    leaf('b'), };
    ///
    /// assert_eq!(to_text(&tree.to_tokens(Notation::Prefix), Notation::Prefix), "+ab");
    /// assert_eq!(to_text(&tree.to_tokens(Notation::Infix), Notation::Infix), "a+b");
    /// ```
    #[must_use]
    pub fn to_tokens(&self, notation: Notation) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.size() * 3);
        match (notation, self) {
            (Notation::Infix, Self::Binary { operator, left, right }) => {
                left.push_tokens(notation, &mut tokens);
                tokens.push(Token::Operator(*operator));
                right.push_tokens(notation, &mut tokens);
            },
            _ => self.push_tokens(notation, &mut tokens),
        }
        tokens
    }

    fn push_tokens(&self, notation: Notation, out: &mut Vec<Token>) {
        match self {
            Self::Leaf(operand) => out.push(Token::Operand(operand.clone())),
            Self::Unary { operator, operand } => match notation {
                Notation::Postfix => {
                    operand.push_tokens(notation, out);
                    out.push(Token::Operator(*operator));
                },
                Notation::Prefix | Notation::Infix => {
                    out.push(Token::Operator(*operator));
                    operand.push_tokens(notation, out);
                },
            },
            Self::Binary { operator, left, right } => match notation {
                Notation::Prefix => {
                    out.push(Token::Operator(*operator));
                    left.push_tokens(notation, out);
                    right.push_tokens(notation, out);
                },
                Notation::Postfix => {
                    left.push_tokens(notation, out);
                    right.push_tokens(notation, out);
                    out.push(Token::Operator(*operator));
                },
                Notation::Infix => {
                    out.push(Token::LeftParen);
                    left.push_tokens(notation, out);
                    out.push(Token::Operator(*operator));
                    right.push_tokens(notation, out);
                    out.push(Token::RightParen);
                },
            },
        }
    }
}

impl fmt::Display for ExpressionTree {
    /// Writes the fully parenthesised infix form of the tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_text(&self.to_tokens(Notation::Infix), Notation::Infix))
    }
}

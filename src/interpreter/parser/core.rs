use std::fmt;

use log::{debug, trace};

use crate::{
    ast::{ExpressionTree, Notation, Operator},
    error::ParseError,
    interpreter::{
        converter::core::convert,
        lexer::Token,
        stack::{Operands, Scan, reduce},
        trace::Tracer,
    },
};

/// Result type used by the tokenizer, the converter and the tree builder.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum height of a built tree.
///
/// Trees are traversed recursively, so deeper nesting is rejected up front.
pub const MAX_TREE_DEPTH: usize = 256;

/// A subtree on the builder stack together with its height.
struct Node {
    tree:   ExpressionTree,
    height: usize,
}

impl Node {
    fn leaf(tree: ExpressionTree) -> Self {
        Self { tree, height: 0 }
    }

    fn join(operator: Operator, operands: Operands<Self>) -> ParseResult<Self> {
        let (tree, height) = match operands {
            Operands::One(only) => {
                let height = only.height + 1;
                (ExpressionTree::Unary { operator,
                                         operand: Box::new(only.tree) },
                 height)
            },
            Operands::Two(left, right) => {
                let height = left.height.max(right.height) + 1;
                (ExpressionTree::Binary { operator,
                                          left: Box::new(left.tree),
                                          right: Box::new(right.tree) },
                 height)
            },
        };

        if height > MAX_TREE_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_TREE_DEPTH });
        }
        Ok(Self { tree, height })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

/// Builds the expression tree of a token sequence.
///
/// Postfix is scanned left to right and prefix right to left; each operand
/// becomes a leaf and each operator takes its children from the stack. In a
/// prefix scan the first child popped is the left one. Infix is converted to
/// postfix first.
///
/// # Parameters
/// - `tokens`: The expression.
/// - `notation`: Notation of `tokens`.
///
/// # Returns
/// The root of the tree.
///
/// # Errors
/// - The structural errors of
///   [`convert`](crate::interpreter::converter::core::convert).
/// - `NestingTooDeep` if the tree would be taller than [`MAX_TREE_DEPTH`].
///
/// # Example
/// ```
/// use notation::{
///     ast::{ExpressionTree, Notation, Operand, Operator},
///     interpreter::{
///         lexer::{OperatorSet, tokenize},
///         parser::core::build,
///     },
/// };
///
/// let tokens = tokenize("3 4 + 5 *", OperatorSet::Arithmetic).unwrap();
/// let tree = build(&tokens, Notation::Postfix).unwrap();
///
/// let ExpressionTree::Binary { operator, left, right } = tree else { panic!() };
/// assert_eq!(operator, Operator::Mul);
/// assert_eq!(left.label(), "+");
/// assert_eq!(*right, ExpressionTree::Leaf(Operand::Literal("5".to_string())));
/// ```
pub fn build(tokens: &[Token], notation: Notation) -> ParseResult<ExpressionTree> {
    debug!("building tree from {} {notation} tokens", tokens.len());

    let node = match notation {
        Notation::Postfix => build_linear(tokens, Scan::Postfix),
        Notation::Prefix => build_linear(tokens, Scan::Prefix),
        Notation::Infix => {
            let postfix = convert(tokens, Notation::Infix, Notation::Postfix)?;
            build_linear(&postfix, Scan::Postfix)
        },
    }?;

    trace!("built tree of height {} with {} nodes", node.height, node.tree.size());
    Ok(node.tree)
}

fn build_linear(tokens: &[Token], scan: Scan) -> ParseResult<Node> {
    reduce(tokens,
           scan,
           &mut Tracer::disabled(),
           |operand| Ok(Node::leaf(ExpressionTree::Leaf(operand.clone()))),
           Node::join)
}

use log::trace;

use crate::{ast::ExpressionTree, error::ParseError, interpreter::parser::core::ParseResult};

/// Maximum number of node levels [`render`] draws.
///
/// The grid is `2^levels * 2 - 1` columns wide, so taller trees are refused.
pub const MAX_RENDER_LEVELS: usize = 16;

/// Character grid the tree is drawn on.
struct Grid {
    rows:  Vec<Vec<char>>,
    width: isize,
}

impl Grid {
    #[allow(clippy::cast_possible_wrap)]
    fn new(levels: usize) -> Self {
        let width = (1usize << levels) * 2 - 1;
        Self { rows:  vec![vec![' '; width]; levels * 2],
               width: width as isize, }
    }

    /// Writes `c` at `(row, column)`, ignoring positions outside the grid.
    #[allow(clippy::cast_sign_loss)]
    fn put(&mut self, row: usize, column: isize, c: char) {
        if !(0..self.width).contains(&column) {
            return;
        }
        if let Some(line) = self.rows.get_mut(row) {
            line[column as usize] = c;
        }
    }

    /// Places `node` centred in the columns `left..=right` of `row`, with its
    /// connectors on the row below and its children two rows down.
    #[allow(clippy::cast_possible_wrap)]
    fn place(&mut self, node: &ExpressionTree, row: usize, left: isize, right: isize) {
        let mid = (left + right) / 2;
        let label = node.label();
        let start = mid - (label.chars().count() / 2) as isize;
        for (offset, c) in label.chars().enumerate() {
            self.put(row, start + offset as isize, c);
        }

        let (left_child, right_child) = match node {
            ExpressionTree::Leaf(_) => (None, None),
            ExpressionTree::Unary { operand, .. } => (None, Some(operand.as_ref())),
            ExpressionTree::Binary { left, right, .. } => (Some(left.as_ref()), Some(right.as_ref())),
        };

        if let Some(child) = left_child {
            let child_mid = (left + mid - 1) / 2;
            self.put(row + 1, child_mid + 1, '/');
            for column in child_mid + 2..mid {
                self.put(row + 1, column, '_');
            }
            self.place(child, row + 2, left, mid - 1);
        }

        if let Some(child) = right_child {
            let child_mid = (mid + 1 + right) / 2;
            self.put(row + 1, child_mid - 1, '\\');
            for column in mid + 1..child_mid - 1 {
                self.put(row + 1, column, '_');
            }
            self.place(child, row + 2, mid + 1, right);
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

/// Draws a tree as lines of text.
///
/// Each node level takes two rows: one for the labels and one for the `/`,
/// `\` and `_` connectors to the children. A node is centred over the columns
/// assigned to it, and those columns are split in half between its children.
/// The unary complement has its operand on the right. Every line has its
/// trailing spaces removed, and the last line, below the deepest leaves, is
/// always empty.
///
/// The layout does not balance anything: a skewed tree draws wide and sparse.
///
/// # Errors
/// `TreeTooTall` if the tree has more than [`MAX_RENDER_LEVELS`] levels.
///
/// # Example
/// ```
/// use notation::{
///     ast::Notation,
///     interpreter::{
///         lexer::{OperatorSet, tokenize},
///         parser::core::build,
///         render::render,
///     },
/// };
///
/// let tokens = tokenize("a+b", OperatorSet::Arithmetic).unwrap();
/// let tree = build(&tokens, Notation::Infix).unwrap();
///
/// assert_eq!(render(&tree).unwrap(), vec!["   +", "  / \\", " a   b", ""]);
/// ```
pub fn render(tree: &ExpressionTree) -> ParseResult<Vec<String>> {
    let levels = tree.height() + 1;
    if levels > MAX_RENDER_LEVELS {
        return Err(ParseError::TreeTooTall { height: levels,
                                             limit:  MAX_RENDER_LEVELS, });
    }

    let mut grid = Grid::new(levels);
    let right = grid.width - 1;
    grid.place(tree, 0, 0, right);

    let lines = grid.into_lines();
    trace!("rendered {} levels into {} lines", levels, lines.len());
    Ok(lines)
}

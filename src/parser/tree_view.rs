//! ASCII rendering of an AST
//!
//! Each node is drawn as a boxed label, `(042)` for literals and `( + )` for
//! operators, with the left subtree laid out before its parent and the right
//! subtree after it. A connector row sits under every operator:
//!
//! ```text
//!      ( + )
//!   .----'---------.
//! (001)          ( * )
//!             .----'----.
//!           (002)     (003)
//! ```
//!
//! The output is diagnostic only and plays no part in evaluation.

use super::ast::AstNode;

/// Render `root` as lines of text, trailing spaces trimmed.
pub fn draw_tree(root: &AstNode) -> Vec<String> {
    let mut canvas = Canvas::default();
    canvas.place(root, 0, 0);
    canvas.into_lines()
}

fn label(node: &AstNode) -> String {
    match node {
        AstNode::Literal { value, .. } => format!("({:03})", value),
        AstNode::UnaryOp { op, .. } => format!("( {} )", op.symbol()),
        AstNode::BinaryOp { op, .. } => format!("( {} )", op.symbol()),
    }
}

#[derive(Default)]
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn put(&mut self, row: usize, col: usize, ch: char) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.rows[row];
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
        line[col] = ch;
    }

    fn write(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(row, col + i, ch);
        }
    }

    /// Draw the subtree rooted at `node` starting at column `offset`.
    ///
    /// Returns the subtree width and the column of the node's center.
    fn place(&mut self, node: &AstNode, offset: usize, depth: usize) -> (usize, usize) {
        let text = label(node);
        let width = text.chars().count();
        let row = depth * 2;

        match node {
            AstNode::Literal { .. } => {
                self.write(row, offset, &text);
                (width, offset + width / 2)
            }
            AstNode::UnaryOp { operand, .. } => {
                let (child_width, child_center) = self.place(operand, offset, depth + 1);
                let start = child_center.saturating_sub(width / 2).max(offset);
                self.write(row, start, &text);
                self.put(row + 1, child_center, '|');
                (child_width.max(start + width - offset), start + width / 2)
            }
            AstNode::BinaryOp { left, right, .. } => {
                let (left_width, left_center) = self.place(left, offset, depth + 1);
                let start = offset + left_width;
                self.write(row, start, &text);
                let (right_width, right_center) = self.place(right, start + width, depth + 1);

                let center = start + width / 2;
                for col in left_center..=right_center {
                    self.put(row + 1, col, '-');
                }
                self.put(row + 1, left_center, '.');
                self.put(row + 1, right_center, '.');
                self.put(row + 1, center, '\'');

                (left_width + width + right_width, center)
            }
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{BinOp, SourceLocation, UnOp};

    fn lit(value: i64) -> AstNode {
        AstNode::literal(value, SourceLocation::default())
    }

    fn bin(op: BinOp, left: AstNode, right: AstNode) -> AstNode {
        AstNode::binary(op, left, right, SourceLocation::default())
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(draw_tree(&lit(42)), vec!["(042)".to_string()]);
        assert_eq!(draw_tree(&lit(12345)), vec!["(12345)".to_string()]);
    }

    #[test]
    fn test_nested_binary() {
        let tree = bin(BinOp::Add, lit(1), bin(BinOp::Mul, lit(2), lit(3)));
        assert_eq!(
            draw_tree(&tree),
            vec![
                "     ( + )",
                "  .----'---------.",
                "(001)          ( * )",
                "            .----'----.",
                "          (002)     (003)",
            ]
        );
    }

    #[test]
    fn test_unary_sits_over_operand() {
        let tree = AstNode::unary(UnOp::Neg, lit(7), SourceLocation::default());
        assert_eq!(draw_tree(&tree), vec!["( - )", "  |", "(007)"]);
    }

    #[test]
    fn test_row_count_follows_depth() {
        let tree = bin(
            BinOp::Sub,
            bin(BinOp::Sub, bin(BinOp::Sub, lit(9), lit(1)), lit(1)),
            lit(1),
        );
        // Four levels of labels, three connector rows between them
        assert_eq!(draw_tree(&tree).len(), 7);
    }
}

// Evaluation engine: folds an AST to a single integer

use crate::interpreter::errors::EvalError;
use crate::interpreter::ops::{apply_binary, apply_unary};
use crate::parser::ast::AstNode;

/// Evaluate an expression tree bottom-up.
///
/// Both operands of a binary node are evaluated (left first) before the
/// operator is applied. Evaluation has no side effects.
pub fn evaluate(node: &AstNode) -> Result<i64, EvalError> {
    match node {
        AstNode::Literal { value, .. } => Ok(*value),

        AstNode::UnaryOp { op, operand, .. } => {
            let value = evaluate(operand)?;
            Ok(apply_unary(*op, value))
        }

        AstNode::BinaryOp {
            op,
            left,
            right,
            location,
        } => {
            let left_val = evaluate(left)?;
            let right_val = evaluate(right)?;
            apply_binary(*op, left_val, right_val, *location)
        }
    }
}

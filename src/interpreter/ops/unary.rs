//! Unary operator semantics

use crate::parser::ast::UnOp;

/// Apply a prefix operator to an evaluated operand.
pub(crate) fn apply_unary(op: UnOp, value: i64) -> i64 {
    match op {
        UnOp::Plus => value,
        UnOp::Neg => value.wrapping_neg(),
        UnOp::BitNot => !value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_ops() {
        assert_eq!(apply_unary(UnOp::Plus, -3), -3);
        assert_eq!(apply_unary(UnOp::Neg, 3), -3);
        assert_eq!(apply_unary(UnOp::Neg, i64::MIN), i64::MIN);
        assert_eq!(apply_unary(UnOp::BitNot, 0), -1);
        assert_eq!(apply_unary(UnOp::BitNot, 5), -6);
    }
}

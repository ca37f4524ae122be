//! Binary operator semantics
//!
//! `+ - *` wrap on overflow in two's complement. `/` and `%` truncate toward
//! zero, refuse a zero divisor, and wrap the single overflowing case
//! `i64::MIN / -1`. The bitwise operators act on the two's complement bits.

use crate::interpreter::errors::EvalError;
use crate::parser::ast::{BinOp, SourceLocation};

#[inline]
pub(crate) fn checked_div_values(a: i64, b: i64, location: SourceLocation) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero {
            operation: format!("{} / {}", a, b),
            location,
        });
    }
    Ok(a.wrapping_div(b))
}

#[inline]
pub(crate) fn checked_mod_values(a: i64, b: i64, location: SourceLocation) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::ModuloByZero {
            operation: format!("{} % {}", a, b),
            location,
        });
    }
    Ok(a.wrapping_rem(b))
}

#[inline]
pub(crate) fn bitwise_op(a: i64, b: i64, op: BinOp) -> i64 {
    match op {
        BinOp::BitAnd => a & b,
        BinOp::BitOr => a | b,
        BinOp::BitXor => a ^ b,
        _ => unreachable!("{:?} is not a bitwise operator", op),
    }
}

/// Combine two evaluated operands.
pub(crate) fn apply_binary(op: BinOp, a: i64, b: i64, location: SourceLocation) -> Result<i64, EvalError> {
    use BinOp::*;

    match op {
        Add => Ok(a.wrapping_add(b)),
        Sub => Ok(a.wrapping_sub(b)),
        Mul => Ok(a.wrapping_mul(b)),
        Div => checked_div_values(a, b, location),
        Mod => checked_mod_values(a, b, location),
        BitAnd | BitOr | BitXor => Ok(bitwise_op(a, b, op)),
    }
}

//! Evaluation error types
//!
//! This module defines [`EvalError`], the failures that can occur while
//! folding an AST to a value (as opposed to lex or parse errors).
//!
//! Every evaluation error aborts the current expression only; the caller
//! reports it and moves on to the next line.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Errors that can occur during evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Integer division by zero (`/`)
    DivisionByZero {
        operation: String,
        location: SourceLocation,
    },

    /// Integer remainder by zero (`%`)
    ModuloByZero {
        operation: String,
        location: SourceLocation,
    },
}

impl EvalError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            EvalError::DivisionByZero { location, .. } => location,
            EvalError::ModuloByZero { location, .. } => location,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivisionByZero {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Division by zero in {} at column {}",
                    operation, location.column
                )
            }
            EvalError::ModuloByZero {
                operation,
                location,
            } => {
                write!(
                    f,
                    "Modulo by zero in {} at column {}",
                    operation, location.column
                )
            }
        }
    }
}

impl std::error::Error for EvalError {}

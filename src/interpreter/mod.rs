//! Expression evaluation
//!
//! This module reduces a parsed AST to an integer:
//! - [`engine`]: the tree walk ([`engine::evaluate`])
//! - [`ops`]: per-operator semantics
//! - [`errors`]: evaluation error types
//!
//! # Execution Model
//!
//! Evaluation is a pure post-order fold over signed 64-bit integers. The
//! only failure is a zero divisor for `/` or `%`.

pub mod engine;
pub mod errors;
pub mod ops;

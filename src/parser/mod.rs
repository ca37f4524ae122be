//! Expression front end
//!
//! This module transforms a line of text into an Abstract Syntax Tree (AST):
//! - [`source`]: Character sources with one-step push-back (string or stream)
//! - [`lexer`]: Tokenization (characters → tokens)
//! - [`parse`]: Parser state and entry point (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`tree_view`]: ASCII rendering of a finished AST
//!
//! # Supported Grammar
//!
//! Integer literals, parentheses, `* / %`, `+ -`, and the bitwise `& ^ |`
//! chains. Comparison, logical, shift and ternary operators are tokenized
//! but rejected by the parser.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod source;
pub mod tree_view;

//! # Introduction
//!
//! calctty evaluates integer arithmetic expressions with a hand-written
//! lexer and recursive descent parser, then shows its work: the token
//! stream and an ASCII drawing of the AST, in a line REPL or a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Text / Stream → Lexer → Tokens → Parser → AST → Evaluator → i64
//! ```
//!
//! 1. [`parser`] tokenises the input (from a string or any reader) and
//!    builds an AST.
//! 2. [`interpreter`] folds the AST into a value, reporting division or
//!    modulo by zero.
//! 3. [`pipeline`] chains the stages and tags every failure with the stage
//!    it came from.
//! 4. [`repl`] is the line-oriented front end.
//! 5. [`ui`] is the ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported grammar
//!
//! Decimal integer literals, parentheses, `* / %`, `+ -` and the bitwise
//! `&`, `^`, `|` levels, all left associative. Arithmetic is on `i64` and
//! wraps on overflow.
//!
//! ```
//! use calctty::pipeline::eval_str;
//!
//! assert_eq!(eval_str("2+3*4"), Ok(14));
//! assert_eq!(eval_str("6&3|8"), Ok(10));
//! ```

pub mod interpreter;
pub mod parser;
pub mod pipeline;
pub mod repl;
pub mod ui;

//! Expression parsing implementation
//!
//! This module handles parsing of expressions with one recursive descent
//! method per precedence level. Each binary level parses the level below,
//! then folds a left-associative chain of its own operators.
//!
//! # Grammar
//!
//! ```text
//! <expression> : <ior_exp>
//! <ior_exp>    : <xor_exp>  ( '|' <xor_exp> )*
//! <xor_exp>    : <and_exp>  ( '^' <and_exp> )*
//! <and_exp>    : <add_exp>  ( '&' <add_exp> )*
//! <add_exp>    : <mult_exp> ( ('+' | '-') <mult_exp> )*
//! <mult_exp>   : <unary_exp> ( ('*' | '/' | '%') <unary_exp> )*
//! <unary_exp>  : <primary_exp>
//! <primary_exp>: <const> | '(' <expression> ')'
//! <const>      : [0-9]+
//! ```
//!
//! Whitespace tokens are skipped before every token the grammar inspects.
//!
//! Parenthesis nesting is capped at [`MAX_NESTING`] and tree height at
//! [`MAX_TREE_HEIGHT`]; deeper input is a [`ParseError`].
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser, MAX_NESTING, MAX_TREE_HEIGHT};

/// A parsed subexpression and the height of its tree (a literal is 1)
pub(crate) struct Subtree {
    pub(crate) node: AstNode,
    pub(crate) height: usize,
}

impl<'a> Parser<'a> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Subtree, ParseError> {
        self.parse_bitwise_or()
    }

    /// Parse bitwise OR (|)
    fn parse_bitwise_or(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_bitwise_xor()?;

        loop {
            self.consume_blanks();
            let loc = self.current_location();
            if !self.match_token(&TokenKind::BwOr) {
                break;
            }

            let right = self.parse_bitwise_xor()?;
            left = join(BinOp::BitOr, left, right, loc)?;
        }

        Ok(left)
    }

    /// Parse bitwise XOR (^)
    fn parse_bitwise_xor(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_bitwise_and()?;

        loop {
            self.consume_blanks();
            let loc = self.current_location();
            if !self.match_token(&TokenKind::BwXor) {
                break;
            }

            let right = self.parse_bitwise_and()?;
            left = join(BinOp::BitXor, left, right, loc)?;
        }

        Ok(left)
    }

    /// Parse bitwise AND (&)
    fn parse_bitwise_and(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            self.consume_blanks();
            let loc = self.current_location();
            if !self.match_token(&TokenKind::BwAnd) {
                break;
            }

            let right = self.parse_additive()?;
            left = join(BinOp::BitAnd, left, right, loc)?;
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            self.consume_blanks();
            let loc = self.current_location();
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();

            let right = self.parse_multiplicative()?;
            left = join(op, left, right, loc)?;
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            self.consume_blanks();
            let loc = self.current_location();
            let op = match self.peek().kind {
                TokenKind::Multiply => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                TokenKind::Mod => BinOp::Mod,
                _ => break,
            };
            self.advance();

            let right = self.parse_unary()?;
            left = join(op, left, right, loc)?;
        }

        Ok(left)
    }

    /// Parse unary
    ///
    /// No prefix operators are wired in yet, so this forwards to primary.
    fn parse_unary(&mut self) -> Result<Subtree, ParseError> {
        self.parse_primary()
    }

    /// Parse primary: constant or parenthesized expression
    fn parse_primary(&mut self) -> Result<Subtree, ParseError> {
        self.consume_blanks();

        if self.check(&TokenKind::LParen) {
            let open = self.advance().location;
            if self.nesting >= MAX_NESTING {
                return Err(too_deep(open));
            }

            self.nesting += 1;
            let expr = self.parse_expression();
            self.nesting -= 1;
            let expr = expr?;

            self.consume_blanks();
            self.expect_token(
                &TokenKind::RParen,
                &format!("Expected ')' to close '(' at column {}", open.column),
            )?;
            return Ok(expr);
        }

        self.parse_const()
    }

    /// Parse constant: a decimal integer literal
    fn parse_const(&mut self) -> Result<Subtree, ParseError> {
        self.consume_blanks();
        let token = self.peek();

        match &token.kind {
            TokenKind::Number(text) => {
                let value = text.parse::<i64>().map_err(|_| ParseError {
                    message: format!("Integer literal out of range: {}", text),
                    location: token.location,
                })?;
                self.advance();
                Ok(Subtree {
                    node: AstNode::literal(value, token.location),
                    height: 1,
                })
            }
            _ => Err(ParseError {
                message: format!("Expected a number, found {}", token),
                location: token.location,
            }),
        }
    }
}

/// Fold two operands under `op`, refusing trees taller than [`MAX_TREE_HEIGHT`].
fn join(op: BinOp, left: Subtree, right: Subtree, location: SourceLocation) -> Result<Subtree, ParseError> {
    let height = left.height.max(right.height) + 1;
    if height > MAX_TREE_HEIGHT {
        return Err(too_deep(location));
    }

    Ok(Subtree {
        node: AstNode::binary(op, left.node, right.node, location),
        height,
    })
}

fn too_deep(location: SourceLocation) -> ParseError {
    ParseError {
        message: "Expression nested too deeply".to_string(),
        location,
    }
}
